// Layered configuration: defaults file, local overrides, then APP__ env vars

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub metrics_port: u16,
}

impl Settings {
    /// Load from the `config/` directory next to the working directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Precedence, lowest to highest: `default.toml`, `local.toml`
    /// (uncommitted), then environment variables such as
    /// `APP__DATABASE__URL`. Both files are optional so a container can run
    /// on environment variables alone.
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let dir = config_dir.as_ref();

        Config::builder()
            .add_source(File::from(dir.join("default.toml")).required(false))
            .add_source(File::from(dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Reject configurations that would only fail later at runtime.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be nonzero".into());
        }
        if self.database.url.is_empty() {
            return Err("database.url is required".into());
        }
        if self.database.max_connections == 0 {
            return Err("database.max_connections must be nonzero".into());
        }
        if self.database.min_connections > self.database.max_connections {
            return Err("database.min_connections exceeds max_connections".into());
        }
        if self.auth.jwt_secret.is_empty() {
            return Err("auth.jwt_secret is required".into());
        }
        if self.auth.jwt_expiration_hours == 0 {
            return Err("auth.jwt_expiration_hours must be nonzero".into());
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/taskboard".into(),
                max_connections: 10,
                min_connections: 2,
                connect_timeout_seconds: 30,
            },
            auth: AuthConfig {
                jwt_secret: "change-me-in-production".into(),
                jwt_expiration_hours: 24,
            },
            observability: ObservabilityConfig {
                log_level: "info".into(),
                metrics_port: 9090,
            },
        }
    }
}
