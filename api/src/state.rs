use std::sync::Arc;

use common::auth::{AuthService, JwtService};
use common::config::Settings;
use common::db::repositories::{ProjectRepository, TaskRepository, UserRepository};
use common::db::DbPool;
use common::scheduler::SchedulerService;
use metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub config: Arc<Settings>,
    pub jwt_service: JwtService,
    pub auth_service: AuthService,
    pub scheduler_service: SchedulerService,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Create a new AppState instance, wiring services to their repositories
    pub fn new(db_pool: DbPool, config: Settings, metrics_handle: PrometheusHandle) -> Self {
        let jwt_service = JwtService::new(
            &config.auth.jwt_secret,
            config.auth.jwt_expiration_hours,
        );
        let auth_service = AuthService::new(
            jwt_service.clone(),
            UserRepository::new(db_pool.clone()),
        );
        let scheduler_service = SchedulerService::new(
            ProjectRepository::new(db_pool.clone()),
            TaskRepository::new(db_pool.clone()),
        );

        Self {
            db_pool,
            config: Arc::new(config),
            jwt_service,
            auth_service,
            scheduler_service,
            metrics_handle,
        }
    }
}
