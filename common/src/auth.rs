// Authentication: JWT issuance/validation and credential handling

use crate::db::repositories::user::UserRepository;
use crate::errors::{AuthError, DatabaseError};
use crate::models::{User, UserClaims};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Issues and checks HS256 tokens. Cloning shares the keys.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    expiration_hours: i64,
}

impl JwtService {
    pub fn new(secret: &str, expiration_hours: u64) -> Self {
        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            expiration_hours: expiration_hours as i64,
        }
    }

    /// Issue a token whose subject is the user's id.
    pub fn encode_token(&self, user_id: &str, username: &str) -> Result<String, AuthError> {
        let issued_at = Utc::now();
        let claims = UserClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: (issued_at + Duration::hours(self.expiration_hours)).timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::AuthenticationFailed(format!("Token encoding failed: {}", e)))
    }

    /// Check signature and expiry, returning the embedded claims.
    ///
    /// Expiry is reported as its own variant so callers can distinguish a
    /// stale session from a forged or corrupted token.
    pub fn decode_token(&self, token: &str) -> Result<UserClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<UserClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })
    }

    pub fn validate_token(&self, token: &str) -> Result<UserClaims, AuthError> {
        self.decode_token(token)
    }
}

/// Result of a successful registration or login
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub token: String,
    pub user: User,
}

/// Registration and credential login over the user repository. Email is the
/// login identity; passwords are stored bcrypt-hashed.
#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    user_repository: Arc<UserRepository>,
}

impl AuthService {
    pub fn new(jwt_service: JwtService, user_repository: UserRepository) -> Self {
        Self {
            jwt_service,
            user_repository: Arc::new(user_repository),
        }
    }

    fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        self.jwt_service
            .encode_token(&user.id.to_string(), &user.username)
    }

    /// Create an account and log it in.
    ///
    /// The email uniqueness pre-check keeps the common case friendly; the
    /// unique index backs it up when two registrations race, and that
    /// duplicate-key error maps to the same `EmailAlreadyRegistered`.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, AuthError> {
        let existing = self
            .user_repository
            .find_by_email(email)
            .await
            .map_err(db_failure)?;
        if existing.is_some() {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| AuthError::AuthenticationFailed(format!("Hashing failed: {}", e)))?;

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        };

        self.user_repository.create(&user).await.map_err(|e| match e {
            DatabaseError::DuplicateKey(_) => AuthError::EmailAlreadyRegistered,
            other => db_failure(other),
        })?;

        let token = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(AuthOutcome { token, user })
    }

    /// Verify email/password and issue a fresh token.
    ///
    /// An unknown email and a wrong password both surface as
    /// `InvalidCredentials`; the response must not reveal which.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await
            .map_err(db_failure)?
            .ok_or(AuthError::InvalidCredentials)?;

        let verified = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AuthError::AuthenticationFailed(format!("Verification failed: {}", e)))?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthOutcome { token, user })
    }
}

fn db_failure(e: DatabaseError) -> AuthError {
    tracing::error!(error = %e, "Database failure in auth flow");
    AuthError::AuthenticationFailed(format!("Database error: {}", e))
}
