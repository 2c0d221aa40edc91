use axum::{extract::State, Json};
use common::errors::AuthError;
use common::models::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handlers::{ErrorResponse, SuccessResponse};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

fn check_registration(req: &RegisterRequest) -> Result<(), ErrorResponse> {
    let invalid = |msg: &str| ErrorResponse::new("validation_error", msg);

    if req.username.trim().is_empty() {
        return Err(invalid("Username is required"));
    }
    if !req.email.contains('@') {
        return Err(invalid("A valid email is required"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(invalid("Password must be at least 8 characters"));
    }
    Ok(())
}

/// Create an account and immediately log it in
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<SuccessResponse<AuthResponse>>, ErrorResponse> {
    check_registration(&req)?;

    let outcome = state
        .auth_service
        .register(&req.username, &req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Registration rejected");
            match e {
                AuthError::EmailAlreadyRegistered => {
                    ErrorResponse::new("conflict", "Email already registered")
                }
                _ => ErrorResponse::new("internal_error", "Registration failed"),
            }
        })?;

    metrics::counter!("http_requests_total", "route" => "register", "status" => "ok")
        .increment(1);

    Ok(Json(SuccessResponse::new(AuthResponse {
        token: outcome.token,
        user: outcome.user.into(),
    })))
}

/// Exchange email and password for a token
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SuccessResponse<AuthResponse>>, ErrorResponse> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ErrorResponse::new(
            "validation_error",
            "Email and password are required",
        ));
    }

    let outcome = state
        .auth_service
        .login(&req.email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Login rejected");
            match e {
                AuthError::InvalidCredentials => {
                    ErrorResponse::new("unauthorized", "Invalid email or password")
                }
                _ => ErrorResponse::new("internal_error", "Authentication failed"),
            }
        })?;

    metrics::counter!("http_requests_total", "route" => "login", "status" => "ok").increment(1);

    Ok(Json(SuccessResponse::new(AuthResponse {
        token: outcome.token,
        user: outcome.user.into(),
    })))
}
