use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::state::AppState;

/// Health check endpoint: verifies the database connection is alive
#[tracing::instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db_pool.health_check().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}
