use axum::{
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Pull the token out of an `Authorization: Bearer <token>` header value.
fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Middleware guarding the protected routes.
///
/// Validates the bearer token against the shared `JwtService` and stashes
/// the decoded `UserClaims` in the request extensions, where handlers pick
/// them up via `Extension<UserClaims>`. Any failure is a bare 401; the
/// response body never says whether the header, signature, or expiry was
/// at fault.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            tracing::debug!("Missing or malformed authorization header");
            StatusCode::UNAUTHORIZED
        })?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
