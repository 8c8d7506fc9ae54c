use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::error::AppError;

/// Shared secret guarding the trigger endpoints. `None` leaves them open.
#[derive(Debug, Clone, Default)]
pub struct TriggerToken(pub Option<String>);

/// Reject requests that do not carry the configured bearer token
pub async fn bearer_token_middleware(
    State(token): State<Arc<TriggerToken>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = token.0.as_deref() else {
        return Ok(next.run(request).await);
    };

    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let Some(provided) = auth_header.strip_prefix("Bearer ") else {
        return Err(AppError::Unauthorized(
            "Invalid authorization format".to_string(),
        ));
    };

    if !token_matches(provided, expected) {
        return Err(AppError::Unauthorized("Invalid trigger token".to_string()));
    }

    Ok(next.run(request).await)
}

fn token_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
