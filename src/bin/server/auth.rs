use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::error::AppError;
use crate::state::AppState;

const TOKEN_INFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verify the caller's bearer token against the external identity endpoint
/// and return the verified email, which serves as the ownership partition
/// key for all collection operations.
pub async fn require_user(state: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::unauthorized("Invalid authentication credentials"))?;

    let response = state
        .http
        .get(TOKEN_INFO_URL)
        .query(&[("id_token", token)])
        .send()
        .await
        .map_err(|e| AppError::unauthorized(format!("Token verification failed: {e}")))?;

    if !response.status().is_success() {
        return Err(AppError::unauthorized("Invalid authentication token"));
    }

    let claims: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::unauthorized(format!("Token verification failed: {e}")))?;

    claims
        .get("email")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| AppError::unauthorized("Token does not contain email"))
}
