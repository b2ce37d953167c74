use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use domains::TokenCheck;

use crate::error::ApiError;
use crate::handlers::AppState;

/// Reads the raw token from `Authorization` and checks it belongs to
/// `user_id`. A missing header is checked as an empty token.
pub fn authorize(state: &AppState, headers: &HeaderMap, user_id: i64) -> Result<(), ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match state.service.authorize(token, user_id) {
        TokenCheck::Authorized => Ok(()),
        rejected => Err(ApiError::Token(rejected)),
    }
}
