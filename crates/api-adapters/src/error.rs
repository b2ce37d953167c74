//! # ApiError
//!
//! Maps domain and token failures onto HTTP statuses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{DomainError, TokenCheck};
use thiserror::Error;

use crate::dto::{ErrorResponse, TokenErrorResponse};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Undecodable body, path, or query
    #[error("{0}")]
    BadRequest(String),

    #[error("token rejected: {0:?}")]
    Token(TokenCheck),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Domain(DomainError::AccessDenied(_)) => StatusCode::FORBIDDEN,
            Self::Domain(DomainError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Domain(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Token(TokenCheck::SignatureInvalid) => StatusCode::UNAUTHORIZED,
            Self::Token(TokenCheck::IdentifierMismatch) => StatusCode::FORBIDDEN,
            Self::Token(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Token(check) => {
                let message = match check {
                    TokenCheck::SignatureInvalid => "unauthorized",
                    TokenCheck::IdentifierMismatch => "unmatch",
                    _ => "bad request",
                };
                (status, Json(TokenErrorResponse { message })).into_response()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(error = %other, "request failed");
                }
                let body = ErrorResponse {
                    data: None,
                    error: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
