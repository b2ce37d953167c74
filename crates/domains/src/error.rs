//! # DomainError
//!
//! Centralized error handling for the adboard ecosystem.
//! Stores and the service speak this type; transports map it to status codes.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Lookup miss: entity name and the key that missed (e.g., `ID 7`)
    #[error("{0} not found: {1}")]
    NotFound(String, String),

    /// Validation failure, duplicate nickname surfaced by the service, malformed input
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Ownership or self-only violation, wrong password
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Resource already exists (e.g., duplicate nickname at the store level)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., database unreachable, token signing failed)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn ad_not_found(id: i64) -> Self {
        Self::NotFound("ad".into(), format!("ID {id}"))
    }

    pub fn user_not_found(id: i64) -> Self {
        Self::NotFound("user".into(), format!("ID {id}"))
    }

    pub fn nickname_not_found(nickname: &str) -> Self {
        Self::NotFound("user".into(), format!("nickname {nickname}"))
    }
}

/// A specialized Result type for adboard logic.
pub type DomainResult<T> = std::result::Result<T, DomainError>;
