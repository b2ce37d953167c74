//! # api-adapters
//!
//! HTTP surface of the board, served under `/api/v1`.
//!
//! The axum router lives behind the `web-axum` feature; the wire DTOs do not
//! depend on any web framework.

pub mod dto;

#[cfg(feature = "web-axum")]
pub mod auth;
#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
mod router;

#[cfg(feature = "web-axum")]
pub use error::ApiError;
#[cfg(feature = "web-axum")]
pub use handlers::AppState;
#[cfg(feature = "web-axum")]
pub use router::router;
