//! # SQLite Stores
//!
//! Data mapping between single-table SQLite schemas and the `domains` models.
//! Each store owns one pool and creates its table on connect.

mod ads;
mod users;

pub use ads::SqliteAdRepository;
pub use users::SqliteUserRepository;

use std::str::FromStr;

use domains::DomainError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Opens a single-connection pool. The store lock already serializes access,
/// and one long-lived connection keeps `sqlite::memory:` databases alive.
pub(crate) async fn open_pool(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub(crate) fn storage_err(err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "sqlite operation failed");
    DomainError::Internal(err.to_string())
}
