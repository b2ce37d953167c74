//! # storage-adapters
//!
//! Implementations of the `AdRepository` and `UserRepository` ports.
//! The in-memory stores are always compiled; SQLite sits behind `db-sqlite`.

pub mod memory;

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

pub use memory::{InMemoryAdRepository, InMemoryUserRepository};

#[cfg(feature = "db-sqlite")]
pub use sqlite::{SqliteAdRepository, SqliteUserRepository};
