//! # auth-adapters
//!
//! Implementations of the `TokenAuthority` port.

#[cfg(feature = "auth-jwt")]
pub mod jwt;

#[cfg(feature = "auth-jwt")]
pub use jwt::{default_token_ttl, JwtTokenAuthority};
