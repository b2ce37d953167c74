//! # Ports
//!
//! Any adapter must implement these traits to be wired into the binary.
//! Stores serialize every call behind one exclusive lock per store.

use async_trait::async_trait;

use crate::error::DomainResult;
use crate::models::{Ad, AdFilter, NewAd, NewUser, ProfileUpdate, TokenCheck, User};

/// Persistence contract for advertisements.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AdRepository: Send + Sync {
    /// Assigns the next identifier and sets both timestamps. Performs no validation.
    async fn create(&self, new_ad: NewAd) -> DomainResult<Ad>;
    async fn get(&self, id: i64) -> DomainResult<Ad>;
    async fn update(&self, id: i64, title: &str, text: &str) -> DomainResult<Ad>;
    async fn update_status(&self, id: i64, published: bool) -> DomainResult<Ad>;
    /// Published ads only.
    async fn get_all_ads(&self) -> DomainResult<Vec<Ad>>;
    async fn get_ads(&self, filter: &AdFilter) -> DomainResult<Vec<Ad>>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

/// Persistence contract for users. Nicknames are unique.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the nickname is taken; no identifier is consumed.
    async fn create(&self, new_user: NewUser) -> DomainResult<User>;
    async fn get(&self, id: i64) -> DomainResult<User>;
    async fn get_by_nickname(&self, nickname: &str) -> DomainResult<User>;
    async fn update(&self, id: i64, profile: ProfileUpdate) -> DomainResult<User>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}

/// Issues and checks the signed session tokens handed out at login.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenAuthority: Send + Sync {
    fn issue(&self, user_id: i64) -> DomainResult<String>;

    /// Checks signature, expiry, and that the token was issued for `user_id`.
    fn verify(&self, token: &str, user_id: i64) -> TokenCheck;
}
