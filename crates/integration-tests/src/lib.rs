//! Shared fixtures for the cross-crate tests.
//!
//! Every scenario runs once per storage backend.

use std::sync::Arc;

use auth_adapters::{default_token_ttl, JwtTokenAuthority};
use domains::{AdRepository, NewAd, NewUser, UserRepository};
use services::BoardService;
use storage_adapters::{
    InMemoryAdRepository, InMemoryUserRepository, SqliteAdRepository, SqliteUserRepository,
};

pub const SIGNING_KEY: &[u8] = b"integration-signing-key";

#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Memory,
    Sqlite,
}

pub const BACKENDS: [Backend; 2] = [Backend::Memory, Backend::Sqlite];

pub async fn ad_store(backend: Backend) -> Arc<dyn AdRepository> {
    match backend {
        Backend::Memory => Arc::new(InMemoryAdRepository::new()),
        Backend::Sqlite => Arc::new(
            SqliteAdRepository::connect("sqlite::memory:")
                .await
                .expect("in-memory sqlite ads store"),
        ),
    }
}

pub async fn user_store(backend: Backend) -> Arc<dyn UserRepository> {
    match backend {
        Backend::Memory => Arc::new(InMemoryUserRepository::new()),
        Backend::Sqlite => Arc::new(
            SqliteUserRepository::connect("sqlite::memory:")
                .await
                .expect("in-memory sqlite users store"),
        ),
    }
}

pub fn token_authority() -> Arc<JwtTokenAuthority> {
    Arc::new(JwtTokenAuthority::new(SIGNING_KEY, default_token_ttl()))
}

pub async fn board(backend: Backend) -> BoardService {
    BoardService::new(
        ad_store(backend).await,
        user_store(backend).await,
        token_authority(),
    )
}

pub fn new_user(nickname: &str) -> NewUser {
    NewUser {
        first_name: "Timur".into(),
        second_name: "Zykov".into(),
        nickname: nickname.into(),
        password: "abacaba".into(),
        email: "e@x.com".into(),
        phone: "123".into(),
    }
}

pub fn new_ad(title: &str, author_id: i64) -> NewAd {
    NewAd {
        title: title.into(),
        text: "world".into(),
        author_id,
        published: false,
    }
}
