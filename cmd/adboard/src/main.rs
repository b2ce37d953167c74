//! # adboard
//!
//! Assembles the stores, token authority and HTTP router from `Settings`
//! and serves until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, AppState};
use auth_adapters::JwtTokenAuthority;
use configs::{LogFormat, LogSettings, Settings, StorageBackend, StorageSettings};
use domains::{AdRepository, UserRepository};
use secrecy::ExposeSecret;
use services::BoardService;
use storage_adapters::{InMemoryAdRepository, InMemoryUserRepository};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "db-sqlite")]
use storage_adapters::{SqliteAdRepository, SqliteUserRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log);

    if settings.auth.uses_dev_signing_key() {
        tracing::warn!("using the built-in development signing key; set AUTH_SIGNING_KEY");
    }

    let (ads, users) = build_stores(&settings.storage).await?;
    let tokens = JwtTokenAuthority::new(
        settings.auth.signing_key.expose_secret().as_bytes(),
        chrono::Duration::seconds(i64::try_from(settings.auth.token_ttl_secs)?),
    );
    let service = BoardService::new(ads, users, Arc::new(tokens));
    let app = router(AppState::new(service));

    let addr = settings.server.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, backend = ?settings.storage.backend, "adboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    tracing::info!("adboard stopped");
    Ok(())
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn build_stores(
    storage: &StorageSettings,
) -> anyhow::Result<(Arc<dyn AdRepository>, Arc<dyn UserRepository>)> {
    match storage.backend {
        StorageBackend::Memory => Ok((
            Arc::new(InMemoryAdRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
        )),
        #[cfg(feature = "db-sqlite")]
        StorageBackend::Sqlite => {
            let ads = SqliteAdRepository::connect(&storage.ads_url)
                .await
                .with_context(|| format!("opening ads database {}", storage.ads_url))?;
            let users = SqliteUserRepository::connect(&storage.users_url)
                .await
                .with_context(|| format!("opening users database {}", storage.users_url))?;
            Ok((Arc::new(ads), Arc::new(users)))
        }
        #[cfg(not(feature = "db-sqlite"))]
        StorageBackend::Sqlite => {
            anyhow::bail!("storage.backend = \"sqlite\" needs the db-sqlite feature")
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
