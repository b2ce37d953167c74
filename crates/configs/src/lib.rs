//! # configs
//!
//! Layered runtime settings. Later sources win:
//!
//! 1. built-in defaults
//! 2. `config/adboard.{toml,yaml,json}` (optional)
//! 3. `ADBOARD__SECTION__KEY` environment variables (after `.env` is loaded)
//! 4. legacy variables `DB_URI_ADS`, `DB_URI_USERS`, `AUTH_SIGNING_KEY`

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Signing key used when nothing else is configured. Fine for local runs only.
pub const DEV_SIGNING_KEY: &str = "adboard-dev-signing-key";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to read .env: {0}")]
    DotEnv(#[from] dotenvy::Error),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// SQLite URL of the ads database
    pub ads_url: String,
    /// SQLite URL of the users database
    pub users_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    #[serde(deserialize_with = "secret_string")]
    pub signing_key: SecretString,
    pub token_ttl_secs: u64,
}

impl AuthSettings {
    pub fn uses_dev_signing_key(&self) -> bool {
        self.signing_key.expose_secret() == DEV_SIGNING_KEY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set.
    pub filter: String,
    pub format: LogFormat,
}

fn accept_missing_dotenv(result: Result<PathBuf, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl Settings {
    /// Loads `.env`, then every source in precedence order. A missing
    /// `.env` is fine; an unreadable one is an error.
    pub fn load() -> Result<Self, ConfigError> {
        accept_missing_dotenv(dotenvy::dotenv())?;

        let env = std::env::vars().collect::<HashMap<_, _>>();
        Self::from_builder(Self::layered(&env)?)
    }

    /// Every source after the defaults, reading the environment from `env`
    /// rather than the process.
    pub fn layered(
        env: &HashMap<String, String>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let lookup = |key: &str| env.get(key).cloned();
        Ok(Self::defaults()?
            .add_source(File::with_name("config/adboard").required(false))
            .add_source(
                Environment::with_prefix("ADBOARD")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(env.clone())),
            )
            .set_override_option("storage.ads_url", lookup("DB_URI_ADS"))?
            .set_override_option("storage.users_url", lookup("DB_URI_USERS"))?
            .set_override_option("auth.signing_key", lookup("AUTH_SIGNING_KEY"))?)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("storage.backend", "sqlite")?
            .set_default("storage.ads_url", "sqlite://ads.db")?
            .set_default("storage.users_url", "sqlite://users.db")?
            .set_default("auth.signing_key", DEV_SIGNING_KEY)?
            .set_default("auth.token_ttl_secs", 300_i64)?
            .set_default("log.filter", "info,sqlx=warn")?
            .set_default("log.format", "pretty")?)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "auth.token_ttl_secs must be positive".into(),
            ));
        }
        if self.auth.signing_key.expose_secret().is_empty() {
            return Err(ConfigError::Invalid("auth.signing_key is empty".into()));
        }
        Ok(())
    }
}
