//! Service configuration.
//!
//! Library code never reads the environment on its own: a [`Config`] is built
//! once (usually with [`Config::from_env`]) and passed to constructors.
//! [`Config::from_lookup`] accepts any key lookup so tests can supply values
//! without touching process state.

use crate::error::{BoxError, ConfigError};

pub const ENV_API_KEY: &str = "GEMINI_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_MONGODB_URI: &str = "MONGODB_URI";
pub const ENV_MONGODB_USER: &str = "MONGODB_USER";
pub const ENV_MONGODB_PASS: &str = "MONGODB_PASS";
pub const ENV_MONGODB_DB: &str = "MONGODB_DB";
pub const ENV_HOST: &str = "APP_HOST";
pub const ENV_PORT: &str = "APP_PORT";

pub const DEFAULT_MODEL: &str = "models/gemini-2.5-flash";
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_MONGODB_DB: &str = "kid_book_db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Document store connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub uri: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: String,
}

/// Everything the service needs from its deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API key for the vision model. Required.
    pub api_key: String,
    pub model: String,
    pub store: StoreConfig,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    ///
    /// ```
    /// use persona_service::Config;
    ///
    /// let config = Config::from_lookup(|key| match key {
    ///     "GEMINI_KEY" => Some("secret".to_string()),
    ///     "APP_PORT" => Some("9000".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.port, 9000);
    /// assert_eq!(config.store.database, "kid_book_db");
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let port = match get(ENV_PORT) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: ENV_PORT,
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            store: StoreConfig {
                uri: get(ENV_MONGODB_URI).unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
                user: get(ENV_MONGODB_USER),
                password: get(ENV_MONGODB_PASS),
                database: get(ENV_MONGODB_DB).unwrap_or_else(|| DEFAULT_MONGODB_DB.to_string()),
            },
            host: get(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// `host:port` for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A collaborator that can be built from deployment settings.
///
/// Model clients read the API key and model name, stores read
/// [`Config::store`].
pub trait FromConfig: Sized {
    fn from_config(config: &Config) -> Result<Self, BoxError>;
}
