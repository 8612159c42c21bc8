use std::env;
use std::fmt::Display;
use std::str::FromStr;

use lifeflow_core::store::PoolSettings;
use lifeflow_core::user::PasswordMode;

/// Origin allowed when `ALLOWED_ORIGINS` is unset (the local front-end dev server).
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key}='{value}' is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Store connection string: `postgres://...` or `memory://`.
    pub database_url: String,
    /// Maximum database connections in the pool.
    pub db_max_connections: u32,
    /// Minimum database connections in the pool.
    pub db_min_connections: u32,
    /// Origins allowed for cross-origin requests. `*` allows any.
    pub allowed_origins: Vec<String>,
    /// How user passwords are stored and compared.
    pub password_mode: PasswordMode,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "PORT", 8080)?,
            database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 20)?,
            db_min_connections: parse_or(&get, "DB_MIN_CONNECTIONS", 5)?,
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_string()]),
            password_mode: parse_or(&get, "PASSWORD_MODE", PasswordMode::default())?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            min_connections: self.db_min_connections,
        }
    }
}

fn parse_or<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match get(key) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
