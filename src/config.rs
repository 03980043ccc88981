//! Runtime configuration read from the process environment.
//!
//! `main` loads a `.env` file first (via `dotenvy`), so every key below can
//! live there as well.

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub app: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub timezone: String,
    pub pool_size: u32,
    /// When set, used verbatim instead of the assembled connection string.
    pub url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            app: ServerConfig {
                host: text("APP_HOST", "0.0.0.0"),
                port: number(&lookup, "APP_PORT", 8080)?,
            },
            database: DatabaseConfig {
                host: text("DATABASE_HOST", "localhost"),
                port: number(&lookup, "DATABASE_PORT", 5432)?,
                user: text("DATABASE_USER", "postgres"),
                password: text("DATABASE_PASSWORD", ""),
                name: text("DATABASE_NAME", "postgres"),
                ssl_mode: text("DATABASE_SSLMODE", "disable"),
                timezone: text("DATABASE_TIMEZONE", "UTC"),
                pool_size: number(&lookup, "DATABASE_POOL_SIZE", 10)?,
                url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            },
        })
    }
}

impl DatabaseConfig {
    /// libpq keyword/value connection string.
    pub fn connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        format!(
            "host={} port={} user={} password={} dbname={} sslmode={} options={}",
            quote(&self.host),
            self.port,
            quote(&self.user),
            quote(&self.password),
            quote(&self.name),
            quote(&self.ssl_mode),
            quote(&format!("-c TimeZone={}", self.timezone)),
        )
    }
}

fn number<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

// libpq values are single-quoted with backslash escapes.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}
