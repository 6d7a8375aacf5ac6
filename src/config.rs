//! Process configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Read once at startup from the environment (optionally seeded from `.env`
//! by `dotenvy`). Every variable has a default; a value that is present but
//! does not parse is a startup error rather than a silent fallback.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_DB_USER: &str = "root";
const DEFAULT_DB_NAME: &str = "myapp";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 3;
const DEFAULT_STATIC_DIR: &str = "./data";
const DEFAULT_PKG_DIR: &str = "./pkg";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// MySQL connection settings.
#[derive(Debug)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub db: DbConfig,
    pub static_dir: PathBuf,
    pub pkg_dir: PathBuf,
    /// Period of the browser freshness probe; `None` disables it.
    pub update_check_secs: Option<u64>,
}

impl Config {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let text = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());

        let db = DbConfig {
            host: text("DB_HOST", DEFAULT_DB_HOST),
            port: parse_or(get("DB_PORT"), "DB_PORT", DEFAULT_DB_PORT)?,
            user: text("DB_USER", DEFAULT_DB_USER),
            password: SecretString::from(lookup("DB_PASSWORD").unwrap_or_default()),
            name: text("DB_NAME", DEFAULT_DB_NAME),
            max_connections: parse_or(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            acquire_timeout: Duration::from_secs(parse_or(
                get("DB_ACQUIRE_TIMEOUT_SECS"),
                "DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_DB_ACQUIRE_TIMEOUT_SECS,
            )?),
        };

        let update_check_secs: u64 = parse_or(get("UPDATE_CHECK_SECS"), "UPDATE_CHECK_SECS", 0)?;

        Ok(Self {
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            db,
            static_dir: PathBuf::from(text("STATIC_DIR", DEFAULT_STATIC_DIR)),
            pkg_dir: PathBuf::from(text("PKG_DIR", DEFAULT_PKG_DIR)),
            update_check_secs: (update_check_secs > 0).then_some(update_check_secs),
        })
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
