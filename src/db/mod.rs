//! Database connectivity.
//!
//! SYSTEM CONTEXT
//! ==============
//! The shop only needs to know that its MySQL schema is reachable: every page
//! render pings first and shows a connection error page when the ping fails.
//! The pool is created lazily so the server starts even while the database
//! is down; each ping then surfaces the failure.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

use crate::config::DbConfig;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{0}")]
    Unavailable(String),
}

/// Minimal database capability used by the handlers. Enables fakes in tests.
#[async_trait]
pub trait Database: Send + Sync {
    /// Check that a connection can be acquired and answers a query.
    ///
    /// # Errors
    ///
    /// Returns a [`DbError`] describing why the database is unreachable.
    async fn ping(&self) -> Result<(), DbError>;
}

pub struct MySqlDatabase {
    pool: MySqlPool,
}

impl MySqlDatabase {
    /// Build a lazily connecting pool. No connection is attempted until the
    /// first ping.
    #[must_use]
    pub fn connect_lazy(config: &DbConfig) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(config.password.expose_secret())
            .database(&config.name);
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(options);
        Self { pool }
    }
}

#[async_trait]
impl Database for MySqlDatabase {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
