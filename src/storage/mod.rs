//! Relational storage on SQLite
//!
//! Repositories are free functions taking the active connection explicitly
//! (`&mut SqliteConnection`). A [`Session`] derefs to one, so the same
//! functions run inside or outside a transaction. Nothing in this module
//! commits; that is the caller's job.

pub mod orders;
pub mod pets;

use crate::config::DatabaseConfig;
use anyhow::{Context, Result, anyhow};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use tracing::{debug, info};

/// Scoped transaction; rolls back when dropped without `commit`
pub type Session = Transaction<'static, Sqlite>;

/// Handle on the connection pool
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for the configured URL
    ///
    /// In-memory databases live as long as their connection, so they get a
    /// single connection that is never recycled.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .with_context(|| format!("invalid database url '{}'", config.url))?
            .foreign_keys(true)
            .create_if_missing(true);

        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| anyhow!("Failed to connect to '{}': {}", config.url, e))?;
        info!(url = %config.url, "database pool ready");

        let db = Self { pool };
        if config.create_schema {
            db.ensure_schema().await?;
        }
        Ok(db)
    }

    /// In-memory database with the schema applied
    pub async fn in_memory() -> Result<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the tables and indexes (idempotent)
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS pet (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'available'
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to create pet table: {}", e))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS \"order\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                ship_date TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'placed',
                complete BOOLEAN NOT NULL DEFAULT FALSE
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to create order table: {}", e))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS order_pet (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id INTEGER NOT NULL REFERENCES \"order\" (id) ON DELETE CASCADE,
                pet_id INTEGER NOT NULL REFERENCES pet (id) ON DELETE CASCADE,
                quantity INTEGER NOT NULL DEFAULT 1,
                UNIQUE (order_id, pet_id)
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| anyhow!("Failed to create order_pet table: {}", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_order_pet_pet ON order_pet (pet_id)")
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to create order_pet index: {}", e))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_pet_name ON pet (name, id)")
            .execute(&self.pool)
            .await
            .map_err(|e| anyhow!("Failed to create pet index: {}", e))?;

        debug!("schema ensured");
        Ok(())
    }

    /// Begin a read session
    pub async fn begin(&self) -> Result<Session, sqlx::Error> {
        self.pool.begin().await
    }

    /// Begin a session that takes the write lock up front
    ///
    /// A deferred transaction that reads before writing cannot wait for the
    /// lock when it upgrades; SQLite fails it with `SQLITE_BUSY` instead.
    /// `BEGIN IMMEDIATE` queues behind other writers for the busy timeout.
    pub async fn begin_write(&self) -> Result<Session, sqlx::Error> {
        self.pool.begin_with("BEGIN IMMEDIATE").await
    }
}

/// Map a stored status string back to its enum
fn decode_status<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr<Err = crate::core::entity::UnknownStatus>,
{
    value.parse().map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
