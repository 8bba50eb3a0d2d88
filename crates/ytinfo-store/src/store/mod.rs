//! SQLite-backed settings store.
//!
//! Split into focused submodules:
//! - `guilds`: guild settings CRUD
//! - `users`: per-user overrides and effective settings

mod guilds;
mod users;

use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;
use ytinfo_core::{config::StoreConfig, error::BotError, shellexpand};

/// Persistent settings store backed by SQLite.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the store at the configured path, running migrations on first use.
    pub async fn new(config: &StoreConfig) -> Result<Self, BotError> {
        let db_path = shellexpand(&config.db_path);

        // Ensure parent directory exists.
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BotError::Store(format!("failed to create data dir: {e}")))?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| BotError::Store(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(opts)
            .await
            .map_err(|e| BotError::Store(format!("failed to connect to sqlite: {e}")))?;

        Self::run_migrations(&pool).await?;

        info!("Settings store initialized at {db_path}");

        Ok(Self { pool })
    }

    /// An in-memory store, for tests and dry runs.
    pub async fn in_memory() -> Result<Self, BotError> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| BotError::Store(format!("invalid db path: {e}")))?;

        // One connection: every new in-memory connection is a fresh database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await
            .map_err(|e| BotError::Store(format!("failed to connect to sqlite: {e}")))?;

        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Number of guilds and users with stored settings.
    pub async fn counts(&self) -> Result<(i64, i64), BotError> {
        let (guilds,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM guild_settings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| BotError::Store(format!("count failed: {e}")))?;

        let (users,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_settings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| BotError::Store(format!("count failed: {e}")))?;

        Ok((guilds, users))
    }

    /// Run SQL migrations, tracking which have already been applied.
    async fn run_migrations(pool: &SqlitePool) -> Result<(), BotError> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS _migrations (
                name TEXT PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )
        .execute(pool)
        .await
        .map_err(|e| BotError::Store(format!("failed to create migrations table: {e}")))?;

        let migrations: &[(&str, &str)] = &[
            ("001_init", include_str!("../../migrations/001_init.sql")),
            (
                "002_user_settings",
                include_str!("../../migrations/002_user_settings.sql"),
            ),
        ];

        for (name, sql) in migrations {
            let applied: Option<(String,)> =
                sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                    .bind(name)
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| {
                        BotError::Store(format!("failed to check migration {name}: {e}"))
                    })?;

            if applied.is_some() {
                continue;
            }

            sqlx::raw_sql(sql)
                .execute(pool)
                .await
                .map_err(|e| BotError::Store(format!("migration {name} failed: {e}")))?;

            sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
                .bind(name)
                .execute(pool)
                .await
                .map_err(|e| BotError::Store(format!("failed to record migration {name}: {e}")))?;

            info!("store: applied migration {name}");
        }
        Ok(())
    }
}

/// Parse a column value with `FromStr`, reporting the column on failure.
fn parse_column<T: FromStr<Err = String>>(column: &str, raw: &str) -> Result<T, BotError> {
    raw.parse()
        .map_err(|e| BotError::Store(format!("bad {column} value in store: {e}")))
}

/// Parse SQLite's `datetime('now')` format.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|t| t.and_utc())
}

#[cfg(test)]
mod tests;
