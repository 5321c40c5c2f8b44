//! Database module: connection lifecycle, models and schema.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `store.rs`: row-level operations (app provisioning, threads)
//!
//! The pool lives inside a cloneable [`Db`] handle with an explicit
//! `connect`/`close` lifecycle; callers receive it as a parameter instead of
//! reaching for a process-global connection.

mod store;

pub mod models;
pub mod schema;

pub use models::{AppOwner, AppRow, AppUserRow, ThreadRow};
pub use schema::SQLITE_INIT;

use crate::error::AppdockError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

/// Process-scoped database resource.
///
/// Cheap to clone; all clones share one pool.
#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Opens the pool and applies the schema DDL.
    pub async fn connect(database_url: &str) -> Result<Self, AppdockError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

        apply_schema(&pool).await?;

        info!(database_url, "database pool initialized");
        Ok(Self { pool })
    }

    /// Graceful shutdown: waits for in-flight connections to be released.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), AppdockError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
