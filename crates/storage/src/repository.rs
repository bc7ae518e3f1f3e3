//! Repository Implementation

use crate::StorageError;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

/// One dated electricity consumption reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConsumptionRecord {
    pub id: i64,
    /// ISO 8601 calendar date, stored as supplied by the caller
    pub date: String,
    /// Units consumed in the period ending on `date`
    pub consumption: f64,
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS consumption (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    consumption REAL NOT NULL
)";

/// Repository for consumption readings, backed by SQLite.
///
/// Append-only: no update or delete operation exists. Rows are read back in
/// ascending date order for display and descending order for prediction.
#[derive(Clone)]
pub struct ConsumptionStore {
    pool: SqlitePool,
}

impl ConsumptionStore {
    /// Open (creating if missing) the database at `path` and ensure the
    /// schema exists.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at {}", path.as_ref().display());
        Self::with_pool(pool).await
    }

    /// Single-connection in-memory database, for tests.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new().filename(":memory:");

        // One connection only: each in-memory connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Insert a reading. Single-statement, durable; returns the assigned id.
    pub async fn append(&self, date: &str, consumption: f64) -> Result<i64, StorageError> {
        let result = sqlx::query("INSERT INTO consumption (date, consumption) VALUES (?, ?)")
            .bind(date)
            .bind(consumption)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted consumption record with ID {}", id);
        Ok(id)
    }

    /// All readings, ascending by date. No pagination; the whole table.
    pub async fn list_all(&self) -> Result<Vec<ConsumptionRecord>, StorageError> {
        let records = sqlx::query_as::<_, ConsumptionRecord>(
            "SELECT id, date, consumption FROM consumption ORDER BY date",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// The most recent readings, descending by date, at most `limit` rows.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<ConsumptionRecord>, StorageError> {
        let records = sqlx::query_as::<_, ConsumptionRecord>(
            "SELECT id, date, consumption FROM consumption ORDER BY date DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Total number of stored readings
    pub async fn record_count(&self) -> Result<i64, StorageError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM consumption")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
