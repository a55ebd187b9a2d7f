//! SqliteMessageStore - SQLite-backed message records

use super::traits::MessageStore;
use crate::error::{Error, Result};
use crate::record::{iso_millis, MessageRecord};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Check that `table` is a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`).
///
/// Table names are interpolated into statements, so nothing else is accepted.
///
/// # Errors
/// Returns [`Error::InvalidTableName`] otherwise.
pub fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidTableName(table.to_string()))
    }
}

/// Message store persisting records to a SQLite table
#[derive(Clone)]
pub struct SqliteMessageStore {
    pool: SqlitePool,
    table: String,
}

impl SqliteMessageStore {
    /// Open (or create) the database at `db_path` and ensure `table` exists
    pub async fn from_path(db_path: &Path, table: &str) -> Result<Self> {
        validate_table_name(table)?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Database(format!("failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.run_migrations().await?;

        info!(table = %table, "SQLite message store initialized at {}", db_path.display());
        Ok(store)
    }

    /// Create a new in-memory store (for testing)
    pub async fn in_memory(table: &str) -> Result<Self> {
        validate_table_name(table)?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let store = Self {
            pool,
            table: table.to_string(),
        };
        store.run_migrations().await?;

        debug!("In-memory SQLite message store initialized");
        Ok(store)
    }

    /// Table the records are written to
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                sender TEXT NOT NULL,
                recipient TEXT NOT NULL,
                content TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
            self.table
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_record(row: SqliteRow) -> Result<MessageRecord> {
        let id_str: String = row.get("id");
        let timestamp_str: String = row.get("timestamp");

        let id = Uuid::parse_str(&id_str)
            .map_err(|e| Error::Serialization(format!("invalid uuid: {e}")))?;
        let timestamp = iso_millis::parse(&timestamp_str)
            .map_err(|e| Error::Serialization(format!("invalid timestamp: {e}")))?;

        Ok(MessageRecord {
            id,
            sender: row.get("sender"),
            recipient: row.get("recipient"),
            content: row.get("content"),
            timestamp,
        })
    }
}

#[async_trait::async_trait]
impl MessageStore for SqliteMessageStore {
    #[instrument(skip(self, record), fields(id = %record.id, table = %self.table))]
    async fn put(&self, record: &MessageRecord) -> Result<()> {
        sqlx::query(&format!(
            "INSERT INTO {} (id, sender, recipient, content, timestamp) VALUES (?1, ?2, ?3, ?4, ?5)",
            self.table
        ))
        .bind(record.id.to_string())
        .bind(&record.sender)
        .bind(&record.recipient)
        .bind(&record.content)
        .bind(record.timestamp_iso())
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        debug!("Stored message record");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<Option<MessageRecord>> {
        let row = sqlx::query(&format!(
            "SELECT id, sender, recipient, content, timestamp FROM {} WHERE id = ?1",
            self.table
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::row_to_record).transpose()
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
