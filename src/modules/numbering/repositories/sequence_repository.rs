use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::core::{Owner, Result};
use crate::modules::numbering::models::DocumentKind;

/// Per-owner, per-kind, per-year counters
#[async_trait]
pub trait SequenceRepository: Send + Sync {
    /// Atomically reserve the next sequence value.
    ///
    /// The first reservation of a year starts after the documents the owner
    /// already created since `year_start`, so numbering continues where a
    /// count-based scheme would have left off.
    async fn next_value(
        &self,
        owner: &Owner,
        kind: DocumentKind,
        year: i32,
        year_start: DateTime<Utc>,
    ) -> Result<u32>;
}

/// MySQL counter table `document_sequences`
pub struct MySqlSequenceRepository {
    pool: MySqlPool,
}

impl MySqlSequenceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceRepository for MySqlSequenceRepository {
    async fn next_value(
        &self,
        owner: &Owner,
        kind: DocumentKind,
        year: i32,
        year_start: DateTime<Utc>,
    ) -> Result<u32> {
        let mut tx = self.pool.begin().await?;

        // The upsert takes the row lock; the read below sees our own increment.
        let upsert = format!(
            r#"
            INSERT INTO document_sequences (owner_id, kind, year, last_value)
            SELECT ?, ?, ?, COUNT(*) + 1 FROM {} WHERE owner_id = ? AND created_at >= ?
            ON DUPLICATE KEY UPDATE last_value = document_sequences.last_value + 1
            "#,
            kind.table()
        );
        sqlx::query(&upsert)
            .bind(owner.storage_key())
            .bind(kind.as_str())
            .bind(year)
            .bind(owner.storage_key())
            .bind(year_start)
            .execute(&mut *tx)
            .await?;

        let value: u32 = sqlx::query_scalar(
            r#"
            SELECT last_value FROM document_sequences
            WHERE owner_id = ? AND kind = ? AND year = ?
            "#,
        )
        .bind(owner.storage_key())
        .bind(kind.as_str())
        .bind(year)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(value)
    }
}
