use crate::domain::errors::DomainResult;
use crate::domain::ports::distributed_lock::DistributedLock;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

/// Lock backed by the `distributed_locks` table.
///
/// Every instance pointing at the same database shares the lock namespace.
#[derive(Clone)]
pub struct DatabaseDistributedLock {
    db: Database,
    holder: String,
}

impl DatabaseDistributedLock {
    pub fn new(db: Database, holder: impl Into<String>) -> Self {
        Self {
            db,
            holder: holder.into(),
        }
    }
}

#[async_trait]
impl DistributedLock for DatabaseDistributedLock {
    async fn try_acquire(&self, key: &str, ttl: Duration) -> DomainResult<bool> {
        let now = Utc::now().timestamp_millis();
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at = now.saturating_add(ttl_ms);

        // Insert, or take over a row whose holder let it expire. A live row
        // leaves rows_affected at zero.
        let query = r#"
            INSERT INTO distributed_locks (key, owner, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(key) DO UPDATE SET
                owner = excluded.owner,
                expires_at = excluded.expires_at
            WHERE distributed_locks.expires_at <= $4
        "#;

        let result = sqlx::query(query)
            .bind(key)
            .bind(&self.holder)
            .bind(expires_at)
            .bind(now)
            .execute(&self.db.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn release(&self, key: &str) -> DomainResult<()> {
        sqlx::query("DELETE FROM distributed_locks WHERE key = $1")
            .bind(key)
            .execute(&self.db.pool)
            .await?;
        Ok(())
    }
}
