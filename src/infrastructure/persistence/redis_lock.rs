//! Redis-backed distributed lock.
//!
//! Acquisition is a single `SET key holder NX PX ttl` round trip, so the
//! test-and-set is atomic on the server. Release is a plain `DEL`.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::distributed_lock::DistributedLock;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::time::Duration;

#[derive(Clone)]
pub struct RedisDistributedLock {
    /// Connection manager for connection pooling and reconnects.
    conn_manager: ConnectionManager,
    holder: String,
}

impl RedisDistributedLock {
    /// Connect to `redis_url` (e.g. `redis://127.0.0.1:6379`).
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the client cannot be created or the first
    /// connection fails.
    pub async fn connect(redis_url: &str, holder: impl Into<String>) -> DomainResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            DomainError::Unavailable(format!("Failed to create Redis client: {e}"))
        })?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            DomainError::Unavailable(format!("Failed to connect to Redis: {e}"))
        })?;

        Ok(Self {
            conn_manager,
            holder: holder.into(),
        })
    }
}

#[async_trait]
impl DistributedLock for RedisDistributedLock {
    async fn try_acquire(&self, key: &str, ttl: Duration) -> DomainResult<bool> {
        let mut conn = self.conn_manager.clone();
        // PX rejects zero
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);

        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(&self.holder)
            .arg("NX")
            .arg("PX")
            .arg(ttl_ms)
            .query_async(&mut conn)
            .await?;

        Ok(reply.is_some())
    }

    async fn release(&self, key: &str) -> DomainResult<()> {
        let mut conn = self.conn_manager.clone();
        let _: i64 = conn.del(key).await?;
        Ok(())
    }
}
