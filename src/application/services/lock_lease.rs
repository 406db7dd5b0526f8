use crate::domain::errors::DomainResult;
use crate::domain::ports::distributed_lock::DistributedLock;
use std::sync::Arc;
use std::time::Duration;

/// A held `DistributedLock` key.
///
/// Call [`LockLease::release`] when the critical section ends. A lease dropped
/// without it (panic, cancelled request) schedules the release on the current
/// Tokio runtime; outside a runtime the key is left to its TTL.
pub struct LockLease {
    lock: Arc<dyn DistributedLock>,
    key: String,
    released: bool,
}

impl LockLease {
    /// Returns `Ok(None)` when the key is held by someone else.
    pub async fn try_acquire(
        lock: Arc<dyn DistributedLock>,
        key: String,
        ttl: Duration,
    ) -> DomainResult<Option<Self>> {
        if lock.try_acquire(&key, ttl).await? {
            Ok(Some(Self {
                lock,
                key,
                released: false,
            }))
        } else {
            Ok(None)
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn release(mut self) {
        self.released = true;
        if let Err(e) = self.lock.release(&self.key).await {
            // The TTL reclaims the key eventually
            tracing::warn!(key = %self.key, "Failed to release lock: {}", e);
        }
    }
}

impl Drop for LockLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(key = %self.key, "Lock lease dropped outside a runtime, waiting for TTL");
            return;
        };

        let lock = self.lock.clone();
        let key = std::mem::take(&mut self.key);
        handle.spawn(async move {
            if let Err(e) = lock.release(&key).await {
                tracing::warn!(key = %key, "Failed to release abandoned lock: {}", e);
            } else {
                tracing::debug!(key = %key, "Released abandoned lock");
            }
        });
    }
}
