use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use std::time::Duration;

/// Named, expiring, non-blocking mutual exclusion shared by every server instance.
#[async_trait]
pub trait DistributedLock: Send + Sync {
    /// Atomically create `key` if it is absent (or its previous holder's TTL elapsed),
    /// expiring after `ttl`. Returns false if someone else holds it.
    ///
    /// An unreachable backend is an `Err`, never `Ok(true)`.
    async fn try_acquire(&self, key: &str, ttl: Duration) -> DomainResult<bool>;

    /// Delete `key` unconditionally. Releasing a key that is not held is a no-op.
    async fn release(&self, key: &str) -> DomainResult<()>;
}
