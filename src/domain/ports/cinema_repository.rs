use crate::domain::entities::Cinema;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Durable mapping from cinema id to its seat vector.
///
/// The store does no locking of its own. `save` overwrites the whole vector,
/// so any caller mutating seats must hold the matching `DistributedLock` key
/// across its read-modify-write, or it silently loses concurrent edits.
#[async_trait]
pub trait CinemaRepository: Send + Sync {
    /// Persist a new cinema with `seat_count` free seats.
    async fn create_cinema(&self, seat_count: i64) -> DomainResult<Cinema>;

    async fn get_cinema_by_id(&self, id: &str) -> DomainResult<Option<Cinema>>;

    /// Replace the persisted seat vector. Last writer wins.
    async fn save_cinema(&self, cinema: &Cinema) -> DomainResult<()>;
}
