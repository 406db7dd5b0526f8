use crate::application::services::lock_lease::LockLease;
use crate::domain::entities::{seat_number, Cinema};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::cinema_repository::CinemaRepository;
use crate::domain::ports::distributed_lock::DistributedLock;
use crate::infrastructure::observability::{LOCK_ACQUISITIONS_TOTAL, SEAT_PURCHASES_TOTAL};
use std::sync::Arc;
use std::time::Duration;

/// Must stay comfortably above the worst-case critical section, or two
/// holders can overlap once the first one's key expires.
pub const DEFAULT_LOCK_TTL: Duration = Duration::from_secs(5);

pub fn seat_lock_key(cinema_id: &str, seat_number: i64) -> String {
    format!("lock:{}:{}", cinema_id, seat_number)
}

pub fn consecutive_lock_key(cinema_id: &str) -> String {
    format!("lock:{}:consecutive", cinema_id)
}

/// Seat purchase engine.
///
/// Each purchase runs lock → re-read → check → save → release. Single-seat
/// purchases lock `lock:<id>:<seat>` while pair purchases lock
/// `lock:<id>:consecutive`, so the two kinds do not exclude each other and a
/// single-seat purchase can race a pair purchase over the same seat.
#[derive(Clone)]
pub struct ReservationService {
    cinema_repo: Arc<dyn CinemaRepository>,
    lock: Arc<dyn DistributedLock>,
    lock_ttl: Duration,
}

impl ReservationService {
    pub fn new(
        cinema_repo: Arc<dyn CinemaRepository>,
        lock: Arc<dyn DistributedLock>,
        lock_ttl: Duration,
    ) -> Self {
        Self {
            cinema_repo,
            lock,
            lock_ttl,
        }
    }

    /// Purchase a specific 1-based seat. Returns the seat number.
    #[tracing::instrument(skip(self), fields(lock_key = tracing::field::Empty))]
    pub async fn purchase_seat(&self, cinema_id: &str, seat: i64) -> DomainResult<i64> {
        let result = self.purchase_seat_inner(cinema_id, seat).await;
        record_outcome("single", &result);
        result
    }

    async fn purchase_seat_inner(&self, cinema_id: &str, seat: i64) -> DomainResult<i64> {
        let cinema = self.load(cinema_id).await?;
        let index = cinema.seat_index(seat)?;
        if cinema.is_purchased(index) {
            return Err(DomainError::Conflict("Seat already purchased".to_string()));
        }

        let lease = self
            .acquire(
                seat_lock_key(cinema_id, seat),
                "Seat is currently being purchased by another request",
            )
            .await?;
        let outcome = self.purchase_under_lock(cinema_id, &[index]).await;
        lease.release().await;

        outcome?;
        tracing::info!(cinema_id = %cinema_id, seat, "Seat purchased");
        Ok(seat)
    }

    /// Purchase the lowest-numbered pair of adjacent free seats.
    #[tracing::instrument(skip(self), fields(lock_key = tracing::field::Empty))]
    pub async fn purchase_consecutive_pair(&self, cinema_id: &str) -> DomainResult<[i64; 2]> {
        let result = self.purchase_consecutive_pair_inner(cinema_id).await;
        record_outcome("consecutive", &result);
        result
    }

    async fn purchase_consecutive_pair_inner(&self, cinema_id: &str) -> DomainResult<[i64; 2]> {
        let cinema = self.load(cinema_id).await?;
        let first = cinema.first_free_pair().ok_or_else(|| {
            DomainError::InvalidArgument("No two consecutive seats available".to_string())
        })?;
        let pair = [first, first + 1];

        let lease = self
            .acquire(
                consecutive_lock_key(cinema_id),
                "Seats are currently being purchased by another request",
            )
            .await?;
        let outcome = self.purchase_under_lock(cinema_id, &pair).await;
        lease.release().await;

        outcome?;
        let seats = [seat_number(pair[0]), seat_number(pair[1])];
        tracing::info!(cinema_id = %cinema_id, ?seats, "Consecutive seats purchased");
        Ok(seats)
    }

    async fn load(&self, cinema_id: &str) -> DomainResult<Cinema> {
        self.cinema_repo
            .get_cinema_by_id(cinema_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Cinema not found".to_string()))
    }

    /// Non-blocking. Contention and an unreachable backend both surface as
    /// `ResourceBusy`.
    async fn acquire(&self, key: String, busy_message: &str) -> DomainResult<LockLease> {
        tracing::Span::current().record("lock_key", key.as_str());
        match LockLease::try_acquire(self.lock.clone(), key.clone(), self.lock_ttl).await {
            Ok(Some(lease)) => {
                metrics::counter!(LOCK_ACQUISITIONS_TOTAL, "outcome" => "acquired").increment(1);
                tracing::debug!(key = %lease.key(), "Lock acquired");
                Ok(lease)
            }
            Ok(None) => {
                metrics::counter!(LOCK_ACQUISITIONS_TOTAL, "outcome" => "contended").increment(1);
                tracing::debug!(key = %key, "Lock held by another request");
                Err(DomainError::ResourceBusy(busy_message.to_string()))
            }
            Err(e) => {
                metrics::counter!(LOCK_ACQUISITIONS_TOTAL, "outcome" => "unavailable")
                    .increment(1);
                tracing::warn!(key = %key, "Lock backend error, failing closed: {}", e);
                Err(DomainError::ResourceBusy(busy_message.to_string()))
            }
        }
    }

    /// Caller must hold the lock covering `indices`. Either every seat is
    /// saved as purchased or nothing is written.
    async fn purchase_under_lock(&self, cinema_id: &str, indices: &[usize]) -> DomainResult<()> {
        // Re-read so the check sees the save of whoever held the key before us
        let mut cinema = self.load(cinema_id).await?;
        cinema.purchase(indices)?;
        self.cinema_repo.save_cinema(&cinema).await
    }
}

fn record_outcome<T>(kind: &'static str, result: &DomainResult<T>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(DomainError::NotFound(_)) => "not_found",
        Err(DomainError::InvalidArgument(_)) => "invalid",
        Err(DomainError::Conflict(_)) => "conflict",
        Err(DomainError::ResourceBusy(_)) => "busy",
        Err(DomainError::Unavailable(_)) => "error",
    };
    metrics::counter!(SEAT_PURCHASES_TOTAL, "kind" => kind, "outcome" => outcome).increment(1);
}
