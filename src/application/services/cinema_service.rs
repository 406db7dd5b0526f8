use crate::domain::entities::Cinema;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::cinema_repository::CinemaRepository;
use crate::infrastructure::observability::CINEMAS_CREATED_TOTAL;
use std::sync::Arc;

#[derive(Clone)]
pub struct CinemaService {
    cinema_repo: Arc<dyn CinemaRepository>,
}

impl CinemaService {
    pub fn new(cinema_repo: Arc<dyn CinemaRepository>) -> Self {
        Self { cinema_repo }
    }

    /// Create a cinema with `seat_count` free seats.
    ///
    /// The id is not visible to anyone until this returns, so no lock is taken.
    pub async fn create_cinema(&self, seat_count: i64) -> DomainResult<Cinema> {
        let cinema = self.cinema_repo.create_cinema(seat_count).await?;
        metrics::counter!(CINEMAS_CREATED_TOTAL).increment(1);
        Ok(cinema)
    }

    /// Get a cinema by ID
    pub async fn get_cinema(&self, id: &str) -> DomainResult<Cinema> {
        self.cinema_repo
            .get_cinema_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Cinema not found".to_string()))
    }
}
