use crate::domain::entities::Cinema;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::cinema_repository::CinemaRepository;
use crate::infrastructure::persistence::Database;
use async_trait::async_trait;
use sqlx::Row;

impl Database {
    // ========== Cinema Operations ==========

    /// Insert a freshly built cinema
    pub async fn insert_cinema(&self, cinema: &Cinema) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO cinemas (id, seats, created_at, updated_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&cinema.id)
        .bind(encode_seats(&cinema.seats)?)
        .bind(&cinema.created_at)
        .bind(&cinema.updated_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            cinema_id = %cinema.id,
            seats = cinema.seat_count(),
            "Cinema created"
        );
        Ok(())
    }

    /// Get cinema by ID
    pub async fn find_cinema(&self, id: &str) -> DomainResult<Option<Cinema>> {
        let row = sqlx::query(
            "SELECT id, seats, created_at, updated_at
             FROM cinemas
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let seats: String = row.try_get("seats")?;
            Ok(Some(Cinema {
                id: row.try_get("id")?,
                seats: decode_seats(&seats)?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Overwrite the whole seat vector
    pub async fn replace_seats(&self, cinema: &Cinema) -> DomainResult<()> {
        let result = sqlx::query(
            "UPDATE cinemas
             SET seats = $1, updated_at = $2
             WHERE id = $3",
        )
        .bind(encode_seats(&cinema.seats)?)
        .bind(&cinema.updated_at)
        .bind(&cinema.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("Cinema not found".to_string()));
        }

        tracing::debug!(cinema_id = %cinema.id, "Seat vector saved");
        Ok(())
    }
}

fn encode_seats(seats: &[bool]) -> DomainResult<String> {
    serde_json::to_string(seats)
        .map_err(|e| DomainError::Unavailable(format!("Failed to encode seats: {}", e)))
}

fn decode_seats(raw: &str) -> DomainResult<Vec<bool>> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::Unavailable(format!("Corrupt seat vector: {}", e)))
}

#[async_trait]
impl CinemaRepository for Database {
    async fn create_cinema(&self, seat_count: i64) -> DomainResult<Cinema> {
        let cinema = Cinema::new(seat_count)?;
        self.insert_cinema(&cinema).await?;
        Ok(cinema)
    }

    async fn get_cinema_by_id(&self, id: &str) -> DomainResult<Option<Cinema>> {
        self.find_cinema(id).await
    }

    async fn save_cinema(&self, cinema: &Cinema) -> DomainResult<()> {
        self.replace_seats(cinema).await
    }
}
