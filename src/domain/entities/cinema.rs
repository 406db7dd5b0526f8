use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Largest seat count a cinema may be created with.
pub const MAX_SEATS: i64 = 50_000;

/// A seating layout with a fixed number of seats.
///
/// `seats[i]` holds the state of externally numbered seat `i + 1`;
/// `true` means purchased. The length never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cinema {
    pub id: String,
    pub seats: Vec<bool>,
    pub created_at: String,
    pub updated_at: String,
}

impl Cinema {
    /// Build a new cinema with `seat_count` free seats and a fresh identifier.
    pub fn new(seat_count: i64) -> DomainResult<Self> {
        if seat_count <= 0 {
            return Err(DomainError::InvalidArgument(
                "Seat count must be greater than zero".to_string(),
            ));
        }
        if seat_count > MAX_SEATS {
            return Err(DomainError::InvalidArgument(format!(
                "Seat count must not exceed {}",
                MAX_SEATS
            )));
        }
        let seat_count = usize::try_from(seat_count).map_err(|_| {
            DomainError::InvalidArgument("Seat count is too large".to_string())
        })?;

        let now = chrono::Utc::now().to_rfc3339();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            seats: vec![false; seat_count],
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Map a 1-based seat number onto the internal index.
    pub fn seat_index(&self, seat_number: i64) -> DomainResult<usize> {
        usize::try_from(seat_number)
            .ok()
            .filter(|n| (1..=self.seats.len()).contains(n))
            .map(|n| n - 1)
            .ok_or_else(|| DomainError::InvalidArgument("Invalid seat number".to_string()))
    }

    pub fn is_purchased(&self, index: usize) -> bool {
        self.seats.get(index).copied().unwrap_or(false)
    }

    /// Lowest index `i` such that seats `i` and `i + 1` are both free.
    pub fn first_free_pair(&self) -> Option<usize> {
        self.seats
            .windows(2)
            .position(|pair| !pair[0] && !pair[1])
    }

    /// Flip every given seat to purchased, or none of them.
    ///
    /// Fails with `Conflict` if any seat is already taken.
    pub fn purchase(&mut self, indices: &[usize]) -> DomainResult<()> {
        if indices.iter().any(|&i| i >= self.seats.len()) {
            return Err(DomainError::InvalidArgument(
                "Invalid seat number".to_string(),
            ));
        }
        if indices.iter().any(|&i| self.seats[i]) {
            return Err(DomainError::Conflict("Seat already purchased".to_string()));
        }

        for &i in indices {
            self.seats[i] = true;
        }
        self.updated_at = chrono::Utc::now().to_rfc3339();
        Ok(())
    }
}

/// Convert a 0-based index back to the external seat number.
pub fn seat_number(index: usize) -> i64 {
    index as i64 + 1
}

#[derive(Debug, Deserialize)]
pub struct CreateCinemaRequest {
    pub seats: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCinemaResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSeatRequest {
    pub seat_number: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseSeatResponse {
    pub seat: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsecutivePurchaseResponse {
    pub seats: [i64; 2],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CinemaResponse {
    pub id: String,
    pub seats: Vec<bool>,
}

impl From<Cinema> for CinemaResponse {
    fn from(cinema: Cinema) -> Self {
        Self {
            id: cinema.id,
            seats: cinema.seats,
        }
    }
}
