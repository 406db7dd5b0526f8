//! In-memory port implementations for service unit tests.

use crate::domain::entities::Cinema;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::cinema_repository::CinemaRepository;
use crate::domain::ports::distributed_lock::DistributedLock;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct InMemoryLock {
    keys: Mutex<HashMap<String, Instant>>,
    unreachable: bool,
}

impl InMemoryLock {
    pub fn new() -> Self {
        Self {
            keys: Mutex::new(HashMap::new()),
            unreachable: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::new()
        }
    }

    /// Keys whose TTL has not elapsed.
    pub fn held_keys(&self) -> usize {
        let now = Instant::now();
        self.keys
            .lock()
            .unwrap()
            .values()
            .filter(|expires| **expires > now)
            .count()
    }
}

#[async_trait]
impl DistributedLock for InMemoryLock {
    async fn try_acquire(&self, key: &str, ttl: Duration) -> DomainResult<bool> {
        if self.unreachable {
            return Err(DomainError::Unavailable("connection refused".to_string()));
        }
        let now = Instant::now();
        let mut keys = self.keys.lock().unwrap();
        match keys.get(key) {
            Some(expires) if *expires > now => Ok(false),
            _ => {
                keys.insert(key.to_string(), now + ttl);
                Ok(true)
            }
        }
    }

    async fn release(&self, key: &str) -> DomainResult<()> {
        if self.unreachable {
            return Err(DomainError::Unavailable("connection refused".to_string()));
        }
        self.keys.lock().unwrap().remove(key);
        Ok(())
    }
}

pub struct InMemoryCinemaRepository {
    cinemas: Mutex<HashMap<String, Cinema>>,
    stale: Mutex<HashMap<String, Vec<bool>>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemoryCinemaRepository {
    pub fn new() -> Self {
        Self {
            cinemas: Mutex::new(HashMap::new()),
            stale: Mutex::new(HashMap::new()),
            saves: AtomicUsize::new(0),
            fail_saves: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, seats: &[bool]) -> String {
        let mut cinema = Cinema::new(seats.len().max(1) as i64).unwrap();
        cinema.seats = seats.to_vec();
        let id = cinema.id.clone();
        self.cinemas.lock().unwrap().insert(id.clone(), cinema);
        id
    }

    pub fn seats(&self, id: &str) -> Vec<bool> {
        self.cinemas.lock().unwrap()[id].seats.clone()
    }

    /// The next read of `id` returns `seats` instead of the stored vector,
    /// as if another purchaser saved right after that read.
    pub fn serve_stale_once(&self, id: &str, seats: &[bool]) {
        self.stale
            .lock()
            .unwrap()
            .insert(id.to_string(), seats.to_vec());
    }

    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CinemaRepository for InMemoryCinemaRepository {
    async fn create_cinema(&self, seat_count: i64) -> DomainResult<Cinema> {
        let cinema = Cinema::new(seat_count)?;
        self.cinemas
            .lock()
            .unwrap()
            .insert(cinema.id.clone(), cinema.clone());
        Ok(cinema)
    }

    async fn get_cinema_by_id(&self, id: &str) -> DomainResult<Option<Cinema>> {
        let mut cinema = self.cinemas.lock().unwrap().get(id).cloned();
        if let (Some(cinema), Some(stale)) = (cinema.as_mut(), self.stale.lock().unwrap().remove(id)) {
            cinema.seats = stale;
        }
        Ok(cinema)
    }

    async fn save_cinema(&self, cinema: &Cinema) -> DomainResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Unavailable("disk full".to_string()));
        }
        let mut cinemas = self.cinemas.lock().unwrap();
        let stored = cinemas
            .get_mut(&cinema.id)
            .ok_or_else(|| DomainError::NotFound("Cinema not found".to_string()))?;
        stored.seats = cinema.seats.clone();
        stored.updated_at = cinema.updated_at.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
