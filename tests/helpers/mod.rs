#![allow(dead_code)]

pub mod test_db;

use cinema_seats::application::services::{CinemaService, ReservationService};
use cinema_seats::domain::ports::distributed_lock::DistributedLock;
use cinema_seats::infrastructure::persistence::{Database, DatabaseDistributedLock};
use std::sync::Arc;
use std::time::Duration;

pub const TEST_LOCK_TTL: Duration = Duration::from_secs(5);

pub struct TestServices {
    pub db: Database,
    pub lock: Arc<dyn DistributedLock>,
    pub cinemas: CinemaService,
    pub reservations: ReservationService,
}

/// Services wired the way the server wires them, on a fresh database.
pub async fn setup_services() -> TestServices {
    let db = test_db::setup_test_db().await;
    let lock: Arc<dyn DistributedLock> =
        Arc::new(DatabaseDistributedLock::new(db.clone(), "test-instance"));
    let state = cinema_seats::bootstrap::build_app_state(db.clone(), lock.clone(), TEST_LOCK_TTL);

    TestServices {
        db,
        lock,
        cinemas: state.cinema_service,
        reservations: state.reservation_service,
    }
}

/// Force a seat vector into the store, bypassing the engine.
pub async fn set_seats(db: &Database, cinema_id: &str, seats: &[bool]) {
    use cinema_seats::domain::ports::cinema_repository::CinemaRepository;

    let mut cinema = db
        .get_cinema_by_id(cinema_id)
        .await
        .expect("Failed to load cinema")
        .expect("Cinema missing");
    cinema.seats = seats.to_vec();
    db.save_cinema(&cinema).await.expect("Failed to save seats");
}
