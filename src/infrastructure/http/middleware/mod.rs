pub mod error;

pub use error::{ApiError, ApiResult};

use crate::application::services::{CinemaService, ReservationService};

#[derive(Clone)]
pub struct AppState {
    pub cinema_service: CinemaService,
    pub reservation_service: ReservationService,
}
