pub mod cinema_service;
pub mod lock_lease;
pub mod reservation_service;

#[cfg(test)]
pub(crate) mod fakes;

pub use cinema_service::CinemaService;
pub use lock_lease::LockLease;
pub use reservation_service::ReservationService;
