pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::{CinemaService, ReservationService};
pub use domain::entities::Cinema;
pub use domain::errors::{DomainError, DomainResult};
