pub mod cinemas;
pub mod health;
