use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Lock not acquired. Transient, the caller may retry later.
    #[error("Resource busy: {0}")]
    ResourceBusy(String),
    /// Lock or storage backend unreachable.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Unavailable(format!("Database error: {}", err))
    }
}

impl From<redis::RedisError> for DomainError {
    fn from(err: redis::RedisError) -> Self {
        DomainError::Unavailable(format!("Redis error: {}", err))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
