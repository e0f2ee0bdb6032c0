use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Redis error: {0}")]
    Redis(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<redis::RedisError> for RepositoryError {
    fn from(error: redis::RedisError) -> Self {
        RepositoryError::Redis(error.to_string())
    }
}

impl From<deadpool_redis::PoolError> for RepositoryError {
    fn from(error: deadpool_redis::PoolError) -> Self {
        RepositoryError::Redis(error.to_string())
    }
}
