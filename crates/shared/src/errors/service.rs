use crate::{domain::requests::FormErrors, errors::repository::RepositoryError};
use bcrypt::BcryptError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(FormErrors),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Product list is not loaded")]
    NotLoaded,

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] BcryptError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }

    /// Per-field messages when this is a validation failure.
    pub fn field_errors(&self) -> Option<&FormErrors> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
