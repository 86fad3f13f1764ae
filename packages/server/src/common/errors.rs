use thiserror::Error;

use super::auth::AuthError;

/// Core error kinds of the membership registry
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Forbidden(#[from] AuthError),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] sqlx::Error),
}
