use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl From<ModelError> for BookingError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => BookingError::Validation(msg),
            ModelError::Db(msg) => BookingError::Repository(msg),
        }
    }
}
