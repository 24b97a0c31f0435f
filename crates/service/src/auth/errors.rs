use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token error: {0}")]
    Token(String),
    #[error("password hash error: {0}")]
    Hash(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable machine-readable code for logs and API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "validation",
            AuthError::EmailTaken => "email_taken",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Token(_) => "token",
            AuthError::Hash(_) => "hash",
            AuthError::Repository(_) => "repository",
        }
    }
}
