use thiserror::Error;

/// Errors surfaced by the domain services
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed id, month, year, status or other input; maps to 400
    #[error("{0}")]
    InvalidArgument(String),

    /// Referenced record does not exist; maps to 404
    #[error("{0}")]
    NotFound(String),

    /// The store did not reflect a write we just made; maps to 500
    #[error("{message}")]
    Internal {
        message: String,
        details: Option<String>,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DomainError::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
