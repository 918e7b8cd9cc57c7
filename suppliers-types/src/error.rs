//! Error types for the supplier ledger.

use crate::ports::{ExchangeError, MirrorError};

/// Domain-level errors (field validation).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Field {0} is required")]
    MissingField(&'static str),

    #[error("Field {field} {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Exchange rate unavailable: {0}")]
    RateUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => AppError::BadRequest(e.to_string()),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            // Rolled-back writes are reported as a rejected request.
            RepoError::Conflict(e) | RepoError::Database(e) | RepoError::Transaction(e) => {
                AppError::BadRequest(e)
            }
        }
    }
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        AppError::RateUnavailable(err.to_string())
    }
}

impl From<MirrorError> for AppError {
    fn from(err: MirrorError) -> Self {
        AppError::Internal(err.to_string())
    }
}
