// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Transaction aborted by the engine (serialization failure, deadlock).
    /// Safe for the caller to retry.
    #[error("transaction aborted: {0}")]
    Aborted(String),
    #[error("persistence error: {0}")]
    Persistence(String),
}
