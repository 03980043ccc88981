use thiserror::Error;

/// Failure kinds surfaced by the repository and passed through unchanged by
/// the service layer.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found")]
    NotFound,
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
}
