//! # Service Errors

use thiserror::Error;

use crate::access::AccessOutcome;
use crate::ordering::OrderingError;
use crate::store::StoreError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced to callers of the journal services
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Subject or parent absent, or a sub-resource outside its parent
    #[error("{0} not found")]
    NotFound(String),

    /// Secret missing or not matching
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A batch named an element outside the page
    #[error("Consistency violation: {0}")]
    ConsistencyViolation(String),

    /// The transaction could not commit
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Unauthorized => 401,
            ServiceError::Validation(_) => 422,
            ServiceError::ConsistencyViolation(_) => 409,
            ServiceError::Storage(_) => 500,
        }
    }

    /// Turn a gate decision into a result
    pub fn check_access(outcome: AccessOutcome) -> ServiceResult<AccessOutcome> {
        match outcome {
            AccessOutcome::EditAuthorized | AccessOutcome::ReadAuthorized => Ok(outcome),
            AccessOutcome::Unauthorized => Err(ServiceError::Unauthorized),
            AccessOutcome::NotFound => Err(ServiceError::NotFound("Board".into())),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BoardNotFound(_) => ServiceError::NotFound("Board".into()),
            StoreError::PageNotFound(_) => ServiceError::NotFound("Page".into()),
            StoreError::ElementNotFound(_) => ServiceError::NotFound("Element".into()),
            StoreError::ForeignParent { .. } => ServiceError::ConsistencyViolation(err.to_string()),
            StoreError::DuplicateBoard(_)
            | StoreError::DuplicateSecret
            | StoreError::LockPoisoned => ServiceError::Storage(err.to_string()),
        }
    }
}

impl From<OrderingError> for ServiceError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::NotMember(_) => ServiceError::ConsistencyViolation(err.to_string()),
            OrderingError::SubjectMissing(_) => ServiceError::NotFound("Page".into()),
        }
    }
}
