//! # Store Errors

use thiserror::Error;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Board not found: {0}")]
    BoardNotFound(Uuid),

    #[error("Page not found: {0}")]
    PageNotFound(Uuid),

    #[error("Element not found: {0}")]
    ElementNotFound(Uuid),

    /// Unique constraint on board ids
    #[error("Board already exists: {0}")]
    DuplicateBoard(Uuid),

    /// Unique constraint on secret values
    #[error("Secret already in use")]
    DuplicateSecret,

    /// A child was inserted under a parent it does not reference
    #[error("{child} does not belong to {parent}")]
    ForeignParent { child: Uuid, parent: Uuid },

    #[error("Lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Whether the error reports a missing record rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::BoardNotFound(_) | StoreError::PageNotFound(_) | StoreError::ElementNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(StoreError::BoardNotFound(Uuid::nil()).is_not_found());
        assert!(StoreError::ElementNotFound(Uuid::nil()).is_not_found());
        assert!(!StoreError::LockPoisoned.is_not_found());
        assert!(!StoreError::DuplicateSecret.is_not_found());
    }
}
