//! # Ordering Errors

use thiserror::Error;
use uuid::Uuid;

/// Result type for ordering operations
pub type OrderingResult<T> = Result<T, OrderingError>;

/// Errors raised while repositioning siblings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    /// A batch named an id outside the parent's collection
    #[error("{0} is not a member of this collection")]
    NotMember(Uuid),

    /// The subject of a move is not in the collection
    #[error("{0} not found in collection")]
    SubjectMissing(Uuid),
}
