//! # Document Store
//!
//! Transactional storage for boards, pages and elements.
//!
//! A transaction covers one board document. Everything a logical operation
//! writes (appends, moves, batch reassignments, cascades) happens inside a
//! single [`DocumentStore::update`] call: the closure either returns `Ok`
//! and all of its writes become visible together, or returns `Err` and none
//! of them do.
//!
//! ## Implementations
//!
//! - [`InMemoryDocumentStore`]: per-board locking, copy-on-write commits.

mod document;
mod errors;
mod memory;

pub use document::{BoardDocument, ElementSiblings, PageSiblings};
pub use errors::{StoreError, StoreResult};
pub use memory::InMemoryDocumentStore;

use uuid::Uuid;

use crate::access::Secret;
use crate::model::Board;

/// Abstract interface for board storage.
///
/// Implementations must make each `update` atomic and isolated from every
/// other transaction on the same board.
pub trait DocumentStore: Send + Sync {
    /// Insert a new board with no pages.
    ///
    /// Fails with `DuplicateSecret` if either secret is already in use.
    fn insert_board(&self, board: Board) -> StoreResult<()>;

    /// Id of the board holding `secret` (edit or public)
    fn find_board_by_secret(&self, secret: &Secret) -> StoreResult<Option<Uuid>>;

    /// Read a committed board document. `None` when the board is absent.
    fn view<T, F>(&self, board_id: Uuid, f: F) -> StoreResult<T>
    where
        F: FnOnce(Option<&BoardDocument>) -> T;

    /// Run a read-modify-write transaction on one board.
    ///
    /// The closure receives `None` when the board is absent. Writes are
    /// published only when it returns `Ok`.
    fn update<T, E, F>(&self, board_id: Uuid, f: F) -> Result<T, E>
    where
        F: FnOnce(Option<&mut BoardDocument>) -> Result<T, E>,
        E: From<StoreError>;

    /// Number of stored boards
    fn board_count(&self) -> StoreResult<usize>;

    /// Check that the store is usable
    fn ping(&self) -> StoreResult<()> {
        self.board_count().map(|_| ())
    }
}
