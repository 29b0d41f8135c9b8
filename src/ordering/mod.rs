//! # Ordering
//!
//! Positional ordering for sibling collections: pages under a board
//! (`order_idx`) and elements under a page (`z`).
//!
//! ## Invariants
//! - Append never collides with an existing position
//! - After a move the collection's positions are exactly `{0..n-1}`
//! - A batch either applies completely or writes nothing

mod engine;
mod errors;

pub use engine::{
    assign_append_position, batch_assign_positions, is_dense, move_position, plan_move,
};
pub use errors::{OrderingError, OrderingResult};

use serde::Serialize;
use uuid::Uuid;

/// An order key (`order_idx` for pages, `z` for elements)
pub type Position = i64;

/// One position write produced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionUpdate {
    pub id: Uuid,
    pub position: Position,
}

/// A set of siblings under one parent, seen through an open transaction.
pub trait SiblingCollection {
    /// Every member with its current position, in no particular order
    fn positions(&self) -> Vec<(Uuid, Position)>;

    /// Overwrite one member's position
    fn set_position(&mut self, id: Uuid, position: Position) -> OrderingResult<()>;
}
