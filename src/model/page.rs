//! # Pages

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::ordering::Position;

/// A dated page within a board
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub id: Uuid,

    /// Owning board. Never changes after creation.
    pub board_id: Uuid,

    pub title: String,

    /// User-facing date of the page
    pub date: DateTime<Utc>,

    /// Rank among the board's pages
    pub order_idx: Position,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(board_id: Uuid, title: String, date: DateTime<Utc>, order_idx: Position) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            board_id,
            title,
            date,
            order_idx,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
