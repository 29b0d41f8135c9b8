//! # Response Views
//!
//! Read models returned by the services. Secrets only appear where the
//! caller has proven edit access.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::access::Secret;
use crate::model::{Element, Page, Skin};
use crate::store::BoardDocument;

/// A board as seen by a caller
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub skin: Skin,
    /// Present only for editors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_token: Option<Secret>,
    pub public_token: Secret,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "pageCount")]
    pub page_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Page>,
}

impl BoardView {
    /// Board with its pages in order. The edit secret is included only when
    /// `editor` is set.
    pub fn of(document: &BoardDocument, editor: bool) -> Self {
        let board = document.board();
        Self {
            id: board.id,
            title: board.title.clone(),
            description: board.description.clone(),
            skin: board.skin,
            edit_token: editor.then_some(board.edit_secret),
            public_token: board.public_secret,
            created_at: board.created_at,
            updated_at: board.updated_at,
            page_count: document.page_count(),
            pages: document.pages().into_iter().cloned().collect(),
        }
    }
}

/// Result of creating a board: the only time both links are handed out
#[derive(Debug, Clone, Serialize)]
pub struct CreatedBoard {
    pub board: BoardView,
    pub edit_url: String,
    pub public_url: String,
}

/// A page together with its elements, bottom of the stack first
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    #[serde(flatten)]
    pub page: Page,
    pub elements: Vec<Element>,
}

impl PageView {
    pub fn of(document: &BoardDocument, page: &Page) -> Self {
        Self {
            page: page.clone(),
            elements: document.elements(page.id).into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageList {
    pub pages: Vec<PageView>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ElementList {
    pub elements: Vec<Element>,
    pub total: usize,
}
