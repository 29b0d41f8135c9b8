//! # Board Service

use serde::Deserialize;
use uuid::Uuid;

use crate::access::{verify, Access, Secret, Verdict};
use crate::model::{Board, Skin};
use crate::observability::{log_event, Event};
use crate::store::DocumentStore;

use super::errors::{ServiceError, ServiceResult};
use super::views::{BoardView, CreatedBoard};
use super::Journal;

/// Input for a new board
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to `default` when absent or empty
    #[serde(default)]
    pub skin: Option<String>,
}

impl BoardDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Partial board update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skin: Option<String>,
}

pub struct BoardService<'a, S: DocumentStore> {
    journal: &'a Journal<S>,
}

impl<'a, S: DocumentStore> BoardService<'a, S> {
    pub(super) fn new(journal: &'a Journal<S>) -> Self {
        Self { journal }
    }

    /// Create a board with fresh secrets and hand back both access links
    pub fn create(&self, draft: BoardDraft) -> ServiceResult<CreatedBoard> {
        let validator = &self.journal.validator;
        validator.board_title(&draft.title)?;
        validator.description(&draft.description)?;
        let skin = match draft.skin.as_deref() {
            None | Some("") => Skin::default(),
            Some(name) => validator.skin(name)?,
        };

        let board = Board::new(draft.title, draft.description, skin);
        let board_id = board.id;
        self.journal.store.insert_board(board)?;

        let view = self.editor_view(board_id)?;

        log_event(
            Event::BoardCreated,
            &[("board_id", &board_id.to_string()), ("skin", skin.as_str())],
        );

        Ok(CreatedBoard {
            edit_url: self.edit_url(&view),
            public_url: self.public_url(&view),
            board: view,
        })
    }

    /// Open a board by its edit secret. The result carries both secrets.
    pub fn open_for_edit(&self, edit_secret: &str) -> ServiceResult<BoardView> {
        self.open(edit_secret, true)
    }

    /// Open a board by its public secret. The edit secret is withheld.
    pub fn open_public(&self, public_secret: &str) -> ServiceResult<BoardView> {
        self.open(public_secret, false)
    }

    /// Fetch a board by id. Requires either secret; the edit secret also
    /// reveals itself in the result.
    pub fn get(&self, board_id: Uuid, secret: Option<&str>) -> ServiceResult<BoardView> {
        self.journal.read(board_id, Access::Read, secret, |document| {
            let editor = secret
                .map(|claimed| verify(claimed, Some(&document.secrets())) == Verdict::Edit)
                .unwrap_or(false);
            Ok(BoardView::of(document, editor))
        })
    }

    pub fn update(&self, board_id: Uuid, secret: Option<&str>, patch: BoardPatch) -> ServiceResult<BoardView> {
        self.journal.write(board_id, secret, |document| {
            let validator = &self.journal.validator;
            if let Some(title) = &patch.title {
                validator.board_title(title)?;
            }
            if let Some(description) = &patch.description {
                validator.description(description)?;
            }
            let skin = patch.skin.as_deref().map(|name| validator.skin(name)).transpose()?;

            let changed = patch.title.is_some() || patch.description.is_some() || skin.is_some();
            let board = document.board_mut();
            if let Some(title) = patch.title {
                board.title = title;
            }
            if let Some(description) = patch.description {
                board.description = description;
            }
            if let Some(skin) = skin {
                board.skin = skin;
            }
            if changed {
                board.touch();
                log_event(Event::BoardUpdated, &[("board_id", &board_id.to_string())]);
            }
            Ok(BoardView::of(document, true))
        })
    }

    /// Delete a board with all of its pages and elements
    pub fn delete(&self, board_id: Uuid, secret: Option<&str>) -> ServiceResult<()> {
        self.journal.write(board_id, secret, |document| {
            let pages = document.page_count();
            document.remove_board();
            log_event(
                Event::BoardDeleted,
                &[("board_id", &board_id.to_string()), ("pages", &pages.to_string())],
            );
            Ok(())
        })
    }

    fn open(&self, presented: &str, editor: bool) -> ServiceResult<BoardView> {
        let not_found = || ServiceError::NotFound("Board".into());
        let secret = Secret::parse(presented).ok_or_else(not_found)?;
        let board_id = self
            .journal
            .store
            .find_board_by_secret(&secret)?
            .ok_or_else(not_found)?;

        self.journal.store.view(board_id, |document| {
            let document = document.ok_or_else(not_found)?;
            let stored = if editor {
                document.board().edit_secret
            } else {
                document.board().public_secret
            };
            if !stored.ct_eq(&secret) {
                return Err(not_found());
            }
            Ok(BoardView::of(document, editor))
        })?
    }

    fn editor_view(&self, board_id: Uuid) -> ServiceResult<BoardView> {
        self.journal.store.view(board_id, |document| {
            document
                .map(|document| BoardView::of(document, true))
                .ok_or_else(|| ServiceError::NotFound("Board".into()))
        })?
    }

    fn edit_url(&self, view: &BoardView) -> String {
        let token = view.edit_token.map(|secret| secret.to_string()).unwrap_or_default();
        format!("{}/board/{}/edit?edit_token={}", self.journal.frontend_url, view.id, token)
    }

    fn public_url(&self, view: &BoardView) -> String {
        format!(
            "{}/board/{}/public?public_token={}",
            self.journal.frontend_url, view.id, view.public_token
        )
    }
}
