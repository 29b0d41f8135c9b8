//! # Journal Services
//!
//! Board, page, element and recap operations on top of a [`DocumentStore`].
//!
//! Every operation runs inside one store transaction on its board:
//!
//! 1. the access gate decides from the committed board state,
//! 2. sub-resource ownership is checked (`NotFound` on mismatch),
//! 3. positional work goes through the ordering engine,
//! 4. the transaction commits only if every step succeeded.
//!
//! ```ignore
//! let journal = Journal::new(Arc::new(InMemoryDocumentStore::new()), Validator::new(), "http://localhost:3000");
//! let created = journal.boards().create(BoardDraft::titled("Trip"))?;
//! ```

mod boards;
mod elements;
mod errors;
mod pages;
mod recap;
mod validation;
mod views;

pub use boards::{BoardDraft, BoardPatch, BoardService};
pub use elements::ElementService;
pub use errors::{ServiceError, ServiceResult};
pub use pages::{PageDraft, PageService, PageUpdate};
pub use recap::{date_range, DateRange, Recap, RecapFilter, RecapPage, RecapService};
pub use validation::{ValidationLimits, Validator};
pub use views::{BoardView, CreatedBoard, ElementList, PageList, PageView};

use std::sync::Arc;

use uuid::Uuid;

use crate::access::{Access, AccessGate, AccessOutcome, BoardSecrets};
use crate::observability::{log_event, Event};
use crate::store::{BoardDocument, DocumentStore};

/// Entry point to the services, shared by every request handler
pub struct Journal<S: DocumentStore> {
    store: Arc<S>,
    gate: AccessGate,
    validator: Validator,
    frontend_url: String,
}

impl<S: DocumentStore> Journal<S> {
    pub fn new(store: Arc<S>, validator: Validator, frontend_url: impl Into<String>) -> Self {
        Self {
            store,
            gate: AccessGate::new(),
            validator,
            frontend_url: frontend_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn boards(&self) -> BoardService<'_, S> {
        BoardService::new(self)
    }

    pub fn pages(&self) -> PageService<'_, S> {
        PageService::new(self)
    }

    pub fn elements(&self) -> ElementService<'_, S> {
        ElementService::new(self)
    }

    pub fn recaps(&self) -> RecapService<'_, S> {
        RecapService::new(self)
    }

    /// Run only the access gate for `access` on a board.
    ///
    /// Callers holding input they could not parse use this to answer with the
    /// gate's decision before reporting the input as invalid.
    pub fn admit(&self, board_id: Uuid, access: Access, presented: Option<&str>) -> ServiceResult<AccessOutcome> {
        self.store.view(board_id, |document| {
            self.authorize(board_id, access, presented, document.map(BoardDocument::secrets))
        })?
    }

    // ==================
    // Guarded transactions
    // ==================

    /// Run a read on committed state after the gate admits `access`
    fn read<T, F>(&self, board_id: Uuid, access: Access, presented: Option<&str>, f: F) -> ServiceResult<T>
    where
        F: FnOnce(&BoardDocument) -> ServiceResult<T>,
    {
        self.store.view(board_id, |document| {
            self.authorize(board_id, access, presented, document.map(BoardDocument::secrets))?;
            let document = document.ok_or_else(board_not_found)?;
            f(document)
        })?
    }

    /// Run a mutation after the gate admits edit access. Nothing is written
    /// unless `f` succeeds.
    fn write<T, F>(&self, board_id: Uuid, presented: Option<&str>, f: F) -> ServiceResult<T>
    where
        F: FnOnce(&mut BoardDocument) -> ServiceResult<T>,
    {
        self.store.update(board_id, |document| {
            let secrets = document.as_deref().map(BoardDocument::secrets);
            self.authorize(board_id, Access::Edit, presented, secrets)?;
            let document = document.ok_or_else(board_not_found)?;
            f(document)
        })
    }

    fn authorize(
        &self,
        board_id: Uuid,
        access: Access,
        presented: Option<&str>,
        secrets: Option<BoardSecrets>,
    ) -> ServiceResult<AccessOutcome> {
        let outcome = self.gate.authorize(access, presented, secrets.as_ref());
        if !outcome.is_authorized() {
            log_event(
                Event::AccessDenied,
                &[
                    ("access", access.as_str()),
                    ("board_id", &board_id.to_string()),
                    ("status", &outcome.status_code().to_string()),
                ],
            );
        }
        ServiceError::check_access(outcome)
    }
}

fn board_not_found() -> ServiceError {
    ServiceError::NotFound("Board".into())
}
