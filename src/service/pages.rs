//! # Page Service
//!
//! Pages append at `max(order_idx) + 1`. An update carrying `order_idx`
//! clamps it into `[0, count - 1]` and moves the page there, shifting the
//! pages in between. Deletes leave gaps; the next move closes them.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::access::Access;
use crate::model::Page;
use crate::observability::{log_event, Event};
use crate::ordering::{assign_append_position, move_position, Position};
use crate::store::DocumentStore;

use super::errors::ServiceResult;
use super::views::{PageList, PageView};
use super::Journal;

/// Input for a new page
#[derive(Debug, Clone, Deserialize)]
pub struct PageDraft {
    pub title: String,
    pub date: DateTime<Utc>,
}

/// Full page update. `order_idx` is optional; when present the page moves.
#[derive(Debug, Clone, Deserialize)]
pub struct PageUpdate {
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub order_idx: Option<Position>,
}

pub struct PageService<'a, S: DocumentStore> {
    journal: &'a Journal<S>,
}

impl<'a, S: DocumentStore> PageService<'a, S> {
    pub(super) fn new(journal: &'a Journal<S>) -> Self {
        Self { journal }
    }

    /// Append a page to the board
    pub fn create(&self, board_id: Uuid, secret: Option<&str>, draft: PageDraft) -> ServiceResult<Page> {
        self.journal.write(board_id, secret, |document| {
            self.journal.validator.page_title(&draft.title)?;
            let order_idx = assign_append_position(document.page_positions());
            let page = Page::new(board_id, draft.title, draft.date, order_idx);
            document.insert_page(page.clone())?;
            document.board_mut().touch();

            log_event(
                Event::PageCreated,
                &[
                    ("board_id", &board_id.to_string()),
                    ("order_idx", &order_idx.to_string()),
                    ("page_id", &page.id.to_string()),
                ],
            );
            Ok(page)
        })
    }

    /// Every page in order, each with its elements. Open to anonymous callers.
    pub fn list(&self, board_id: Uuid, secret: Option<&str>) -> ServiceResult<PageList> {
        self.journal.read(board_id, Access::PublicRead, secret, |document| {
            let pages: Vec<PageView> = document
                .pages()
                .into_iter()
                .map(|page| PageView::of(document, page))
                .collect();
            Ok(PageList {
                total: pages.len(),
                pages,
            })
        })
    }

    pub fn get(&self, board_id: Uuid, page_id: Uuid, secret: Option<&str>) -> ServiceResult<PageView> {
        self.journal.read(board_id, Access::PublicRead, secret, |document| {
            let page = document.require_page(page_id)?;
            Ok(PageView::of(document, page))
        })
    }

    /// Replace title and date, then move the page if `order_idx` is given
    pub fn update(
        &self,
        board_id: Uuid,
        page_id: Uuid,
        secret: Option<&str>,
        update: PageUpdate,
    ) -> ServiceResult<Page> {
        self.journal.write(board_id, secret, |document| {
            let validator = &self.journal.validator;
            validator.page_title(&update.title)?;
            validator.order_idx(update.order_idx)?;

            let page = document.require_page_mut(page_id)?;
            page.title = update.title;
            page.date = update.date;
            page.touch();
            let from = page.order_idx;

            if let Some(requested) = update.order_idx {
                let last = document.page_count() as Position - 1;
                let to = requested.clamp(0, last.max(0));
                let writes = move_position(&mut document.page_siblings(), page_id, from, to)?;

                if !writes.is_empty() {
                    log_event(
                        Event::PageMoved,
                        &[
                            ("board_id", &board_id.to_string()),
                            ("from", &from.to_string()),
                            ("page_id", &page_id.to_string()),
                            ("to", &to.to_string()),
                            ("writes", &writes.len().to_string()),
                        ],
                    );
                }
            }
            document.board_mut().touch();

            log_event(
                Event::PageUpdated,
                &[("board_id", &board_id.to_string()), ("page_id", &page_id.to_string())],
            );
            Ok(document.require_page(page_id)?.clone())
        })
    }

    /// Delete a page and its elements. Sibling positions are not compacted.
    pub fn delete(&self, board_id: Uuid, page_id: Uuid, secret: Option<&str>) -> ServiceResult<()> {
        self.journal.write(board_id, secret, |document| {
            let (_, elements) = document.remove_page(page_id)?;
            document.board_mut().touch();

            log_event(
                Event::PageDeleted,
                &[
                    ("board_id", &board_id.to_string()),
                    ("elements_removed", &elements.to_string()),
                    ("page_id", &page_id.to_string()),
                ],
            );
            Ok(())
        })
    }
}
