//! # Element Service

use uuid::Uuid;

use crate::access::Access;
use crate::model::{Element, ElementDraft, ElementPatch};
use crate::observability::{log_event, Event};
use crate::ordering::{
    assign_append_position, batch_assign_positions, is_dense, Position, PositionUpdate, SiblingCollection,
};
use crate::store::DocumentStore;

use super::errors::{ServiceError, ServiceResult};
use super::views::ElementList;
use super::Journal;

pub struct ElementService<'a, S: DocumentStore> {
    journal: &'a Journal<S>,
}

impl<'a, S: DocumentStore> ElementService<'a, S> {
    pub(super) fn new(journal: &'a Journal<S>) -> Self {
        Self { journal }
    }

    /// Place a new element on top of the page's stack
    pub fn create(
        &self,
        board_id: Uuid,
        page_id: Uuid,
        secret: Option<&str>,
        draft: ElementDraft,
    ) -> ServiceResult<Element> {
        self.journal.write(board_id, secret, |document| {
            self.journal.validator.geometry(&draft.geometry)?;
            document.require_page(page_id)?;
            let z = assign_append_position(document.element_positions(page_id));
            let element = Element::new(page_id, draft, z);
            document.insert_element(element.clone())?;

            log_event(
                Event::ElementCreated,
                &[
                    ("board_id", &board_id.to_string()),
                    ("element_id", &element.id.to_string()),
                    ("kind", element.kind.as_str()),
                    ("z", &z.to_string()),
                ],
            );
            Ok(element)
        })
    }

    /// A page's elements, bottom of the stack first
    pub fn list(&self, board_id: Uuid, page_id: Uuid, secret: Option<&str>) -> ServiceResult<ElementList> {
        self.journal.read(board_id, Access::PublicRead, secret, |document| {
            document.require_page(page_id)?;
            let elements: Vec<Element> = document.elements(page_id).into_iter().cloned().collect();
            Ok(ElementList {
                total: elements.len(),
                elements,
            })
        })
    }

    pub fn update(
        &self,
        board_id: Uuid,
        page_id: Uuid,
        element_id: Uuid,
        secret: Option<&str>,
        patch: ElementPatch,
    ) -> ServiceResult<Element> {
        self.journal.write(board_id, secret, |document| {
            self.journal.validator.element_patch(&patch)?;
            document.require_page(page_id)?;
            let element = document.require_element_mut(page_id, element_id)?;
            element.apply(patch);

            log_event(
                Event::ElementUpdated,
                &[("board_id", &board_id.to_string()), ("element_id", &element_id.to_string())],
            );
            Ok(element.clone())
        })
    }

    /// Delete one element. The remaining `z` values keep their gap.
    pub fn delete(
        &self,
        board_id: Uuid,
        page_id: Uuid,
        element_id: Uuid,
        secret: Option<&str>,
    ) -> ServiceResult<()> {
        self.journal.write(board_id, secret, |document| {
            document.require_page(page_id)?;
            let element = document.remove_element(page_id, element_id)?;

            log_event(
                Event::ElementDeleted,
                &[
                    ("board_id", &board_id.to_string()),
                    ("element_id", &element_id.to_string()),
                    ("z", &element.z.to_string()),
                ],
            );
            Ok(())
        })
    }

    /// Assign explicit `z` values to several elements of one page.
    ///
    /// Any id outside the page fails the whole batch with nothing written.
    /// So does a batch after which the page's `z` values are not exactly
    /// `0..n-1`.
    pub fn reorder(
        &self,
        board_id: Uuid,
        page_id: Uuid,
        secret: Option<&str>,
        assignments: &[(Uuid, Position)],
    ) -> ServiceResult<Vec<PositionUpdate>> {
        self.journal.write(board_id, secret, |document| {
            self.journal.validator.reorder(assignments)?;

            let mut siblings = document.element_siblings(page_id)?;
            let writes = batch_assign_positions(&mut siblings, assignments).map_err(|err| {
                log_event(
                    Event::ConsistencyViolation,
                    &[
                        ("board_id", &board_id.to_string()),
                        ("page_id", &page_id.to_string()),
                        ("reason", &err.to_string()),
                    ],
                );
                ServiceError::from(err)
            })?;

            let stack: Vec<Position> = siblings.positions().into_iter().map(|(_, z)| z).collect();
            if !is_dense(stack.iter().copied()) {
                return Err(ServiceError::validation(format!(
                    "z values must be a permutation of 0..{} after reorder",
                    stack.len()
                )));
            }

            log_event(
                Event::ElementsRestacked,
                &[
                    ("board_id", &board_id.to_string()),
                    ("page_id", &page_id.to_string()),
                    ("requested", &assignments.len().to_string()),
                    ("writes", &writes.len().to_string()),
                ],
            );
            Ok(writes)
        })
    }
}
