//! # Board Documents
//!
//! A board together with its pages and elements: the unit a transaction
//! reads and writes. Sibling views expose pages and elements to the
//! ordering engine.

use std::collections::HashMap;

use uuid::Uuid;

use crate::access::BoardSecrets;
use crate::model::{Board, Element, Page};
use crate::ordering::{OrderingError, OrderingResult, Position, SiblingCollection};

use super::errors::{StoreError, StoreResult};

/// One board and everything it owns
#[derive(Debug, Clone)]
pub struct BoardDocument {
    board: Board,
    pages: HashMap<Uuid, Page>,
    elements: HashMap<Uuid, Element>,
    removed: bool,
}

impl BoardDocument {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            pages: HashMap::new(),
            elements: HashMap::new(),
            removed: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn secrets(&self) -> BoardSecrets {
        self.board.secrets()
    }

    /// Delete the board with all pages and elements when the transaction commits
    pub fn remove_board(&mut self) {
        self.pages.clear();
        self.elements.clear();
        self.removed = true;
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    // ==================
    // Pages
    // ==================

    /// Pages in display order
    pub fn pages(&self) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self.pages.values().collect();
        pages.sort_by_key(|page| (page.order_idx, page.created_at, page.id));
        pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, id: Uuid) -> Option<&Page> {
        self.pages.get(&id)
    }

    /// Membership guard: the page exists and belongs to this board
    pub fn require_page(&self, id: Uuid) -> StoreResult<&Page> {
        self.pages.get(&id).ok_or(StoreError::PageNotFound(id))
    }

    pub fn require_page_mut(&mut self, id: Uuid) -> StoreResult<&mut Page> {
        self.pages.get_mut(&id).ok_or(StoreError::PageNotFound(id))
    }

    pub fn page_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.pages.values().map(|page| page.order_idx)
    }

    pub fn insert_page(&mut self, page: Page) -> StoreResult<()> {
        if page.board_id != self.board.id {
            return Err(StoreError::ForeignParent {
                child: page.id,
                parent: self.board.id,
            });
        }
        self.pages.insert(page.id, page);
        Ok(())
    }

    /// Remove a page and cascade to its elements. Sibling positions are
    /// left untouched. Returns the page and the number of elements removed.
    pub fn remove_page(&mut self, id: Uuid) -> StoreResult<(Page, usize)> {
        let page = self.pages.remove(&id).ok_or(StoreError::PageNotFound(id))?;
        let before = self.elements.len();
        self.elements.retain(|_, element| element.page_id != id);
        Ok((page, before - self.elements.len()))
    }

    /// Pages as a sibling collection keyed by `order_idx`
    pub fn page_siblings(&mut self) -> PageSiblings<'_> {
        PageSiblings { document: self }
    }

    // ==================
    // Elements
    // ==================

    /// A page's elements, bottom of the stack first
    pub fn elements(&self, page_id: Uuid) -> Vec<&Element> {
        let mut elements: Vec<&Element> = self
            .elements
            .values()
            .filter(|element| element.page_id == page_id)
            .collect();
        elements.sort_by_key(|element| (element.z, element.created_at, element.id));
        elements
    }

    pub fn element_count(&self, page_id: Uuid) -> usize {
        self.elements
            .values()
            .filter(|element| element.page_id == page_id)
            .count()
    }

    pub fn element_positions(&self, page_id: Uuid) -> impl Iterator<Item = Position> + '_ {
        self.elements
            .values()
            .filter(move |element| element.page_id == page_id)
            .map(|element| element.z)
    }

    /// Membership guard: the element exists and sits on `page_id`
    pub fn require_element(&self, page_id: Uuid, element_id: Uuid) -> StoreResult<&Element> {
        self.elements
            .get(&element_id)
            .filter(|element| element.page_id == page_id)
            .ok_or(StoreError::ElementNotFound(element_id))
    }

    pub fn require_element_mut(
        &mut self,
        page_id: Uuid,
        element_id: Uuid,
    ) -> StoreResult<&mut Element> {
        self.elements
            .get_mut(&element_id)
            .filter(|element| element.page_id == page_id)
            .ok_or(StoreError::ElementNotFound(element_id))
    }

    pub fn insert_element(&mut self, element: Element) -> StoreResult<()> {
        self.require_page(element.page_id)?;
        self.elements.insert(element.id, element);
        Ok(())
    }

    /// Remove one element. Sibling `z` values are left untouched.
    pub fn remove_element(&mut self, page_id: Uuid, element_id: Uuid) -> StoreResult<Element> {
        self.require_element(page_id, element_id)?;
        self.elements
            .remove(&element_id)
            .ok_or(StoreError::ElementNotFound(element_id))
    }

    /// A page's elements as a sibling collection keyed by `z`
    pub fn element_siblings(&mut self, page_id: Uuid) -> StoreResult<ElementSiblings<'_>> {
        self.require_page(page_id)?;
        Ok(ElementSiblings {
            document: self,
            page_id,
        })
    }
}

/// Pages of one board, seen by the ordering engine
pub struct PageSiblings<'a> {
    document: &'a mut BoardDocument,
}

impl SiblingCollection for PageSiblings<'_> {
    fn positions(&self) -> Vec<(Uuid, Position)> {
        self.document
            .pages
            .values()
            .map(|page| (page.id, page.order_idx))
            .collect()
    }

    fn set_position(&mut self, id: Uuid, position: Position) -> OrderingResult<()> {
        let page = self
            .document
            .pages
            .get_mut(&id)
            .ok_or(OrderingError::NotMember(id))?;
        page.order_idx = position;
        page.touch();
        Ok(())
    }
}

/// Elements of one page, seen by the ordering engine
pub struct ElementSiblings<'a> {
    document: &'a mut BoardDocument,
    page_id: Uuid,
}

impl SiblingCollection for ElementSiblings<'_> {
    fn positions(&self) -> Vec<(Uuid, Position)> {
        self.document
            .elements
            .values()
            .filter(|element| element.page_id == self.page_id)
            .map(|element| (element.id, element.z))
            .collect()
    }

    fn set_position(&mut self, id: Uuid, position: Position) -> OrderingResult<()> {
        let element = self
            .document
            .elements
            .get_mut(&id)
            .filter(|element| element.page_id == self.page_id)
            .ok_or(OrderingError::NotMember(id))?;
        element.z = position;
        element.touch();
        Ok(())
    }
}
