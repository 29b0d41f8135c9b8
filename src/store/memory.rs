//! # In-Memory Document Store
//!
//! Each board document sits behind its own `RwLock`. A transaction holds the
//! board's write lock, works on a private copy and swaps it in on success,
//! so transactions on one board are serialized, readers only ever see
//! committed documents, and boards never contend with each other.
//!
//! Lock order is board lock, then index lock. No path takes them the other
//! way round.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::access::Secret;
use crate::model::Board;

use super::document::BoardDocument;
use super::errors::{StoreError, StoreResult};
use super::DocumentStore;

#[derive(Debug, Default)]
struct Index {
    boards: HashMap<Uuid, Arc<RwLock<BoardDocument>>>,
    secrets: HashMap<Secret, Uuid>,
}

/// In-memory store, used by the server and the tests
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    index: RwLock<Index>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn shard(&self, board_id: Uuid) -> StoreResult<Option<Arc<RwLock<BoardDocument>>>> {
        let index = self.index.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(index.boards.get(&board_id).cloned())
    }

    fn forget(&self, board: &Board) -> StoreResult<()> {
        let mut index = self.index.write().map_err(|_| StoreError::LockPoisoned)?;
        index.boards.remove(&board.id);
        index.secrets.remove(&board.edit_secret);
        index.secrets.remove(&board.public_secret);
        Ok(())
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert_board(&self, board: Board) -> StoreResult<()> {
        let mut index = self.index.write().map_err(|_| StoreError::LockPoisoned)?;

        if index.boards.contains_key(&board.id) {
            return Err(StoreError::DuplicateBoard(board.id));
        }
        if board.edit_secret == board.public_secret
            || index.secrets.contains_key(&board.edit_secret)
            || index.secrets.contains_key(&board.public_secret)
        {
            return Err(StoreError::DuplicateSecret);
        }

        index.secrets.insert(board.edit_secret, board.id);
        index.secrets.insert(board.public_secret, board.id);
        index
            .boards
            .insert(board.id, Arc::new(RwLock::new(BoardDocument::new(board))));
        Ok(())
    }

    fn find_board_by_secret(&self, secret: &Secret) -> StoreResult<Option<Uuid>> {
        let index = self.index.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(index.secrets.get(secret).copied())
    }

    fn view<T, F>(&self, board_id: Uuid, f: F) -> StoreResult<T>
    where
        F: FnOnce(Option<&BoardDocument>) -> T,
    {
        let Some(shard) = self.shard(board_id)? else {
            return Ok(f(None));
        };
        let document = shard.read().map_err(|_| StoreError::LockPoisoned)?;
        if document.is_removed() {
            return Ok(f(None));
        }
        Ok(f(Some(&document)))
    }

    fn update<T, E, F>(&self, board_id: Uuid, f: F) -> Result<T, E>
    where
        F: FnOnce(Option<&mut BoardDocument>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let Some(shard) = self.shard(board_id)? else {
            return f(None);
        };
        let mut committed = shard.write().map_err(|_| StoreError::LockPoisoned)?;
        if committed.is_removed() {
            return f(None);
        }

        let mut working = committed.clone();
        let value = f(Some(&mut working))?;

        if working.is_removed() {
            self.forget(working.board())?;
        }
        *committed = working;
        Ok(value)
    }

    fn board_count(&self) -> StoreResult<usize> {
        let index = self.index.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(index.boards.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, Skin};
    use chrono::Utc;

    fn board() -> Board {
        Board::new("Board".into(), String::new(), Skin::Default)
    }

    #[test]
    fn test_insert_and_view() {
        let store = InMemoryDocumentStore::new();
        let board = board();
        let id = board.id;
        store.insert_board(board).unwrap();

        let title = store.view(id, |doc| doc.map(|d| d.board().title.clone())).unwrap();
        assert_eq!(title.as_deref(), Some("Board"));
        assert_eq!(store.board_count().unwrap(), 1);
        assert!(store.ping().is_ok());
    }

    #[test]
    fn test_view_missing_board() {
        let store = InMemoryDocumentStore::new();
        assert!(store.view(Uuid::new_v4(), |doc| doc.is_none()).unwrap());
    }

    #[test]
    fn test_secret_unique_constraint() {
        let store = InMemoryDocumentStore::new();
        let first = board();
        let mut second = board();
        second.public_secret = first.edit_secret;
        store.insert_board(first).unwrap();

        assert_eq!(store.insert_board(second), Err(StoreError::DuplicateSecret));
    }

    #[test]
    fn test_find_by_secret() {
        let store = InMemoryDocumentStore::new();
        let board = board();
        let (id, edit, public) = (board.id, board.edit_secret, board.public_secret);
        store.insert_board(board).unwrap();

        assert_eq!(store.find_board_by_secret(&edit).unwrap(), Some(id));
        assert_eq!(store.find_board_by_secret(&public).unwrap(), Some(id));
        assert_eq!(store.find_board_by_secret(&Secret::generate()).unwrap(), None);
    }

    #[test]
    fn test_failed_update_rolls_back() {
        let store = InMemoryDocumentStore::new();
        let board = board();
        let id = board.id;
        store.insert_board(board).unwrap();

        let result: Result<(), StoreError> = store.update(id, |doc| {
            let doc = doc.ok_or(StoreError::BoardNotFound(id))?;
            doc.insert_page(Page::new(id, "draft".into(), Utc::now(), 0))?;
            doc.board_mut().title = "changed".into();
            Err(StoreError::PageNotFound(Uuid::nil()))
        });

        assert!(result.is_err());
        let (pages, title) = store
            .view(id, |doc| doc.map(|d| (d.page_count(), d.board().title.clone())))
            .unwrap()
            .unwrap();
        assert_eq!(pages, 0);
        assert_eq!(title, "Board");
    }

    #[test]
    fn test_removed_board_disappears() {
        let store = InMemoryDocumentStore::new();
        let board = board();
        let (id, edit) = (board.id, board.edit_secret);
        store.insert_board(board).unwrap();

        store
            .update(id, |doc| {
                doc.ok_or(StoreError::BoardNotFound(id))?.remove_board();
                Ok::<_, StoreError>(())
            })
            .unwrap();

        assert!(store.view(id, |doc| doc.is_none()).unwrap());
        assert_eq!(store.find_board_by_secret(&edit).unwrap(), None);
        assert_eq!(store.board_count().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_updates_on_one_board_serialize() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let board = board();
        let id = board.id;
        store.insert_board(board).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store
                            .update(id, |doc| {
                                let doc = doc.ok_or(StoreError::BoardNotFound(id))?;
                                let next = doc.page_count() as i64;
                                doc.insert_page(Page::new(id, "p".into(), Utc::now(), next))
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let positions = store
            .view(id, |doc| doc.unwrap().page_positions().collect::<Vec<_>>())
            .unwrap();
        assert_eq!(positions.len(), 200);
        assert!(crate::ordering::is_dense(positions));
    }
}
