//! # Ordering Engine
//!
//! Computes and applies position updates for a sibling collection so the
//! dense-rank invariant holds after every explicit move.
//!
//! The engine owns no state. It reads and writes through
//! [`SiblingCollection`], which the store implements on top of an open
//! transaction; rollback on failure is the transaction's job.
//!
//! Deletes never renumber. Gaps they leave are closed the next time a move
//! touches the collection: the move is computed over dense ranks (stable by
//! current position, ties broken by id), and only positions that differ from
//! the stored value are written.

use std::collections::HashSet;

use uuid::Uuid;

use super::errors::{OrderingError, OrderingResult};
use super::{Position, PositionUpdate, SiblingCollection};

/// Position for a newly created sibling: `max + 1`, or `0` when empty.
pub fn assign_append_position<I>(positions: I) -> Position
where
    I: IntoIterator<Item = Position>,
{
    positions.into_iter().max().map_or(0, |max| max + 1)
}

/// True when `positions` is exactly `{0..n-1}`.
pub fn is_dense<I>(positions: I) -> bool
where
    I: IntoIterator<Item = Position>,
{
    let mut sorted: Vec<Position> = positions.into_iter().collect();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(rank, position)| *position == rank as Position)
}

/// Plan the writes that move `subject` from `old_pos` to `new_pos`.
///
/// `new_pos == old_pos` plans nothing. Otherwise siblings between the two
/// positions shift by one toward the vacated slot and the subject lands on
/// `new_pos`. Out-of-range targets are not rejected; callers clamp.
pub fn plan_move(
    siblings: &[(Uuid, Position)],
    subject: Uuid,
    old_pos: Position,
    new_pos: Position,
) -> OrderingResult<Vec<PositionUpdate>> {
    if new_pos == old_pos {
        return Ok(Vec::new());
    }

    let mut ranked = siblings.to_vec();
    ranked.sort_by_key(|(id, position)| (*position, *id));

    let from = ranked
        .iter()
        .position(|(id, _)| *id == subject)
        .ok_or(OrderingError::SubjectMissing(subject))? as Position;

    let mut updates = Vec::new();
    for (rank, (id, stored)) in ranked.iter().enumerate() {
        let rank = rank as Position;
        let target = if *id == subject {
            new_pos
        } else if new_pos > from && rank > from && rank <= new_pos {
            rank - 1
        } else if new_pos < from && rank >= new_pos && rank < from {
            rank + 1
        } else {
            rank
        };

        if target != *stored {
            updates.push(PositionUpdate { id: *id, position: target });
        }
    }

    Ok(updates)
}

/// Move one sibling and shift the others. Returns the writes performed.
pub fn move_position<C>(
    collection: &mut C,
    subject: Uuid,
    old_pos: Position,
    new_pos: Position,
) -> OrderingResult<Vec<PositionUpdate>>
where
    C: SiblingCollection + ?Sized,
{
    let updates = plan_move(&collection.positions(), subject, old_pos, new_pos)?;
    apply(collection, &updates)?;
    Ok(updates)
}

/// Assign explicit positions to several siblings at once.
///
/// Every id is checked for membership before anything is written; a single
/// stranger fails the whole batch. The result is dense only if the caller
/// supplied a permutation of `0..n-1`.
pub fn batch_assign_positions<C>(
    collection: &mut C,
    assignments: &[(Uuid, Position)],
) -> OrderingResult<Vec<PositionUpdate>>
where
    C: SiblingCollection + ?Sized,
{
    let current = collection.positions();
    let members: HashSet<Uuid> = current.iter().map(|(id, _)| *id).collect();

    if let Some((stranger, _)) = assignments.iter().find(|(id, _)| !members.contains(id)) {
        return Err(OrderingError::NotMember(*stranger));
    }

    let mut updates = Vec::with_capacity(assignments.len());
    for (id, position) in assignments {
        let stored = current
            .iter()
            .find(|(member, _)| member == id)
            .map(|(_, stored)| *stored);
        if stored != Some(*position) {
            updates.push(PositionUpdate { id: *id, position: *position });
        }
    }

    apply(collection, &updates)?;
    Ok(updates)
}

fn apply<C>(collection: &mut C, updates: &[PositionUpdate]) -> OrderingResult<()>
where
    C: SiblingCollection + ?Sized,
{
    for update in updates {
        collection.set_position(update.id, update.position)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vec-backed collection that counts writes
    #[derive(Default)]
    struct Siblings {
        items: Vec<(Uuid, Position)>,
        writes: usize,
    }

    impl Siblings {
        fn dense(n: usize) -> Self {
            Self {
                items: (0..n).map(|i| (Uuid::new_v4(), i as Position)).collect(),
                writes: 0,
            }
        }

        fn id(&self, index: usize) -> Uuid {
            self.items[index].0
        }

        fn position_of(&self, id: Uuid) -> Position {
            self.items.iter().find(|(i, _)| *i == id).unwrap().1
        }
    }

    impl SiblingCollection for Siblings {
        fn positions(&self) -> Vec<(Uuid, Position)> {
            self.items.clone()
        }

        fn set_position(&mut self, id: Uuid, position: Position) -> OrderingResult<()> {
            let slot = self
                .items
                .iter_mut()
                .find(|(i, _)| *i == id)
                .ok_or(OrderingError::NotMember(id))?;
            slot.1 = position;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_append_position() {
        assert_eq!(assign_append_position(Vec::new()), 0);
        assert_eq!(assign_append_position(vec![0, 1, 2]), 3);
        assert_eq!(assign_append_position(vec![0, 2, 3]), 4);
    }

    #[test]
    fn test_is_dense() {
        assert!(is_dense(Vec::new()));
        assert!(is_dense(vec![2, 0, 1]));
        assert!(!is_dense(vec![0, 2, 3]));
        assert!(!is_dense(vec![0, 1, 1]));
    }

    #[test]
    fn test_move_same_position_writes_nothing() {
        let mut siblings = Siblings::dense(4);
        let subject = siblings.id(2);
        let updates = move_position(&mut siblings, subject, 2, 2).unwrap();
        assert!(updates.is_empty());
        assert_eq!(siblings.writes, 0);
    }

    #[test]
    fn test_move_down_shifts_range() {
        let mut siblings = Siblings::dense(3);
        let (p0, p1, p2) = (siblings.id(0), siblings.id(1), siblings.id(2));

        move_position(&mut siblings, p0, 0, 2).unwrap();

        assert_eq!(siblings.position_of(p0), 2);
        assert_eq!(siblings.position_of(p1), 0);
        assert_eq!(siblings.position_of(p2), 1);
    }

    #[test]
    fn test_move_up_shifts_range() {
        let mut siblings = Siblings::dense(5);
        let ids: Vec<Uuid> = (0..5).map(|i| siblings.id(i)).collect();

        let updates = move_position(&mut siblings, ids[3], 3, 1).unwrap();

        // Only positions 1..=3 change
        assert_eq!(updates.len(), 3);
        assert_eq!(siblings.position_of(ids[0]), 0);
        assert_eq!(siblings.position_of(ids[3]), 1);
        assert_eq!(siblings.position_of(ids[1]), 2);
        assert_eq!(siblings.position_of(ids[2]), 3);
        assert_eq!(siblings.position_of(ids[4]), 4);
    }

    #[test]
    fn test_move_closes_gaps_left_by_delete() {
        let mut siblings = Siblings::dense(4);
        let removed = siblings.items.remove(1);
        assert_eq!(removed.1, 1);
        let subject = siblings.id(2); // stored at 3

        move_position(&mut siblings, subject, 3, 0).unwrap();

        assert!(is_dense(siblings.positions().into_iter().map(|(_, p)| p)));
        assert_eq!(siblings.position_of(subject), 0);
    }

    #[test]
    fn test_move_unknown_subject() {
        let mut siblings = Siblings::dense(2);
        let stranger = Uuid::new_v4();
        assert_eq!(
            move_position(&mut siblings, stranger, 0, 1),
            Err(OrderingError::SubjectMissing(stranger))
        );
        assert_eq!(siblings.writes, 0);
    }

    #[test]
    fn test_move_out_of_range_is_not_rejected() {
        let mut siblings = Siblings::dense(3);
        let subject = siblings.id(0);
        move_position(&mut siblings, subject, 0, 7).unwrap();
        assert_eq!(siblings.position_of(subject), 7);
    }

    #[test]
    fn test_batch_applies_permutation() {
        let mut siblings = Siblings::dense(3);
        let (a, b, c) = (siblings.id(0), siblings.id(1), siblings.id(2));

        batch_assign_positions(&mut siblings, &[(a, 2), (b, 0), (c, 1)]).unwrap();

        assert_eq!(siblings.position_of(a), 2);
        assert_eq!(siblings.position_of(b), 0);
        assert_eq!(siblings.position_of(c), 1);
    }

    #[test]
    fn test_batch_rejects_stranger_before_writing() {
        let mut siblings = Siblings::dense(2);
        let a = siblings.id(0);
        let stranger = Uuid::new_v4();

        let result = batch_assign_positions(&mut siblings, &[(a, 1), (stranger, 0)]);

        assert_eq!(result, Err(OrderingError::NotMember(stranger)));
        assert_eq!(siblings.writes, 0);
        assert_eq!(siblings.position_of(a), 0);
    }

    #[test]
    fn test_batch_skips_unchanged_positions() {
        let mut siblings = Siblings::dense(3);
        let (a, b) = (siblings.id(0), siblings.id(1));
        let updates = batch_assign_positions(&mut siblings, &[(a, 0), (b, 1)]).unwrap();
        assert!(updates.is_empty());
        assert_eq!(siblings.writes, 0);
    }
}
