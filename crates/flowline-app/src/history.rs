//! Bounded undo / redo over settled game snapshots.

use std::{collections::VecDeque, num::NonZero};

use flowline_game::Game;

/// A bounded list of snapshots with a cursor on the current one.
///
/// Pushing discards everything after the cursor; at capacity the oldest
/// snapshot is dropped.
#[derive(Debug, Clone)]
struct SnapshotStack<T> {
    entries: VecDeque<T>,
    capacity: NonZero<usize>,
    cursor: usize,
}

impl<T: PartialEq> SnapshotStack<T> {
    fn new(capacity: NonZero<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            cursor: 0,
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    /// Returns `false` if `item` equals the current snapshot and was not pushed.
    fn push(&mut self, item: T) -> bool {
        if self.current() == Some(&item) {
            return false;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        if self.entries.len() == self.capacity.get() {
            self.entries.pop_front();
        }
        self.entries.push_back(item);
        self.cursor = self.entries.len() - 1;
        true
    }

    fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

/// Undo history of one attempt, starting from the untouched board.
#[derive(Debug, Clone)]
pub struct History {
    stack: SnapshotStack<Game>,
}

impl History {
    /// Creates a history whose first entry is `initial`.
    #[must_use]
    pub fn new(capacity: NonZero<usize>, initial: Game) -> Self {
        let mut stack = SnapshotStack::new(capacity);
        stack.push(initial);
        Self { stack }
    }

    /// Forgets everything and starts over from `initial`.
    pub fn reset(&mut self, initial: Game) {
        self.stack.clear();
        self.stack.push(initial);
    }

    /// Records `game` unless it matches the current entry.
    ///
    /// Returns `true` if an entry was added.
    pub fn record(&mut self, game: &Game) -> bool {
        self.stack.push(game.clone())
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    /// Steps back and returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&Game> {
        self.stack.undo()
    }

    /// Steps forward and returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&Game> {
        self.stack.redo()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use flowline_core::{Difficulty, Position, Puzzle};

    use super::*;

    fn capacity(n: usize) -> NonZero<usize> {
        NonZero::new(n).unwrap()
    }

    #[test]
    fn test_stack_undo_redo_roundtrip() {
        let mut stack = SnapshotStack::new(capacity(4));
        for n in 1..=3 {
            assert!(stack.push(n));
        }
        assert_eq!(stack.undo(), Some(&2));
        assert_eq!(stack.undo(), Some(&1));
        assert_eq!(stack.undo(), None);
        assert_eq!(stack.redo(), Some(&2));
        assert_eq!(stack.redo(), Some(&3));
        assert_eq!(stack.redo(), None);
    }

    #[test]
    fn test_stack_push_discards_redo_and_skips_duplicates() {
        let mut stack = SnapshotStack::new(capacity(4));
        stack.push(1);
        stack.push(2);
        stack.push(3);
        stack.undo();
        assert!(!stack.push(2));
        assert!(stack.can_redo());
        assert!(stack.push(9));
        assert!(!stack.can_redo());
        assert_eq!(stack.entries, [1, 2, 9]);
    }

    #[test]
    fn test_stack_capacity_drops_oldest() {
        let mut stack = SnapshotStack::new(capacity(2));
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.entries, [2, 3]);
        assert_eq!(stack.current(), Some(&3));
        assert_eq!(stack.undo(), Some(&2));
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_history_over_games() {
        let puzzle = Puzzle::from_layout(0, Difficulty::Easy, "Tiny", "RR\nBB").unwrap();
        let initial = Game::new(puzzle);
        let mut history = History::new(capacity(10), initial.clone());
        assert!(!history.record(&initial));
        assert_eq!(history.len(), 1);

        let mut game = initial.clone();
        game.begin_path(Position::new(0, 0));
        game.extend_or_retrace(Position::new(1, 0));
        assert!(game.commit().is_committed());
        assert!(history.record(&game));

        assert_eq!(history.undo(), Some(&initial));
        assert_eq!(history.redo(), Some(&game));

        history.reset(initial);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.is_empty());
    }
}
