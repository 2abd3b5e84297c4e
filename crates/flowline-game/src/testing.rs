//! Test utilities for driving a [`Controller`] through scripted gestures.
//!
//! # Example
//!
//! ```
//! # use flowline_game::testing::ControllerTester;
//! ControllerTester::from_layout(
//!     "
//!     R . R
//!     B . .
//!     . . B
//!     ",
//! )
//! .draw(&[(0, 0), (1, 0), (2, 0)])
//! .assert_complete("red")
//! .draw(&[(0, 1), (0, 2), (1, 2), (1, 1), (2, 1), (2, 2)])
//! .assert_solved();
//! ```

use flowline_core::{Difficulty, PairId, Position, Puzzle};

use crate::{Controller, InteractionEvent, InteractionOutcome};

/// A test harness that feeds gestures to a [`Controller`] and checks the result.
///
/// All methods take and return `self` so that scenarios read as one chain.
///
/// # Panics
///
/// All assertion methods panic with descriptive messages on failure, using
/// `#[track_caller]` to report the calling test's location.
#[derive(Debug)]
pub struct ControllerTester {
    controller: Controller,
    last: InteractionOutcome,
}

impl ControllerTester {
    /// Creates a tester for `puzzle`.
    #[must_use]
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            controller: Controller::new(puzzle),
            last: InteractionOutcome {
                event: InteractionEvent::Ignored,
                newly_solved: false,
            },
        }
    }

    /// Creates a tester from a layout accepted by [`Puzzle::from_layout`].
    ///
    /// # Panics
    ///
    /// Panics if the layout is invalid.
    #[track_caller]
    #[must_use]
    pub fn from_layout(layout: &str) -> Self {
        let puzzle = Puzzle::from_layout(0, Difficulty::Easy, "test", layout).unwrap();
        Self::new(puzzle)
    }

    /// Returns the controller under test.
    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Returns the outcome of the most recent event.
    #[must_use]
    pub fn last(&self) -> &InteractionOutcome {
        &self.last
    }

    /// Presses `(x, y)`.
    pub fn press(mut self, x: u8, y: u8) -> Self {
        self.last = self.controller.press(Position::new(x, y));
        self
    }

    /// Moves to `(x, y)`.
    pub fn move_to(mut self, x: u8, y: u8) -> Self {
        self.last = self.controller.move_to(Position::new(x, y));
        self
    }

    /// Moves through each cell in turn.
    pub fn drag(mut self, cells: &[(u8, u8)]) -> Self {
        for &(x, y) in cells {
            self = self.move_to(x, y);
        }
        self
    }

    /// Releases the pointer.
    pub fn release(mut self) -> Self {
        self.last = self.controller.release();
        self
    }

    /// Presses and releases `(x, y)` without moving.
    pub fn tap(self, x: u8, y: u8) -> Self {
        self.press(x, y).release()
    }

    /// Presses the first cell, drags through the rest, and releases.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    #[track_caller]
    pub fn draw(self, cells: &[(u8, u8)]) -> Self {
        let Some((&(x, y), rest)) = cells.split_first() else {
            panic!("draw needs at least one cell");
        };
        self.press(x, y).drag(rest).release()
    }

    /// Asserts the event of the most recent interaction.
    #[track_caller]
    pub fn assert_event(self, expected: &InteractionEvent) -> Self {
        assert_eq!(&self.last.event, expected, "unexpected interaction event");
        self
    }

    /// Asserts the points of the path of `pair`.
    #[track_caller]
    pub fn assert_path(self, pair: &str, expected: &[(u8, u8)]) -> Self {
        let path = self
            .controller
            .game()
            .path(&PairId::from(pair))
            .unwrap_or_else(|| panic!("no path for pair {pair}"));
        let expected: Vec<Position> = expected.iter().map(|&(x, y)| Position::new(x, y)).collect();
        assert_eq!(path.points(), expected.as_slice(), "path of {pair}");
        self
    }

    /// Asserts that `pair` is connected.
    #[track_caller]
    pub fn assert_complete(self, pair: &str) -> Self {
        let game = self.controller.game();
        let pair_id = PairId::from(pair);
        assert!(game.is_pair_complete(&pair_id), "{pair} is not connected");
        assert!(
            game.path(&pair_id).is_some_and(crate::DrawnPath::is_complete),
            "{pair} path is not flagged complete"
        );
        self
    }

    /// Asserts that no pair is connected.
    #[track_caller]
    pub fn assert_no_completed_pairs(self) -> Self {
        let completed = self.controller.game().completed_pairs();
        assert!(completed.is_empty(), "connected pairs: {completed:?}");
        self
    }

    /// Asserts the number of cells no path covers.
    #[track_caller]
    pub fn assert_unfilled(self, expected: usize) -> Self {
        let unfilled = self.controller.game().board().unfilled_cells().count();
        assert_eq!(unfilled, expected, "unfilled cell count");
        self
    }

    /// Asserts that the puzzle is solved.
    #[track_caller]
    pub fn assert_solved(self) -> Self {
        assert!(self.controller.is_solved(), "puzzle is not solved");
        self
    }

    /// Asserts that the puzzle is not solved.
    #[track_caller]
    pub fn assert_not_solved(self) -> Self {
        assert!(!self.controller.is_solved(), "puzzle is unexpectedly solved");
        self
    }

    /// Asserts that the most recent interaction solved the puzzle.
    #[track_caller]
    pub fn assert_newly_solved(self) -> Self {
        assert!(self.last.newly_solved, "last interaction did not solve the puzzle");
        self
    }
}
