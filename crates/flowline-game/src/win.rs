use crate::{DrawnPath, Game};

/// Completion counters for a game in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Pairs connected.
    pub connected_pairs: usize,
    /// Pairs in the puzzle.
    pub total_pairs: usize,
    /// Cells covered by some path.
    pub filled_cells: usize,
    /// Cells on the board.
    pub total_cells: usize,
}

impl Progress {
    /// Returns the filled share of the board as a whole percentage, rounded down.
    #[must_use]
    pub fn fill_percent(&self) -> usize {
        if self.total_cells == 0 {
            return 0;
        }
        self.filled_cells * 100 / self.total_cells
    }
}

impl Game {
    /// Returns `true` if the puzzle is solved.
    ///
    /// Every pair must be connected by a committed path and every cell on the
    /// board must be covered.
    ///
    /// # Example
    ///
    /// ```
    /// use flowline_core::{Difficulty, Position, Puzzle};
    /// use flowline_game::Game;
    ///
    /// let puzzle = Puzzle::from_layout(0, Difficulty::Easy, "Tiny", "RR\nBB").unwrap();
    /// let mut game = Game::new(puzzle);
    ///
    /// game.connect_adjacent(Position::new(0, 0), Position::new(1, 0));
    /// assert!(!game.is_solved());
    ///
    /// game.connect_adjacent(Position::new(0, 1), Position::new(1, 1));
    /// assert!(game.is_solved());
    /// ```
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let all_connected = self.puzzle().flows.iter().all(|flow| {
            self.is_pair_complete(&flow.pair_id)
                && self.path(&flow.pair_id).is_some_and(DrawnPath::is_complete)
        });
        all_connected && self.board().is_saturated()
    }

    /// Returns completion counters.
    #[must_use]
    pub fn progress(&self) -> Progress {
        let total_cells = self.board().cells().len();
        Progress {
            connected_pairs: self.completed_pairs().len(),
            total_pairs: self.puzzle().flows.len(),
            filled_cells: total_cells - self.board().unfilled_cells().count(),
            total_cells,
        }
    }
}
