use flowline_core::{Grid, PairId, Position, Puzzle};

use crate::{CellState, DotCell, DrawnPath, PathMark};

/// Whether [`Board::apply_path`] marks or clears a path's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ApplyMode {
    /// Set each visited cell's occupant to the path.
    Mark,
    /// Remove the path from each visited cell it currently occupies.
    Clear,
}

/// The cell matrix of a game: dot placements and path occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Grid<CellState>,
}

impl Board {
    /// Builds an empty board for `puzzle` with every dot stamped on its cell.
    ///
    /// Dots outside the grid are skipped; [`Puzzle::validate`] rejects such data
    /// before it reaches the engine.
    #[must_use]
    pub fn new(puzzle: &Puzzle) -> Self {
        let mut cells = Grid::new(puzzle.size, CellState::Empty);
        for flow in &puzzle.flows {
            for dot in &flow.dots {
                if let Some(cell) = cells.get_mut(dot.position) {
                    *cell = CellState::Dot(DotCell {
                        dot_id: dot.id.clone(),
                        pair_id: flow.pair_id.clone(),
                        color: dot.color.clone(),
                        path: None,
                    });
                }
            }
        }
        Self { cells }
    }

    /// Returns the side length.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.cells.size()
    }

    /// Returns `true` if `pos` lies on the board.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(pos)
    }

    /// Returns the cell at `pos`, or `None` off the board.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&CellState> {
        self.cells.get(pos)
    }

    /// Returns the underlying grid.
    #[must_use]
    pub fn cells(&self) -> &Grid<CellState> {
        &self.cells
    }

    /// Returns a new board with every cell of `path.points` marked or cleared.
    ///
    /// Clearing only removes occupancy owned by `path`; another path's cells are
    /// never touched. `self` is left unchanged.
    #[must_use]
    pub fn apply_path(&self, path: &DrawnPath, mode: ApplyMode) -> Self {
        self.apply_points(&path.mark(), path.points(), mode)
    }

    pub(crate) fn apply_points(&self, mark: &PathMark, points: &[Position], mode: ApplyMode) -> Self {
        let mut next = self.clone();
        for &pos in points {
            let Some(cell) = next.cells.get_mut(pos) else {
                continue;
            };
            match mode {
                ApplyMode::Mark => cell.set_occupant(mark.clone()),
                ApplyMode::Clear => cell.clear_occupant(&mark.pair_id),
            }
        }
        next
    }

    /// Returns the positions not covered by any path.
    pub fn unfilled_cells(&self) -> impl Iterator<Item = Position> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.occupant().is_none())
            .map(|(pos, _)| pos)
    }

    /// Returns `true` if every cell carries some path.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.unfilled_cells().next().is_none()
    }

    /// Returns the positions occupied by `pair_id`.
    pub fn cells_of<'a>(&'a self, pair_id: &'a PairId) -> impl Iterator<Item = Position> + 'a {
        self.cells
            .iter()
            .filter(move |(_, cell)| cell.is_occupied_by(pair_id))
            .map(|(pos, _)| pos)
    }
}
