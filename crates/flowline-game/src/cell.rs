use flowline_core::{Color, PairId};

/// Path occupancy of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathMark {
    /// Pair id of the occupying path.
    pub pair_id: PairId,
    /// Colour of the occupying path.
    pub color: Color,
}

/// A dot stamped onto the board, with the path currently passing through or ending on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DotCell {
    /// Dot id from the puzzle data.
    pub dot_id: String,
    /// Pair the dot belongs to.
    pub pair_id: PairId,
    /// Dot colour.
    pub color: Color,
    /// Path occupying the dot cell, if a line reaches it.
    pub path: Option<PathMark>,
}

/// The state of a single board cell.
///
/// A cell holds at most one path. Dot cells keep their dot and may additionally
/// carry the path of their own pair once a line reaches them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum CellState {
    /// No dot and no path.
    Empty,
    /// A dot, possibly with a path on it.
    Dot(DotCell),
    /// A plain cell covered by a path.
    Path(PathMark),
}

impl CellState {
    /// Returns the dot on this cell, if any.
    #[must_use]
    pub fn dot(&self) -> Option<&DotCell> {
        match self {
            CellState::Dot(dot) => Some(dot),
            CellState::Empty | CellState::Path(_) => None,
        }
    }

    /// Returns the path occupying this cell, if any.
    #[must_use]
    pub fn occupant(&self) -> Option<&PathMark> {
        match self {
            CellState::Empty => None,
            CellState::Dot(dot) => dot.path.as_ref(),
            CellState::Path(mark) => Some(mark),
        }
    }

    /// Returns `true` if a path of `pair_id` occupies this cell.
    #[must_use]
    pub fn is_occupied_by(&self, pair_id: &PairId) -> bool {
        self.occupant().is_some_and(|mark| &mark.pair_id == pair_id)
    }

    pub(crate) fn set_occupant(&mut self, mark: PathMark) {
        match self {
            CellState::Dot(dot) => dot.path = Some(mark),
            CellState::Empty | CellState::Path(_) => *self = CellState::Path(mark),
        }
    }

    /// Removes the occupant only if it belongs to `pair_id`.
    pub(crate) fn clear_occupant(&mut self, pair_id: &PairId) {
        if !self.is_occupied_by(pair_id) {
            return;
        }
        match self {
            CellState::Dot(dot) => dot.path = None,
            CellState::Path(_) => *self = CellState::Empty,
            CellState::Empty => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(pair: &str) -> PathMark {
        PathMark {
            pair_id: PairId::from(pair),
            color: Color::from("#000000"),
        }
    }

    fn dot(pair: &str) -> CellState {
        CellState::Dot(DotCell {
            dot_id: format!("{pair}-0"),
            pair_id: PairId::from(pair),
            color: Color::from("#000000"),
            path: None,
        })
    }

    #[test]
    fn occupy_and_clear_plain_cell() {
        let mut cell = CellState::Empty;
        cell.set_occupant(mark("red"));
        assert!(cell.is_path());
        assert!(cell.is_occupied_by(&PairId::from("red")));

        cell.clear_occupant(&PairId::from("blue"));
        assert!(cell.is_path());

        cell.clear_occupant(&PairId::from("red"));
        assert!(cell.is_empty());
    }

    #[test]
    fn dot_keeps_its_dot_when_cleared() {
        let mut cell = dot("red");
        assert!(cell.occupant().is_none());

        cell.set_occupant(mark("red"));
        assert!(cell.is_occupied_by(&PairId::from("red")));

        cell.clear_occupant(&PairId::from("red"));
        assert!(cell.is_dot());
        assert!(cell.occupant().is_none());
        assert_eq!(cell.dot().map(|d| d.pair_id.as_str()), Some("red"));
    }
}
