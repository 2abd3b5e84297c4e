//! Grid cell coordinates.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A cell coordinate on a puzzle grid.
///
/// `x` is the column and `y` the row, with `(0, 0)` at the top-left corner.
/// Positions are not tied to a particular grid size; bounds are checked by
/// [`Grid::contains`](crate::Grid::contains).
///
/// Positions order row-major (by `y`, then `x`).
///
/// # Examples
///
/// ```
/// use flowline_core::Position;
///
/// let a = Position::new(1, 1);
/// assert!(a.is_adjacent(Position::new(1, 2)));
/// assert!(!a.is_adjacent(Position::new(2, 2)));
/// assert_eq!(a.manhattan_distance(Position::new(3, 0)), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Creates a position from a column and a row.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Returns the column.
    #[must_use]
    pub const fn x(self) -> u8 {
        self.x
    }

    /// Returns the row.
    #[must_use]
    pub const fn y(self) -> u8 {
        self.y
    }

    /// Returns `|dx| + |dy|` between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u16 {
        u16::from(self.x.abs_diff(other.x)) + u16::from(self.y.abs_diff(other.y))
    }

    /// Returns `true` if `other` is an orthogonal neighbour (Manhattan distance exactly 1).
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Returns the position one row above, or `None` on the top row.
    #[must_use]
    pub fn up(self) -> Option<Self> {
        Some(Self::new(self.x, self.y.checked_sub(1)?))
    }

    /// Returns the position one row below, or `None` on overflow.
    #[must_use]
    pub fn down(self) -> Option<Self> {
        Some(Self::new(self.x, self.y.checked_add(1)?))
    }

    /// Returns the position one column to the left, or `None` on the first column.
    #[must_use]
    pub fn left(self) -> Option<Self> {
        Some(Self::new(self.x.checked_sub(1)?, self.y))
    }

    /// Returns the position one column to the right, or `None` on overflow.
    #[must_use]
    pub fn right(self) -> Option<Self> {
        Some(Self::new(self.x.checked_add(1)?, self.y))
    }

    /// Returns the orthogonal neighbours in up, down, left, right order.
    ///
    /// Neighbours are not bounds-checked against any grid.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        [self.up(), self.down(), self.left(), self.right()]
            .into_iter()
            .flatten()
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error returned when parsing a [`Position`] from `"x,y"` text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid position {input:?}, expected \"x,y\"")]
pub struct PositionParseError {
    #[error(not(source))]
    input: String,
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PositionParseError {
            input: s.to_owned(),
        };
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Self::new(x, y))
    }
}
