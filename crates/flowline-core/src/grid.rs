//! Square grid container indexed by [`Position`].

use std::ops::{Index, IndexMut};

use crate::Position;

/// A `size × size` container stored in row-major order.
///
/// Indexing with a [`Position`] outside the grid panics; use [`Grid::get`] for
/// checked access.
///
/// # Examples
///
/// ```
/// use flowline_core::{Grid, Position};
///
/// let mut grid = Grid::new(3, 0u32);
/// grid[Position::new(2, 1)] = 7;
///
/// assert_eq!(grid.get(Position::new(2, 1)), Some(&7));
/// assert_eq!(grid.get(Position::new(3, 0)), None);
/// assert_eq!(grid.positions().count(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    size: u8,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a grid by calling `f` for every position in row-major order.
    pub fn from_fn<F>(size: u8, mut f: F) -> Self
    where
        F: FnMut(Position) -> T,
    {
        let cells = positions(size).map(&mut f).collect();
        Self { size, cells }
    }

    /// Returns the side length.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Returns the number of cells (`size * size`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` for a zero-sized grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x() < self.size && pos.y() < self.size
    }

    /// Returns the cell at `pos`, or `None` if it lies outside the grid.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.offset(pos).map(|i| &self.cells[i])
    }

    /// Returns the cell at `pos` mutably, or `None` if it lies outside the grid.
    #[must_use]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        self.offset(pos).map(|i| &mut self.cells[i])
    }

    /// Returns all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        positions(self.size)
    }

    /// Returns `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        positions(self.size).zip(&self.cells)
    }

    /// Returns the cells row by row.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(usize::from(self.size).max(1))
    }

    fn offset(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| usize::from(pos.y()) * usize::from(self.size) + usize::from(pos.x()))
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `value`.
    #[must_use]
    pub fn new(size: u8, value: T) -> Self {
        let len = usize::from(size) * usize::from(size);
        Self {
            size,
            cells: vec![value; len],
        }
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Position) -> &T {
        let size = self.size;
        self.get(pos)
            .unwrap_or_else(|| panic!("position {pos} outside {size}x{size} grid"))
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, pos: Position) -> &mut T {
        let size = self.size;
        self.get_mut(pos)
            .unwrap_or_else(|| panic!("position {pos} outside {size}x{size} grid"))
    }
}

fn positions(size: u8) -> impl Iterator<Item = Position> {
    (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
}
