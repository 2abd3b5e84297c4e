//! Mapping raw pointer coordinates onto board cells.
//!
//! The engine only ever sees [`Position`]s. A frontend implements
//! [`CellMapper`] for its drawing surface, or uses [`BoardTransform`] when the
//! board is drawn as a uniformly scaled square of cells.

use flowline_core::Position;

/// A pointer location in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downwards.
    pub y: f32,
}

impl PointerPos {
    /// Creates a pointer position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Translates pointer positions into board cells.
pub trait CellMapper {
    /// Returns the cell under `point`, or `None` if the point is off the board.
    fn cell_at(&self, point: PointerPos) -> Option<Position>;
}

impl<F> CellMapper for F
where
    F: Fn(PointerPos) -> Option<Position>,
{
    fn cell_at(&self, point: PointerPos) -> Option<Position> {
        self(point)
    }
}

/// The view transform of a board drawn as `size` x `size` square cells.
///
/// A cell at column `x` and row `y` covers the surface rectangle starting at
/// `origin + (x, y) * cell_size * scale`.
///
/// # Example
///
/// ```
/// use flowline_core::Position;
/// use flowline_game::pointer::{BoardTransform, CellMapper, PointerPos};
///
/// let transform = BoardTransform::new(5, 40.0).with_origin(PointerPos::new(10.0, 10.0));
/// assert_eq!(transform.cell_at(PointerPos::new(10.0, 10.0)), Some(Position::new(0, 0)));
/// assert_eq!(transform.cell_at(PointerPos::new(95.0, 60.0)), Some(Position::new(2, 1)));
/// assert_eq!(transform.cell_at(PointerPos::new(9.0, 20.0)), None);
/// assert_eq!(transform.cell_at(PointerPos::new(210.0, 20.0)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardTransform {
    origin: PointerPos,
    scale: f32,
    cell_size: f32,
    size: u8,
}

impl BoardTransform {
    /// Creates an unscaled transform with the board's top-left corner at the surface origin.
    #[must_use]
    pub const fn new(size: u8, cell_size: f32) -> Self {
        Self {
            origin: PointerPos::new(0.0, 0.0),
            scale: 1.0,
            cell_size,
            size,
        }
    }

    /// Moves the board's top-left corner to `origin`.
    #[must_use]
    pub const fn with_origin(mut self, origin: PointerPos) -> Self {
        self.origin = origin;
        self
    }

    /// Applies a uniform zoom factor.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Returns the side length of one cell on the surface.
    #[must_use]
    pub fn scaled_cell_size(&self) -> f32 {
        self.cell_size * self.scale
    }

    /// Returns the surface coordinates of the centre of `pos`.
    #[must_use]
    pub fn cell_center(&self, pos: Position) -> PointerPos {
        let step = self.scaled_cell_size();
        PointerPos::new(
            self.origin.x + (f32::from(pos.x()) + 0.5) * step,
            self.origin.y + (f32::from(pos.y()) + 0.5) * step,
        )
    }

    fn axis_index(&self, offset: f32) -> Option<u8> {
        let step = self.scaled_cell_size();
        if step <= 0.0 {
            return None;
        }
        let index = (offset / step).floor();
        if !(0.0..f32::from(self.size)).contains(&index) {
            return None;
        }
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = index as u8;
        Some(index)
    }
}

impl CellMapper for BoardTransform {
    fn cell_at(&self, point: PointerPos) -> Option<Position> {
        let x = self.axis_index(point.x - self.origin.x)?;
        let y = self.axis_index(point.y - self.origin.y)?;
        Some(Position::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_transform() {
        let transform = BoardTransform::new(4, 10.0)
            .with_origin(PointerPos::new(100.0, 50.0))
            .with_scale(2.0);
        assert!((transform.scaled_cell_size() - 20.0).abs() < f32::EPSILON);
        assert_eq!(
            transform.cell_at(PointerPos::new(100.0, 50.0)),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            transform.cell_at(PointerPos::new(179.9, 129.9)),
            Some(Position::new(3, 3))
        );
        assert_eq!(transform.cell_at(PointerPos::new(180.0, 60.0)), None);
        assert_eq!(transform.cell_at(PointerPos::new(99.9, 60.0)), None);
    }

    #[test]
    fn test_cell_center_round_trips() {
        let transform = BoardTransform::new(6, 32.0).with_origin(PointerPos::new(-8.0, 4.0));
        for y in 0..6 {
            for x in 0..6 {
                let pos = Position::new(x, y);
                assert_eq!(transform.cell_at(transform.cell_center(pos)), Some(pos));
            }
        }
    }

    #[test]
    fn test_degenerate_transform_maps_nothing() {
        let transform = BoardTransform::new(3, 0.0);
        assert_eq!(transform.cell_at(PointerPos::new(0.0, 0.0)), None);
        let nan = PointerPos::new(f32::NAN, 0.0);
        assert_eq!(BoardTransform::new(3, 10.0).cell_at(nan), None);
    }

    #[test]
    fn test_closure_mapper() {
        let mapper = |p: PointerPos| (p.x >= 0.0).then_some(Position::new(0, 0));
        assert_eq!(mapper.cell_at(PointerPos::new(1.0, 1.0)), Some(Position::new(0, 0)));
        assert_eq!(mapper.cell_at(PointerPos::new(-1.0, 1.0)), None);
    }
}
