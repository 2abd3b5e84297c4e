use flowline_core::{Color, PairId, Position};

use crate::PathMark;

/// A line drawn by the player for one pair.
///
/// Consecutive points are always orthogonally adjacent and no point repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawnPath {
    id: PairId,
    color: Color,
    points: Vec<Position>,
    complete: bool,
}

impl DrawnPath {
    /// Creates an empty, incomplete path.
    #[must_use]
    pub fn new(id: PairId, color: Color) -> Self {
        Self {
            id,
            color,
            points: Vec::new(),
            complete: false,
        }
    }

    /// Creates a path from a list of points, marked complete or not.
    ///
    /// Returns `None` if two consecutive points are not adjacent or a point repeats.
    #[must_use]
    pub fn from_points(id: PairId, color: Color, points: Vec<Position>, complete: bool) -> Option<Self> {
        let adjacent = points.windows(2).all(|w| w[0].is_adjacent(w[1]));
        let distinct = points
            .iter()
            .enumerate()
            .all(|(i, p)| !points[..i].contains(p));
        (adjacent && distinct).then_some(Self {
            id,
            color,
            points,
            complete,
        })
    }

    /// Returns the pair id.
    #[must_use]
    pub fn id(&self) -> &PairId {
        &self.id
    }

    /// Returns the colour.
    #[must_use]
    pub fn color(&self) -> &Color {
        &self.color
    }

    /// Returns the points from start to end.
    #[must_use]
    pub fn points(&self) -> &[Position] {
        &self.points
    }

    /// Returns `true` once the path has been committed between both dots.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the path has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the first point.
    #[must_use]
    pub fn start(&self) -> Option<Position> {
        self.points.first().copied()
    }

    /// Returns the last point.
    #[must_use]
    pub fn last(&self) -> Option<Position> {
        self.points.last().copied()
    }

    /// Returns the index of `pos` within the path.
    #[must_use]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.points.iter().position(|&p| p == pos)
    }

    /// Returns `true` if the path passes through `pos`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.points.contains(&pos)
    }

    /// Returns the occupancy mark stamped on cells covered by this path.
    #[must_use]
    pub fn mark(&self) -> PathMark {
        PathMark {
            pair_id: self.id.clone(),
            color: self.color.clone(),
        }
    }

    /// Returns `true` if the path holds stale points from an abandoned attempt.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.complete && !self.points.is_empty()
    }

    pub(crate) fn push(&mut self, pos: Position) {
        self.points.push(pos);
    }

    /// Keeps the first `len` points and returns the removed suffix.
    pub(crate) fn truncate(&mut self, len: usize) -> Vec<Position> {
        if len >= self.points.len() {
            return Vec::new();
        }
        self.points.split_off(len)
    }

    pub(crate) fn reset(&mut self) {
        self.points.clear();
        self.complete = false;
    }

    pub(crate) fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> DrawnPath {
        DrawnPath::new(PairId::from("red"), Color::from("#FF5252"))
    }

    #[test]
    fn test_truncate_returns_suffix() {
        let mut path = red();
        for x in 0..4 {
            path.push(Position::new(x, 0));
        }
        assert_eq!(path.index_of(Position::new(1, 0)), Some(1));

        let removed = path.truncate(2);
        assert_eq!(removed, vec![Position::new(2, 0), Position::new(3, 0)]);
        assert_eq!(path.last(), Some(Position::new(1, 0)));
        assert!(path.truncate(5).is_empty());
    }

    #[test]
    fn test_from_points_checks_shape() {
        let id = PairId::from("red");
        let color = Color::from("#FF5252");
        let ok = vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)];
        assert!(DrawnPath::from_points(id.clone(), color.clone(), ok, true).is_some());

        let jump = vec![Position::new(0, 0), Position::new(2, 0)];
        assert!(DrawnPath::from_points(id.clone(), color.clone(), jump, false).is_none());

        let repeat = vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 0)];
        assert!(DrawnPath::from_points(id, color, repeat, false).is_none());
    }

    #[test]
    fn test_partial() {
        let mut path = red();
        assert!(!path.is_partial());
        path.push(Position::new(0, 0));
        assert!(path.is_partial());
        path.set_complete(true);
        assert!(!path.is_partial());
        path.reset();
        assert!(path.is_empty());
        assert!(!path.is_complete());
    }
}
