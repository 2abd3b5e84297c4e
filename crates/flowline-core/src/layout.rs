//! Building puzzles from ASCII layouts.
//!
//! A layout is one line per row. Whitespace inside a row is ignored and blank
//! lines are skipped, so layouts can be indented freely in source code.
//!
//! - An uppercase [palette](crate::palette) letter is a dot of that colour.
//! - `.` is an empty cell ([`Puzzle::from_layout`] only).
//! - A lowercase palette letter is a solution cell of that colour
//!   ([`Puzzle::from_solved_layout`] only).
//!
//! Flows are ordered by the first appearance of their colour in row-major order.
//! Dot ids are `<colour>-0` and `<colour>-1`, the first being the dot met first.
//!
//! # Examples
//!
//! ```
//! use flowline_core::{Difficulty, Position, Puzzle};
//!
//! let puzzle = Puzzle::from_solved_layout(
//!     0,
//!     Difficulty::Easy,
//!     "Hook",
//!     "
//!     R r
//!     B R
//!     ",
//! );
//! // Blue has a single dot.
//! assert!(puzzle.is_err());
//!
//! let puzzle = Puzzle::from_solved_layout(
//!     0,
//!     Difficulty::Easy,
//!     "Hook",
//!     "
//!     R r B
//!     B R b
//!     b b b
//!     ",
//! )
//! .unwrap();
//! let red = &puzzle.flows[0];
//! assert_eq!(
//!     red.solution_path,
//!     vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
//! );
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    Color, Difficulty, Dot, Flow, PairId, Position, Puzzle, PuzzleError,
    palette::{self, PaletteEntry},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Empty,
    Dot(char),
    Solution(char),
}

impl Puzzle {
    /// Builds a puzzle from a layout of dots and empty cells.
    ///
    /// The resulting flows have empty solution paths.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if the layout is not square, contains an unknown
    /// character, or a colour does not have exactly two dots.
    pub fn from_layout(
        id: u32,
        difficulty: Difficulty,
        name: &str,
        layout: &str,
    ) -> Result<Self, PuzzleError> {
        let (size, marks) = parse(layout, false)?;
        let flows = collect_dots(&marks)?
            .into_iter()
            .map(|(entry, dots)| build_flow(entry, dots, Vec::new()))
            .collect();
        let puzzle = Self {
            id,
            difficulty,
            name: name.to_owned(),
            size,
            flows,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Builds a puzzle from a fully solved layout.
    ///
    /// Every cell must be a dot or a solution cell. Each colour's solution path
    /// is traced from its first dot through all of its cells to its second dot.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if the layout is malformed, contains an empty
    /// cell, or a colour's cells do not form a single simple path between its dots.
    pub fn from_solved_layout(
        id: u32,
        difficulty: Difficulty,
        name: &str,
        layout: &str,
    ) -> Result<Self, PuzzleError> {
        let (size, marks) = parse(layout, true)?;
        let mut cells: BTreeMap<char, BTreeSet<Position>> = BTreeMap::new();
        for (&pos, &mark) in &marks {
            match mark {
                Mark::Dot(letter) | Mark::Solution(letter) => {
                    cells.entry(letter).or_default().insert(pos);
                }
                Mark::Empty => unreachable!("solved layouts reject empty cells while parsing"),
            }
        }

        let mut flows = Vec::new();
        for (entry, dots) in collect_dots(&marks)? {
            let own_cells = &cells[&entry.letter];
            let path = trace(dots[0], dots[1], own_cells).ok_or_else(|| {
                PuzzleError::UntraceableSolution {
                    pair_id: PairId::from(entry.name),
                }
            })?;
            flows.push(build_flow(entry, dots, path));
        }

        let puzzle = Self {
            id,
            difficulty,
            name: name.to_owned(),
            size,
            flows,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }
}

fn parse(layout: &str, solved: bool) -> Result<(u8, BTreeMap<Position, Mark>), PuzzleError> {
    let rows: Vec<Vec<char>> = layout
        .lines()
        .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
        .filter(|row| !row.is_empty())
        .collect();
    if rows.is_empty() {
        return Err(PuzzleError::EmptyGrid);
    }
    let size = u8::try_from(rows.len()).map_err(|_| PuzzleError::TooLarge { size: rows.len() })?;

    let mut marks = BTreeMap::new();
    for (y, row) in (0..size).zip(&rows) {
        if row.len() != rows.len() {
            return Err(PuzzleError::NotSquare {
                row: usize::from(y),
                expected: rows.len(),
                found: row.len(),
            });
        }
        for (x, &ch) in (0..size).zip(row) {
            let position = Position::new(x, y);
            let mark = match ch {
                '.' if !solved => Mark::Empty,
                c if c.is_ascii_uppercase() && palette::by_letter(c).is_some() => Mark::Dot(c),
                c if solved && c.is_ascii_lowercase() && palette::by_letter(c).is_some() => {
                    Mark::Solution(c.to_ascii_uppercase())
                }
                ch => return Err(PuzzleError::UnexpectedChar { ch, position }),
            };
            marks.insert(position, mark);
        }
    }
    Ok((size, marks))
}

fn collect_dots(
    marks: &BTreeMap<Position, Mark>,
) -> Result<Vec<(&'static PaletteEntry, [Position; 2])>, PuzzleError> {
    // Ordered by first appearance, row-major.
    let mut order: Vec<char> = Vec::new();
    let mut found: BTreeMap<char, Vec<Position>> = BTreeMap::new();
    for (&pos, &mark) in marks {
        let (Mark::Dot(letter) | Mark::Solution(letter)) = mark else {
            continue;
        };
        if !order.contains(&letter) {
            order.push(letter);
        }
        if let Mark::Dot(_) = mark {
            found.entry(letter).or_default().push(pos);
        }
    }

    let mut dots = Vec::with_capacity(order.len());
    for letter in order {
        let positions = found.remove(&letter).unwrap_or_default();
        let &[a, b] = positions.as_slice() else {
            return Err(PuzzleError::DotCount {
                letter,
                count: positions.len(),
            });
        };
        let Some(entry) = palette::by_letter(letter) else {
            unreachable!("parse only accepts palette letters");
        };
        dots.push((entry, [a, b]));
    }
    Ok(dots)
}

fn build_flow(entry: &PaletteEntry, dots: [Position; 2], solution_path: Vec<Position>) -> Flow {
    let color = Color::from(entry.hex);
    let pair_id = PairId::from(entry.name);
    let [a, b] = dots;
    let dot = |i: usize, position| Dot {
        id: format!("{}-{i}", entry.name),
        position,
        color: color.clone(),
        pair_id: pair_id.clone(),
    };
    Flow {
        pair_id: pair_id.clone(),
        color: color.clone(),
        dots: [dot(0, a), dot(1, b)],
        solution_path,
    }
}

/// Finds a simple path from `start` to `end` that visits every cell in `cells`.
fn trace(start: Position, end: Position, cells: &BTreeSet<Position>) -> Option<Vec<Position>> {
    fn walk(
        path: &mut Vec<Position>,
        visited: &mut BTreeSet<Position>,
        end: Position,
        cells: &BTreeSet<Position>,
    ) -> bool {
        let current = *path.last().unwrap_or(&end);
        if current == end {
            return visited.len() == cells.len();
        }
        for next in current.neighbors() {
            if !cells.contains(&next) || visited.contains(&next) {
                continue;
            }
            path.push(next);
            visited.insert(next);
            if walk(path, visited, end, cells) {
                return true;
            }
            visited.remove(&next);
            path.pop();
        }
        false
    }

    let mut path = vec![start];
    let mut visited = BTreeSet::from([start]);
    walk(&mut path, &mut visited, end, cells).then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_layout_orders_flows_by_first_appearance() {
        let puzzle = Puzzle::from_layout(
            7,
            Difficulty::Medium,
            "Order",
            "
            B . R
            . . .
            R . B
            ",
        )
        .unwrap();
        assert_eq!(puzzle.id, 7);
        assert_eq!(puzzle.size, 3);
        let names: Vec<&str> = puzzle.flows.iter().map(|f| f.pair_id.as_str()).collect();
        assert_eq!(names, vec!["blue", "red"]);
        assert_eq!(puzzle.flows[0].dots[0].id, "blue-0");
        assert_eq!(puzzle.flows[0].dots[1].position, Position::new(2, 2));
        assert!(puzzle.flows.iter().all(|f| f.solution_path.is_empty()));
    }

    #[test]
    fn test_from_layout_errors() {
        let not_square = Puzzle::from_layout(0, Difficulty::Easy, "x", "R.R\n...");
        assert!(matches!(not_square, Err(PuzzleError::NotSquare { .. })));

        let unknown = Puzzle::from_layout(0, Difficulty::Easy, "x", "RX\nR.");
        assert_eq!(
            unknown,
            Err(PuzzleError::UnexpectedChar {
                ch: 'X',
                position: Position::new(1, 0)
            })
        );

        let three = Puzzle::from_layout(0, Difficulty::Easy, "x", "RR\nR.");
        assert_eq!(three, Err(PuzzleError::DotCount { letter: 'R', count: 3 }));

        let lowercase = Puzzle::from_layout(0, Difficulty::Easy, "x", "Rr\nR.");
        assert!(matches!(lowercase, Err(PuzzleError::UnexpectedChar { ch: 'r', .. })));

        assert_eq!(
            Puzzle::from_layout(0, Difficulty::Easy, "x", "  \n"),
            Err(PuzzleError::EmptyGrid)
        );
    }

    #[test]
    fn test_from_solved_layout_rejects_dead_ends() {
        let puzzle = Puzzle::from_solved_layout(
            0,
            Difficulty::Easy,
            "Dead end",
            "
            R r r
            B b r
            B R r
            ",
        );
        // Blue cell (1, 1) hangs off the direct B-B step.
        assert_eq!(
            puzzle,
            Err(PuzzleError::UntraceableSolution {
                pair_id: PairId::from("blue")
            })
        );
    }

    #[test]
    fn test_from_solved_layout_traces_paths() {
        let puzzle = Puzzle::from_solved_layout(
            0,
            Difficulty::Easy,
            "Snake",
            "
            R r r
            B b r
            B b R
            ",
        )
        .unwrap();
        let red = puzzle.flow(&PairId::from("red")).unwrap();
        assert_eq!(
            red.solution_path,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
            ]
        );
        let blue = puzzle.flow(&PairId::from("blue")).unwrap();
        assert_eq!(
            blue.solution_path,
            vec![
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(0, 2),
            ]
        );
    }

    #[test]
    fn test_from_solved_layout_rejects_empty_cells() {
        let puzzle = Puzzle::from_solved_layout(0, Difficulty::Easy, "x", "R.\nR.");
        assert!(matches!(puzzle, Err(PuzzleError::UnexpectedChar { ch: '.', .. })));
    }

    #[test]
    fn test_solution_paths_are_adjacent_steps() {
        let puzzle = Puzzle::from_solved_layout(
            0,
            Difficulty::Hard,
            "Spiral",
            "
            R r r r
            b b B r
            b Y Y r
            B R r r
            ",
        )
        .unwrap();
        for flow in &puzzle.flows {
            let path = &flow.solution_path;
            assert_eq!(path.first(), Some(&flow.dots[0].position));
            assert_eq!(path.last(), Some(&flow.dots[1].position));
            assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
        }
    }
}
