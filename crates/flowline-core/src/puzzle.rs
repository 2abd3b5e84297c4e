//! Puzzle data: dots, flows and whole puzzles.
//!
//! These types mirror the JSON puzzle contract:
//!
//! ```json
//! { "id": 0, "difficulty": "easy", "name": "Easy 1", "size": 2,
//!   "flows": [{ "pairId": "red", "color": "#FF5252",
//!               "dots": [{ "id": "red-0", "x": 0, "y": 0, "color": "#FF5252", "pairId": "red" },
//!                        { "id": "red-1", "x": 0, "y": 1, "color": "#FF5252", "pairId": "red" }],
//!               "solutionPath": [{ "x": 0, "y": 0 }, { "x": 0, "y": 1 }] }] }
//! ```

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Position;

/// Identity of a flow, linking its two dots and the path drawn between them.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    /// Creates a pair id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PairId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A display colour, typically a hex string such as `#FF5252`.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Creates a colour.
    #[must_use]
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    /// Returns the colour as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(color: &str) -> Self {
        Self::new(color)
    }
}

/// Difficulty tier a puzzle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Small boards with few flows.
    Easy,
    /// Mid-sized boards.
    Medium,
    /// Large boards.
    Hard,
}

impl Difficulty {
    /// All tiers from easiest to hardest.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Returns the lowercase tier name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty {name:?}, expected easy, medium or hard")]
pub struct DifficultyParseError {
    #[error(not(source))]
    name: String,
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DifficultyParseError { name: s.to_owned() })
    }
}

/// A flow endpoint.
///
/// `pair_id` must name the enclosing [`Flow`]; see [`Puzzle::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dot {
    /// Unique dot id, e.g. `red-0`.
    pub id: String,
    /// Cell the dot sits on.
    #[serde(flatten)]
    pub position: Position,
    /// Display colour.
    pub color: Color,
    /// Pair the dot belongs to.
    #[serde(rename = "pairId")]
    pub pair_id: PairId,
}

/// A dot pair and the connection the player must draw between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    /// Pair identity.
    pub pair_id: PairId,
    /// Display colour of the path.
    pub color: Color,
    /// The two endpoints.
    pub dots: [Dot; 2],
    /// Precomputed solution from one dot to the other, used only for hints.
    #[serde(default)]
    pub solution_path: Vec<Position>,
}

impl Flow {
    /// Returns the dot at `pos`, if any.
    #[must_use]
    pub fn dot_at(&self, pos: Position) -> Option<&Dot> {
        self.dots.iter().find(|dot| dot.position == pos)
    }

    /// Returns the endpoint that is not at `pos`, if `pos` is one of the endpoints.
    #[must_use]
    pub fn partner_of(&self, pos: Position) -> Option<&Dot> {
        let [a, b] = &self.dots;
        if a.position == pos {
            Some(b)
        } else if b.position == pos {
            Some(a)
        } else {
            None
        }
    }

    /// Returns `true` if the two endpoints are orthogonally adjacent.
    #[must_use]
    pub fn endpoints_adjacent(&self) -> bool {
        let [a, b] = &self.dots;
        a.position.is_adjacent(b.position)
    }

    /// Returns `true` if the solution path can be shown as a hint.
    ///
    /// Only the length is checked; the route itself is trusted.
    #[must_use]
    pub fn has_usable_solution(&self) -> bool {
        self.solution_path.len() >= 2
    }
}

/// An immutable puzzle definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Id within the difficulty tier (`0, 1, 2, ...`).
    pub id: u32,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Display name.
    pub name: String,
    /// Side length of the square grid.
    pub size: u8,
    /// The flows to connect.
    pub flows: Vec<Flow>,
}

impl Puzzle {
    /// Returns the flow with the given pair id.
    #[must_use]
    pub fn flow(&self, pair_id: &PairId) -> Option<&Flow> {
        self.flows.iter().find(|flow| &flow.pair_id == pair_id)
    }

    /// Returns the flow and dot located at `pos`, if any.
    #[must_use]
    pub fn dot_at(&self, pos: Position) -> Option<(&Flow, &Dot)> {
        self.flows
            .iter()
            .find_map(|flow| flow.dot_at(pos).map(|dot| (flow, dot)))
    }

    /// Returns the number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Checks the structural preconditions the game engine relies on.
    ///
    /// Solution paths are not checked; a bad one only degrades hints.
    ///
    /// # Errors
    ///
    /// Returns the first [`PuzzleError`] found:
    /// - [`PuzzleError::EmptyGrid`] if `size` is zero
    /// - [`PuzzleError::DuplicatePair`] if two flows share a pair id
    /// - [`PuzzleError::PairMismatch`] if a dot names another pair than its flow
    /// - [`PuzzleError::DotOutOfBounds`] if a dot lies outside the grid
    /// - [`PuzzleError::OverlappingDots`] if two dots share a cell
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.size == 0 {
            return Err(PuzzleError::EmptyGrid);
        }
        let mut pairs = HashSet::new();
        let mut occupied = HashSet::new();
        for flow in &self.flows {
            if !pairs.insert(&flow.pair_id) {
                return Err(PuzzleError::DuplicatePair {
                    pair_id: flow.pair_id.clone(),
                });
            }
            for dot in &flow.dots {
                if dot.pair_id != flow.pair_id {
                    return Err(PuzzleError::PairMismatch {
                        dot: dot.id.clone(),
                        expected: flow.pair_id.clone(),
                        found: dot.pair_id.clone(),
                    });
                }
                let pos = dot.position;
                if pos.x() >= self.size || pos.y() >= self.size {
                    return Err(PuzzleError::DotOutOfBounds {
                        dot: dot.id.clone(),
                        position: pos,
                        size: self.size,
                    });
                }
                if !occupied.insert(pos) {
                    return Err(PuzzleError::OverlappingDots { position: pos });
                }
            }
        }
        Ok(())
    }
}

/// Structural problems in puzzle data or text layouts.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleError {
    /// The grid has no cells.
    #[display("puzzle grid is empty")]
    EmptyGrid,
    /// The grid is larger than the coordinate type allows.
    #[display("puzzle grid of {size} rows is too large")]
    TooLarge {
        /// Number of rows found.
        #[error(not(source))]
        size: usize,
    },
    /// Two flows share a pair id.
    #[display("pair {pair_id} is defined more than once")]
    DuplicatePair {
        /// The repeated pair id.
        #[error(not(source))]
        pair_id: PairId,
    },
    /// A dot names a different pair from the flow holding it.
    #[display("dot {dot} belongs to pair {expected} but is tagged {found}")]
    PairMismatch {
        /// Dot id.
        #[error(not(source))]
        dot: String,
        /// Pair of the enclosing flow.
        expected: PairId,
        /// Pair named by the dot.
        found: PairId,
    },
    /// A dot lies outside the grid.
    #[display("dot {dot} at {position} lies outside the {size}x{size} grid")]
    DotOutOfBounds {
        /// Dot id.
        #[error(not(source))]
        dot: String,
        /// Dot position.
        position: Position,
        /// Grid size.
        size: u8,
    },
    /// Two dots share a cell.
    #[display("more than one dot at {position}")]
    OverlappingDots {
        /// Shared position.
        #[error(not(source))]
        position: Position,
    },
    /// A layout row has a different length from the number of rows.
    #[display("layout row {row} has {found} cells, expected {expected}")]
    NotSquare {
        /// Zero-based row index.
        row: usize,
        /// Expected number of cells.
        expected: usize,
        /// Number of cells found.
        found: usize,
    },
    /// A layout contains a character with no meaning.
    #[display("unexpected character {ch:?} at {position}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Where it was found.
        position: Position,
    },
    /// A layout colour does not appear exactly twice as a dot.
    #[display("colour {letter:?} has {count} dots, expected 2")]
    DotCount {
        /// Layout letter.
        letter: char,
        /// Number of dots found.
        count: usize,
    },
    /// No single path through a colour's solution cells joins its dots.
    #[display("cannot trace a solution path for pair {pair_id}")]
    UntraceableSolution {
        /// The pair whose solution could not be traced.
        #[error(not(source))]
        pair_id: PairId,
    },
}
