//! Core data structures for flowline puzzles.
//!
//! This crate provides the immutable building blocks shared by the game engine,
//! the puzzle catalog and the application layer.
//!
//! # Overview
//!
//! 1. **Coordinates and containers**
//!    - [`position`]: Grid cell coordinates `(x, y)` with orthogonal adjacency helpers
//!    - [`grid`]: A square, row-major container indexed by [`Position`]
//!
//! 2. **Puzzle data** - The content a game is played on
//!    - [`puzzle`]: [`Puzzle`], [`Flow`], [`Dot`] and their identifiers
//!    - [`palette`]: Named colours and the letters used by text layouts
//!    - [`layout`]: Building puzzles from ASCII layouts
//!
//! Puzzle data is supplied externally and never mutated by the engine. Use
//! [`Puzzle::validate`] to check the structural preconditions the engine assumes.
//!
//! # Examples
//!
//! ```
//! use flowline_core::{Difficulty, Position, Puzzle};
//!
//! let puzzle = Puzzle::from_layout(
//!     0,
//!     Difficulty::Easy,
//!     "Tiny",
//!     "
//!     RB
//!     RB
//!     ",
//! )
//! .unwrap();
//!
//! assert_eq!(puzzle.size, 2);
//! assert_eq!(puzzle.flows.len(), 2);
//! assert!(puzzle.dot_at(Position::new(0, 1)).is_some());
//! ```

pub mod grid;
pub mod layout;
pub mod palette;
pub mod position;
pub mod puzzle;

pub use self::{
    grid::Grid,
    position::{Position, PositionParseError},
    puzzle::{Color, Difficulty, DifficultyParseError, Dot, Flow, PairId, Puzzle, PuzzleError},
};
