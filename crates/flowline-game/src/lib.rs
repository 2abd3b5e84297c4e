//! Path drawing engine for flowline puzzles.
//!
//! # Overview
//!
//! 1. **Board** - Cell occupancy
//!    - [`cell`]: [`CellState`], a cell that is empty, holds a dot, or is covered by a path
//!    - [`board`]: [`Board`] and the pure [`Board::apply_path`] transform
//!
//! 2. **Path engine** - Drawing rules
//!    - [`path`]: [`DrawnPath`], one player-drawn line per pair
//!    - [`game`]: [`Game`], which validates moves, extends and retraces the active
//!      path, and commits or discards it
//!    - [`win`]: [`Game::is_solved`], all pairs connected and every cell covered
//!
//! 3. **Input** - From pointer events to engine calls
//!    - [`controller`]: [`Controller`] for drag-drawing and tap-to-connect
//!    - [`pointer`]: [`CellMapper`](pointer::CellMapper) and
//!      [`BoardTransform`](pointer::BoardTransform) for surface-to-cell mapping
//!
//! Player input never produces errors. Every operation returns an outcome
//! describing what happened, including refusals.
//!
//! # Examples
//!
//! ```
//! use flowline_core::{Difficulty, Position, Puzzle};
//! use flowline_game::{Controller, InteractionEvent};
//!
//! let puzzle = Puzzle::from_layout(
//!     0,
//!     Difficulty::Easy,
//!     "Corner",
//!     "
//!     R . .
//!     . . .
//!     . . R
//!     ",
//! )
//! .unwrap();
//! let mut controller = Controller::new(puzzle);
//!
//! controller.press(Position::new(0, 0));
//! for (x, y) in [(1, 0), (2, 0), (2, 1), (2, 2)] {
//!     controller.move_to(Position::new(x, y));
//! }
//! let outcome = controller.release();
//! assert!(matches!(outcome.event, InteractionEvent::Committed(_)));
//! assert!(!controller.is_solved()); // four cells remain empty
//! ```

pub mod board;
pub mod cell;
pub mod controller;
pub mod game;
pub mod outcome;
pub mod path;
pub mod pointer;
pub mod testing;
pub mod win;

pub use self::{
    board::{ApplyMode, Board},
    cell::{CellState, DotCell, PathMark},
    controller::{Controller, InteractionEvent, InteractionOutcome, Selection},
    game::Game,
    outcome::{
        BeginOutcome, CommitOutcome, ConnectOutcome, ConnectRejection, MoveOutcome, MoveRejection,
    },
    path::DrawnPath,
    win::Progress,
};
