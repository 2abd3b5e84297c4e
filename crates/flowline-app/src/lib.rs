//! Play sessions and the terminal frontend for flowline.
//!
//! A [`session::Session`] wraps the interaction controller of `flowline-game`
//! with the parts of a game that outlive a single gesture: the hint budget,
//! undo history, and the record of completed levels.
#![allow(missing_docs, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod cli;
pub mod hint;
pub mod history;
pub mod progress;
pub mod render;
pub mod script;
pub mod session;
pub mod settings;
