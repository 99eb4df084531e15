//! Conway's Game of Life on a wrapped grid with fading death trails
//!
//! The [`engine`] module holds the automaton itself. The remaining modules
//! are the terminal front end that drives it.

pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod screenshot;
pub mod settings;
pub mod terminal;
pub mod viz;

pub use engine::{Cell, Life, ALIVE_COLOR, DEAD_COLOR};
pub use error::{Error, Result};
