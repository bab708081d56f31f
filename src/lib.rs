//! Gridfront rules engine library.
//!
//! Exposes the board representation, move generation, turn resolution,
//! notation, and controller-facing modules for use by integration tests and
//! the binary entry points.

pub mod board;
pub mod engine;
pub mod eval;
pub mod logging;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod selection;
pub mod selfplay;
