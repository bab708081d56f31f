//! Position evaluation.
//!
//! Scores a board for use by search or automated play: positive favours Red.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, evaluate_for, material_value};
