//! Move resolution.
//!
//! Bombardment zones, capture rules, the turn reducer, game-over detection,
//! and replay-based history.

pub mod bombardment;
pub mod capture;
pub mod history;
pub mod outcome;
pub mod turn;

pub use bombardment::BombardmentMap;
pub use capture::{is_engaged, outnumbering_candidates, overrun_targets};
pub use history::{replay, GameHistory, LoggedMove};
pub use outcome::{game_over, GameOutcome, OutcomeReason};
pub use turn::{apply_move, apply_move_timed, GameState, MoveError};
