//! Rule variants and time control.

use serde::{Deserialize, Serialize};

/// Player-issued moves per turn in the standard game.
pub const STANDARD_MOVES_PER_TURN: usize = 3;

/// Player-issued moves per turn under the four-move variant.
pub const VARIANT_MOVES_PER_TURN: usize = 4;

/// Game configuration fixed at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Allow four moves per turn instead of three.
    pub four_move_variant: bool,
    /// Whether `skip` is offered. Without it a side can run out of moves.
    pub allow_skip: bool,
    /// Per-player time budget in the caller's time unit; `None` is untimed.
    pub time_control: Option<u64>,
    /// Time forgiven at the end of every turn.
    pub turn_bonus: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            four_move_variant: false,
            allow_skip: true,
            time_control: None,
            turn_bonus: 0,
        }
    }
}

impl Rules {
    pub fn moves_per_turn(&self) -> usize {
        if self.four_move_variant {
            VARIANT_MOVES_PER_TURN
        } else {
            STANDARD_MOVES_PER_TURN
        }
    }
}
