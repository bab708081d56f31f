//! Move types.
//!
//! `AllowedMove` covers every action that can appear in a turn: the four
//! player relocations/deployments, `Skip`, and the auto-captures the engine
//! applies itself. The data model maps one-to-one onto move notation, so two
//! equal values always print the same string.

use super::coord::{Coord, Orientation};
use super::unit::UnitKind;

/// Why the engine removed a piece on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureCause {
    /// Left standing in an enemy bombardment zone at the start of the enemy's turn.
    Bombardment,
    /// Undefended artillery overrun by an adjacent attacker.
    Overwhelm,
}

/// A single action within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowedMove {
    /// Non-artillery relocation: `b2b3`, optionally capturing: `b2b3xc4`.
    Move {
        from: Coord,
        to: Coord,
        capture: Option<Coord>,
    },

    /// Artillery relocation (possibly in place) plus a new facing: `b1b2^`.
    MoveAndOrient {
        from: Coord,
        to: Coord,
        facing: Orientation,
    },

    /// Deploy a reserve piece: `ria1`.
    Reinforce {
        kind: UnitKind,
        to: Coord,
    },

    /// Turn an artillery piece without moving: `b1>`.
    ChangeOrientation {
        at: Coord,
        facing: Orientation,
    },

    /// Removal applied by the engine: `sbc4` or `sfc4`.
    AutoCapture {
        cause: CaptureCause,
        target: Coord,
    },

    /// End the turn early: `skip`.
    Skip,
}

impl AllowedMove {
    /// True for actions a player issues; these count toward the per-turn cap.
    pub fn is_player_move(&self) -> bool {
        !matches!(self, AllowedMove::AutoCapture { .. } | AllowedMove::Skip)
    }

    /// The square the acting piece ends up on, if any.
    pub fn landing_square(&self) -> Option<Coord> {
        match *self {
            AllowedMove::Move { to, .. } => Some(to),
            AllowedMove::MoveAndOrient { to, .. } => Some(to),
            AllowedMove::Reinforce { to, .. } => Some(to),
            AllowedMove::ChangeOrientation { at, .. } => Some(at),
            AllowedMove::AutoCapture { .. } | AllowedMove::Skip => None,
        }
    }

    /// The square the acting piece starts on, for on-board pieces.
    pub fn origin_square(&self) -> Option<Coord> {
        match *self {
            AllowedMove::Move { from, .. } => Some(from),
            AllowedMove::MoveAndOrient { from, .. } => Some(from),
            AllowedMove::ChangeOrientation { at, .. } => Some(at),
            _ => None,
        }
    }

    /// Rewrites an in-place reorientation as the equivalent stationary
    /// `MoveAndOrient`, the form the move generator emits.
    pub fn normalized(self) -> AllowedMove {
        match self {
            AllowedMove::ChangeOrientation { at, facing } => {
                AllowedMove::MoveAndOrient { from: at, to: at, facing }
            }
            other => other,
        }
    }
}
