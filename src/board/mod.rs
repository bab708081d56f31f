//! Board representation and game-state types.
//!
//! Contains the unit catalog, coordinates, the board and reserve model, and
//! the move type shared by every other module.

pub mod coord;
pub mod moves;
pub mod rules;
pub mod state;
pub mod unit;

pub use coord::{
    all_coords, Coord, Orientation, Player, ALL_ORIENTATIONS, ALL_PLAYERS, BOARD_SIZE, SQUARE_COUNT,
};
pub use moves::{AllowedMove, CaptureCause};
pub use rules::{Rules, STANDARD_MOVES_PER_TURN, VARIANT_MOVES_PER_TURN};
pub use state::{Board, InvariantViolation, Piece, Position, ReserveFleet};
pub use unit::{UnitClass, UnitInfo, UnitKind, ALL_UNIT_KINDS, UNIT_INFO, UNIT_KIND_COUNT};
