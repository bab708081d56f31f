//! Text protocol handling.
//!
//! Position and move notation, the engine command parser used by the main
//! loop, and JSON game records.

pub mod notation;
pub mod parser;
pub mod position;
pub mod record;

pub use notation::{format_move, format_moves, parse_move, parse_moves, NotationError};
pub use parser::{parse_command, Command};
pub use position::{encode_position, parse_position, START_POSITION};
pub use record::{GameRecord, RecordError};
