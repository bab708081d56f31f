//! Persisted game records.
//!
//! A record is the starting position, the rules, and the player-issued moves
//! in notation. Loading a record replays it through the turn reducer, so a
//! corrupt or tampered log fails loudly instead of producing a bad state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{AllowedMove, Rules};
use crate::resolve::{apply_move, GameHistory, GameState, MoveError};

use super::notation::{format_move, parse_move, NotationError};
use super::position::{encode_position, parse_position};

/// Errors raised while loading or replaying a record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bad notation in record: {0}")]
    Notation(#[from] NotationError),

    #[error("move {index} of record rejected: {source}")]
    Replay { index: usize, source: MoveError },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Starting position notation.
    pub initial: String,
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub rules: Rules,
}

impl GameRecord {
    /// Captures the moves up to the history's cursor.
    pub fn from_history(history: &GameHistory) -> Self {
        let initial = history.initial();
        GameRecord {
            initial: encode_position(&initial.position),
            moves: history.moves().map(|m| format_move(&m)).collect(),
            rules: initial.rules,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuilds the game by replaying every move from the initial position.
    /// Automatic captures copied from a turn log (`sb`/`sf`) are skipped;
    /// the reducer derives them again.
    pub fn replay(&self) -> Result<GameState, RecordError> {
        let position = parse_position(&self.initial)?;
        let mut state = GameState::new(position, self.rules);
        for (index, mv) in self.player_moves()? {
            state = apply_move(&state, &mv).map_err(|source| RecordError::Replay { index, source })?;
        }
        Ok(state)
    }

    /// Like [`GameRecord::replay`], but keeps the moves as undoable history.
    pub fn to_history(&self) -> Result<GameHistory, RecordError> {
        let position = parse_position(&self.initial)?;
        let mut history = GameHistory::new(GameState::new(position, self.rules));
        for (index, mv) in self.player_moves()? {
            history.push(mv).map_err(|source| RecordError::Replay { index, source })?;
        }
        Ok(history)
    }

    /// Parses every entry, keeping the player-issued moves with their index
    /// in the record.
    fn player_moves(&self) -> Result<Vec<(usize, AllowedMove)>, RecordError> {
        let mut moves = Vec::with_capacity(self.moves.len());
        for (index, text) in self.moves.iter().enumerate() {
            let mv = parse_move(text)?;
            if !matches!(mv, AllowedMove::AutoCapture { .. }) {
                moves.push((index, mv));
            }
        }
        Ok(moves)
    }
}
