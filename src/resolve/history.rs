//! Undo/redo by replay.
//!
//! The history keeps the initial state and the log of player-issued moves
//! with the time reported for each. Every earlier state is rebuilt by folding
//! `apply_move_timed` over a prefix of the log, so undo never needs inverse
//! moves.

use crate::board::AllowedMove;

use super::turn::{apply_move_timed, GameState, MoveError};

/// One logged move and the elapsed time reported with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggedMove {
    pub mv: AllowedMove,
    pub elapsed: u64,
}

#[derive(Debug, Clone)]
pub struct GameHistory {
    initial: GameState,
    log: Vec<LoggedMove>,
    cursor: usize,
    current: GameState,
}

impl GameHistory {
    pub fn new(initial: GameState) -> Self {
        GameHistory { current: initial.clone(), initial, log: Vec::new(), cursor: 0 }
    }

    pub fn initial(&self) -> &GameState {
        &self.initial
    }

    pub fn current(&self) -> &GameState {
        &self.current
    }

    /// Number of moves applied to reach the current state.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves up to the cursor.
    pub fn moves(&self) -> impl Iterator<Item = AllowedMove> + '_ {
        self.log[..self.cursor].iter().map(|l| l.mv)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.log.len()
    }

    /// Applies `mv` to the current state, dropping any redo tail.
    pub fn push(&mut self, mv: AllowedMove) -> Result<&GameState, MoveError> {
        self.push_timed(mv, 0)
    }

    pub fn push_timed(&mut self, mv: AllowedMove, elapsed: u64) -> Result<&GameState, MoveError> {
        let next = apply_move_timed(&self.current, &mv, elapsed)?;
        self.log.truncate(self.cursor);
        self.log.push(LoggedMove { mv, elapsed });
        self.cursor += 1;
        self.current = next;
        Ok(&self.current)
    }

    /// Steps back one move. Returns false at the start of the game.
    pub fn undo(&mut self) -> Result<bool, MoveError> {
        if !self.can_undo() {
            return Ok(false);
        }
        self.current = self.state_at(self.cursor - 1)?;
        self.cursor -= 1;
        Ok(true)
    }

    /// Re-applies the next undone move. Returns false if there is none.
    pub fn redo(&mut self) -> Result<bool, MoveError> {
        let Some(logged) = self.log.get(self.cursor).copied() else {
            return Ok(false);
        };
        self.current = apply_move_timed(&self.current, &logged.mv, logged.elapsed)?;
        self.cursor += 1;
        Ok(true)
    }

    /// State after the first `index` logged moves.
    pub fn state_at(&self, index: usize) -> Result<GameState, MoveError> {
        replay_timed(&self.initial, &self.log[..index.min(self.log.len())])
    }
}

/// Folds `moves` over `initial`. Engine-applied entries are skipped since the
/// reducer regenerates them.
pub fn replay(initial: &GameState, moves: &[AllowedMove]) -> Result<GameState, MoveError> {
    let logged: Vec<LoggedMove> = moves.iter().map(|&mv| LoggedMove { mv, elapsed: 0 }).collect();
    replay_timed(initial, &logged)
}

fn replay_timed(initial: &GameState, moves: &[LoggedMove]) -> Result<GameState, MoveError> {
    let mut state = initial.clone();
    for logged in moves {
        if matches!(logged.mv, AllowedMove::AutoCapture { .. }) {
            continue;
        }
        state = apply_move_timed(&state, &logged.mv, logged.elapsed)?;
    }
    Ok(state)
}
