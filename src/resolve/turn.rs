//! Turn sequencing.
//!
//! `apply_move` is a pure reducer: it validates a player-issued move against
//! the move generator, then returns a new `GameState` with the move applied,
//! any automatic captures recorded, and the turn advanced when the move cap
//! is hit or the player skips. The input state is never touched, so replay
//! is a left fold over a move log.
//!
//! Turn flow:
//! - a move lands; undefended enemy artillery next to it is overrun (`sf`)
//! - after `skip` or the last allowed move the turn ends: the mover's clock
//!   is charged and the side flips
//! - the new turn begins by removing the previous mover's pieces left in the
//!   new mover's bombardment zones (`sb`)

use crate::board::{
    AllowedMove, Board, CaptureCause, InvariantViolation, Piece, Player, Position, Rules,
};
use crate::movegen::is_legal;
use crate::protocol::notation::format_move;

use super::bombardment::BombardmentMap;
use super::capture::overrun_targets;
use super::outcome::{game_over, GameOutcome};

/// Reasons a move is refused. The state it was tried against is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("illegal move '{0}'")]
    Illegal(String),

    #[error("the game is over")]
    GameOver,

    #[error("'{0}' is applied by the engine, not played")]
    NotPlayerMove(String),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Complete game state: the position plus clocks, counters, and snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub position: Position,
    pub rules: Rules,
    /// Time charged to each player so far, indexed by `Player::index`.
    pub elapsed: [u64; 2],
    /// Time reported during the turn in progress, charged when it ends.
    pub turn_elapsed: u64,
    /// Board as it stood when the current turn began.
    pub turn_start_board: Board,
    /// Board after each player move of the current turn.
    pub snapshots: Vec<Board>,
    /// Player-issued moves applied over the whole game.
    pub move_count: u32,
    /// Completed turns.
    pub turn_number: u32,
    pub outcome: Option<GameOutcome>,
    /// Analysis and replay boards never report a result.
    pub analysis: bool,
    /// Opaque to the engine; carried for collaborators.
    pub match_id: Option<String>,
    /// Opaque to the engine; carried for collaborators.
    pub online: [bool; 2],
}

impl GameState {
    /// Creates a game at `position` under `rules`.
    pub fn new(position: Position, rules: Rules) -> Self {
        let turn_start_board = position.board;
        let mut state = GameState {
            position,
            rules,
            elapsed: [0; 2],
            turn_elapsed: 0,
            turn_start_board,
            snapshots: Vec::new(),
            move_count: 0,
            turn_number: 0,
            outcome: None,
            analysis: false,
            match_id: None,
            online: [false; 2],
        };
        state.outcome = game_over(&state);
        state
    }

    /// Same position with result detection switched off.
    pub fn analysis(position: Position, rules: Rules) -> Self {
        let mut state = GameState::new(position, rules);
        state.analysis = true;
        state.outcome = None;
        state
    }

    pub fn side_to_move(&self) -> Player {
        self.position.side_to_move
    }

    pub fn elapsed_of(&self, player: Player) -> u64 {
        self.elapsed[player.index()]
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Applies a player-issued move and returns the resulting state.
pub fn apply_move(state: &GameState, mv: &AllowedMove) -> Result<GameState, MoveError> {
    apply_move_timed(state, mv, 0)
}

/// Like [`apply_move`], first adding `elapsed` to the time spent this turn.
pub fn apply_move_timed(
    state: &GameState,
    mv: &AllowedMove,
    elapsed: u64,
) -> Result<GameState, MoveError> {
    if state.outcome.is_some() {
        return Err(MoveError::GameOver);
    }
    if matches!(mv, AllowedMove::AutoCapture { .. }) {
        return Err(MoveError::NotPlayerMove(format_move(mv)));
    }
    if !is_legal(&state.position, &state.rules, mv) {
        return Err(MoveError::Illegal(format_move(mv)));
    }

    // One spelling per action, so equal actions give equal states.
    let mv = &mv.normalized();
    let mut next = state.clone();
    next.turn_elapsed = next.turn_elapsed.saturating_add(elapsed);

    if *mv == AllowedMove::Skip {
        log::debug!("{} skips", next.side_to_move().name());
        end_turn(&mut next)?;
    } else {
        execute(&mut next, mv)?;
        next.move_count += 1;
        next.snapshots.push(next.position.board);
        if next.position.moves_made() >= next.rules.moves_per_turn() {
            end_turn(&mut next)?;
        }
    }

    if !next.analysis {
        next.outcome = game_over(&next);
        if let Some(outcome) = &next.outcome {
            log::info!("game over: {}", outcome);
        }
    }
    Ok(next)
}

/// Performs a validated player move on the board and reserves, recording it
/// and any overrun captures in the turn log.
fn execute(state: &mut GameState, mv: &AllowedMove) -> Result<(), MoveError> {
    let player = state.position.side_to_move;
    let pos = &mut state.position;

    let landed = match *mv {
        AllowedMove::Move { from, to, capture } => {
            pos.board.relocate(from, to)?;
            if let Some(target) = capture {
                let taken = pos.board.take(target)?;
                log::debug!("{} captures {:?} at {}", player.name(), taken.kind, target.algebraic());
            }
            Some(to)
        }
        AllowedMove::MoveAndOrient { from, to, facing } => {
            let mut piece = pos.board.relocate(from, to)?;
            piece.orientation = Some(facing);
            pos.board.set(to, Some(piece));
            Some(to)
        }
        AllowedMove::Reinforce { kind, to } => {
            pos.reserves_of_mut(player).take(player, kind)?;
            pos.board.place(to, Piece::new(kind, player))?;
            Some(to)
        }
        // Reorientation arrives here already normalized.
        AllowedMove::ChangeOrientation { .. } | AllowedMove::AutoCapture { .. } | AllowedMove::Skip => None,
    };

    pos.turn_moves.push(*mv);

    if let Some(at) = landed {
        for target in overrun_targets(&pos.board, at) {
            pos.board.take(target)?;
            log::debug!("{} overruns artillery at {}", player.name(), target.algebraic());
            pos.turn_moves.push(AllowedMove::AutoCapture { cause: CaptureCause::Overwhelm, target });
        }
    }
    Ok(())
}

/// Charges the mover's clock, hands the turn over, and begins the next one.
fn end_turn(state: &mut GameState) -> Result<(), MoveError> {
    let mover = state.position.side_to_move;
    let charged = state.turn_elapsed.saturating_sub(state.rules.turn_bonus);
    state.elapsed[mover.index()] = state.elapsed[mover.index()].saturating_add(charged);
    state.turn_elapsed = 0;
    state.turn_number += 1;

    state.position.side_to_move = mover.opponent();
    state.position.turn_moves.clear();
    state.snapshots.clear();
    log::debug!("turn {} ends, {} to move", state.turn_number, mover.opponent().name());

    begin_turn(state)
}

/// Removes the previous mover's pieces standing in squares the new mover
/// bombards, then records the turn-start board.
fn begin_turn(state: &mut GameState) -> Result<(), MoveError> {
    let attacker = state.position.side_to_move;
    let bombardment = BombardmentMap::compute(&state.position.board);

    for target in bombardment.exposed_pieces(&state.position.board, attacker.opponent()) {
        state.position.board.take(target)?;
        log::debug!("{} bombardment destroys piece at {}", attacker.name(), target.algebraic());
        state
            .position
            .turn_moves
            .push(AllowedMove::AutoCapture { cause: CaptureCause::Bombardment, target });
    }

    state.turn_start_board = state.position.board;
    Ok(())
}
