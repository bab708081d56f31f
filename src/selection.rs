//! Interactive move selection.
//!
//! A front end builds a move in several clicks: pick a piece or a reserve
//! kind, pick a square, then possibly a facing or a capture target. This
//! module is the explicit state machine behind that flow. `transition` is
//! pure: it reads the game state, never changes it, and hands back a
//! completed `AllowedMove` for the caller to apply.
//!
//! Phase flow:
//! - Ready -> PieceSelected | ReserveSelected
//! - PieceSelected (artillery) -> AwaitingOrientation -> Ready + move
//! - PieceSelected (other) -> Ready + move, or AwaitingCaptureChoice when
//!   the destination offers several capture targets
//! - ReserveSelected -> Ready + move
//! - Cancel returns to Ready from anywhere; Skip completes `skip`.

use thiserror::Error;

use crate::board::{AllowedMove, Coord, Orientation, UnitKind};
use crate::movegen::legal_moves;
use crate::resolve::GameState;

/// Where the selection flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    #[default]
    Ready,
    PieceSelected { at: Coord },
    ReserveSelected { kind: UnitKind },
    AwaitingOrientation { from: Coord, to: Coord },
    AwaitingCaptureChoice { from: Coord, to: Coord, candidates: Vec<Coord> },
}

impl SelectionPhase {
    fn name(&self) -> &'static str {
        match self {
            SelectionPhase::Ready => "ready",
            SelectionPhase::PieceSelected { .. } => "piece selected",
            SelectionPhase::ReserveSelected { .. } => "reserve selected",
            SelectionPhase::AwaitingOrientation { .. } => "awaiting orientation",
            SelectionPhase::AwaitingCaptureChoice { .. } => "awaiting capture choice",
        }
    }
}

/// Input from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    SelectPiece(Coord),
    SelectReserve(UnitKind),
    SelectSquare(Coord),
    ChooseOrientation(Orientation),
    /// `None` declines every capture and makes the plain move.
    ChooseCapture(Option<Coord>),
    Cancel,
    Skip,
}

impl SelectionEvent {
    fn name(&self) -> &'static str {
        match self {
            SelectionEvent::SelectPiece(_) => "select piece",
            SelectionEvent::SelectReserve(_) => "select reserve",
            SelectionEvent::SelectSquare(_) => "select square",
            SelectionEvent::ChooseOrientation(_) => "choose orientation",
            SelectionEvent::ChooseCapture(_) => "choose capture",
            SelectionEvent::Cancel => "cancel",
            SelectionEvent::Skip => "skip",
        }
    }
}

/// Result of a transition: the next phase, plus the move if one was completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub phase: SelectionPhase,
    pub completed: Option<AllowedMove>,
}

impl Step {
    fn to(phase: SelectionPhase) -> Self {
        Step { phase, completed: None }
    }

    fn done(mv: AllowedMove) -> Self {
        Step { phase: SelectionPhase::Ready, completed: Some(mv) }
    }
}

/// Guard rejections. The phase is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("the game is over")]
    GameOver,

    #[error("no piece on {0}")]
    EmptySquare(String),

    #[error("the piece on {0} belongs to the opponent")]
    OpponentPiece(String),

    #[error("the piece on {0} has already moved this turn")]
    AlreadyMoved(String),

    #[error("the piece on {0} has no legal move")]
    NoMoves(String),

    #[error("no {0:?} left in reserve")]
    EmptyReserve(UnitKind),

    #[error("{0:?} cannot be deployed now")]
    NoDeployment(UnitKind),

    #[error("{0} is not a legal destination")]
    NotADestination(String),

    #[error("facing {0:?} is not offered")]
    OrientationNotOffered(Orientation),

    #[error("capture on {0} is not offered")]
    CaptureNotOffered(String),

    #[error("skipping is not allowed")]
    SkipNotAllowed,

    #[error("cannot {event} while {phase}")]
    UnexpectedEvent { phase: &'static str, event: &'static str },
}

/// Advances the selection flow by one event.
pub fn transition(
    phase: &SelectionPhase,
    event: SelectionEvent,
    state: &GameState,
) -> Result<Step, SelectionError> {
    if event == SelectionEvent::Cancel {
        return Ok(Step::to(SelectionPhase::Ready));
    }
    if state.is_over() {
        return Err(SelectionError::GameOver);
    }

    let legal = legal_moves(&state.position, &state.rules);

    match (phase, event) {
        (_, SelectionEvent::Skip) => {
            if legal.contains(&AllowedMove::Skip) {
                Ok(Step::done(AllowedMove::Skip))
            } else {
                Err(SelectionError::SkipNotAllowed)
            }
        }

        (
            SelectionPhase::Ready | SelectionPhase::PieceSelected { .. } | SelectionPhase::ReserveSelected { .. },
            SelectionEvent::SelectPiece(at),
        ) => select_piece(state, &legal, at),

        (
            SelectionPhase::Ready | SelectionPhase::PieceSelected { .. } | SelectionPhase::ReserveSelected { .. },
            SelectionEvent::SelectReserve(kind),
        ) => {
            if state.position.reserves_of(state.side_to_move()).count(kind) == 0 {
                return Err(SelectionError::EmptyReserve(kind));
            }
            let deployable = legal
                .iter()
                .any(|m| matches!(m, AllowedMove::Reinforce { kind: k, .. } if *k == kind));
            if !deployable {
                return Err(SelectionError::NoDeployment(kind));
            }
            Ok(Step::to(SelectionPhase::ReserveSelected { kind }))
        }

        (SelectionPhase::PieceSelected { at }, SelectionEvent::SelectSquare(to)) => {
            select_destination(state, &legal, *at, to)
        }

        (SelectionPhase::ReserveSelected { kind }, SelectionEvent::SelectSquare(to)) => {
            let mv = AllowedMove::Reinforce { kind: *kind, to };
            if legal.contains(&mv) {
                Ok(Step::done(mv))
            } else {
                Err(SelectionError::NotADestination(to.algebraic()))
            }
        }

        (SelectionPhase::AwaitingOrientation { from, to }, SelectionEvent::ChooseOrientation(facing)) => {
            let (from, to) = (*from, *to);
            if !legal.contains(&AllowedMove::MoveAndOrient { from, to, facing }) {
                return Err(SelectionError::OrientationNotOffered(facing));
            }
            Ok(Step::done(AllowedMove::MoveAndOrient { from, to, facing }))
        }

        (SelectionPhase::AwaitingCaptureChoice { from, to, candidates }, SelectionEvent::ChooseCapture(choice)) => {
            if let Some(target) = choice {
                if !candidates.contains(&target) {
                    return Err(SelectionError::CaptureNotOffered(target.algebraic()));
                }
            }
            Ok(Step::done(AllowedMove::Move { from: *from, to: *to, capture: choice }))
        }

        (phase, event) => Err(SelectionError::UnexpectedEvent { phase: phase.name(), event: event.name() }),
    }
}

fn select_piece(state: &GameState, legal: &[AllowedMove], at: Coord) -> Result<Step, SelectionError> {
    let piece = state
        .position
        .board
        .get(at)
        .ok_or_else(|| SelectionError::EmptySquare(at.algebraic()))?;
    if piece.owner != state.side_to_move() {
        return Err(SelectionError::OpponentPiece(at.algebraic()));
    }
    if state.position.has_moved(at) {
        return Err(SelectionError::AlreadyMoved(at.algebraic()));
    }
    if !legal.iter().any(|m| m.origin_square() == Some(at)) {
        return Err(SelectionError::NoMoves(at.algebraic()));
    }
    Ok(Step::to(SelectionPhase::PieceSelected { at }))
}

fn select_destination(
    state: &GameState,
    legal: &[AllowedMove],
    from: Coord,
    to: Coord,
) -> Result<Step, SelectionError> {
    let is_artillery = state
        .position
        .board
        .get(from)
        .is_some_and(|p| p.kind.is_artillery());

    if is_artillery {
        let offered = legal
            .iter()
            .any(|m| matches!(*m, AllowedMove::MoveAndOrient { from: f, to: t, .. } if f == from && t == to));
        if !offered {
            return Err(SelectionError::NotADestination(to.algebraic()));
        }
        return Ok(Step::to(SelectionPhase::AwaitingOrientation { from, to }));
    }

    if !legal.contains(&AllowedMove::Move { from, to, capture: None }) {
        return Err(SelectionError::NotADestination(to.algebraic()));
    }
    let candidates: Vec<Coord> = legal
        .iter()
        .filter_map(|m| match *m {
            AllowedMove::Move { from: f, to: t, capture: Some(target) } if f == from && t == to => Some(target),
            _ => None,
        })
        .collect();

    match candidates.as_slice() {
        [] => Ok(Step::done(AllowedMove::Move { from, to, capture: None })),
        [only] => Ok(Step::done(AllowedMove::Move { from, to, capture: Some(*only) })),
        _ => Ok(Step::to(SelectionPhase::AwaitingCaptureChoice { from, to, candidates })),
    }
}
