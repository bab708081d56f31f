//! Board, reserves, and position representation.
//!
//! `Board` is a fixed-size value type: cloning it is a 64-cell copy, which is
//! how per-move snapshots and search copies are taken.

use super::coord::{all_coords, Coord, Orientation, Player, ALL_PLAYERS, SQUARE_COUNT};
use super::moves::AllowedMove;
use super::unit::{UnitKind, ALL_UNIT_KINDS, UNIT_KIND_COUNT};

/// Programming errors: a caller asked for something the board can never satisfy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("reserve underflow: {player:?} has no {kind:?} left")]
    ReserveUnderflow { player: Player, kind: UnitKind },

    #[error("expected a piece at {0}")]
    EmptySquare(String),

    #[error("square {0} is already occupied")]
    Occupied(String),

    #[error("{0:?} already has an HQ on the board")]
    SecondHq(Player),

    #[error("{0:?} cannot be held in reserve")]
    NotReservable(UnitKind),

    #[error("reserve overflow: no room for another {0:?}")]
    ReserveOverflow(UnitKind),
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: UnitKind,
    pub owner: Player,
    /// Facing, present exactly when `kind` is artillery.
    pub orientation: Option<Orientation>,
}

impl Piece {
    /// Creates a piece, giving artillery the owner's forward facing.
    pub fn new(kind: UnitKind, owner: Player) -> Self {
        let orientation = kind.is_artillery().then(|| Orientation::forward(owner));
        Piece { kind, owner, orientation }
    }

    /// Creates an artillery-class piece with an explicit facing.
    pub fn facing(kind: UnitKind, owner: Player, orientation: Orientation) -> Self {
        debug_assert!(kind.is_artillery());
        Piece { kind, owner, orientation: Some(orientation) }
    }

    /// Notation letter: uppercase for Red, lowercase for Blue.
    pub fn letter(self) -> char {
        match self.owner {
            Player::Red => self.kind.letter().to_ascii_uppercase(),
            Player::Blue => self.kind.letter(),
        }
    }
}

/// The 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; SQUARE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Board { squares: [None; SQUARE_COUNT] }
    }

    pub fn get(&self, at: Coord) -> Option<Piece> {
        self.squares[at.index()]
    }

    pub fn is_empty(&self, at: Coord) -> bool {
        self.squares[at.index()].is_none()
    }

    /// Overwrites a square unconditionally.
    pub fn set(&mut self, at: Coord, piece: Option<Piece>) {
        self.squares[at.index()] = piece;
    }

    /// Places a piece on an empty square, refusing a second HQ for the owner.
    pub fn place(&mut self, at: Coord, piece: Piece) -> Result<(), InvariantViolation> {
        if !self.is_empty(at) {
            return Err(InvariantViolation::Occupied(at.algebraic()));
        }
        if piece.kind == UnitKind::Hq && self.hq(piece.owner).is_some() {
            return Err(InvariantViolation::SecondHq(piece.owner));
        }
        self.set(at, Some(piece));
        Ok(())
    }

    /// Removes and returns the piece at `at`.
    pub fn take(&mut self, at: Coord) -> Result<Piece, InvariantViolation> {
        self.squares[at.index()]
            .take()
            .ok_or_else(|| InvariantViolation::EmptySquare(at.algebraic()))
    }

    /// Moves the piece at `from` to the empty square `to`.
    pub fn relocate(&mut self, from: Coord, to: Coord) -> Result<Piece, InvariantViolation> {
        if from == to {
            return self.get(from).ok_or_else(|| InvariantViolation::EmptySquare(from.algebraic()));
        }
        if !self.is_empty(to) {
            return Err(InvariantViolation::Occupied(to.algebraic()));
        }
        let piece = self.take(from)?;
        self.set(to, Some(piece));
        Ok(piece)
    }

    /// Iterates occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        all_coords().filter_map(move |c| self.get(c).map(|p| (c, p)))
    }

    /// Iterates one player's pieces in row-major order.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.owner == player)
    }

    /// Location of `player`'s HQ, if still on the board.
    pub fn hq(&self, player: Player) -> Option<Coord> {
        self.pieces_of(player)
            .find(|(_, p)| p.kind == UnitKind::Hq)
            .map(|(c, _)| c)
    }
}

/// Undeployed pieces for one player, indexed by `UnitKind as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ReserveFleet {
    counts: [u8; UNIT_KIND_COUNT],
}

impl ReserveFleet {
    pub fn count(&self, kind: UnitKind) -> u8 {
        self.counts[kind as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    /// Adds one piece of `kind`. The HQ is never held in reserve.
    pub fn add(&mut self, kind: UnitKind) -> Result<(), InvariantViolation> {
        if !kind.is_reservable() {
            return Err(InvariantViolation::NotReservable(kind));
        }
        let slot = &mut self.counts[kind as usize];
        *slot = slot.checked_add(1).ok_or(InvariantViolation::ReserveOverflow(kind))?;
        Ok(())
    }

    /// Removes one piece of `kind` for deployment.
    pub fn take(&mut self, player: Player, kind: UnitKind) -> Result<(), InvariantViolation> {
        let slot = &mut self.counts[kind as usize];
        if *slot == 0 {
            return Err(InvariantViolation::ReserveUnderflow { player, kind });
        }
        *slot -= 1;
        Ok(())
    }

    /// Kinds with at least one piece available, in catalog order.
    pub fn available(&self) -> impl Iterator<Item = UnitKind> + '_ {
        ALL_UNIT_KINDS.into_iter().filter(move |k| self.count(*k) > 0)
    }
}

/// Everything position notation captures: board, reserves, side to move, and
/// the moves already made in the turn in progress.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub board: Board,
    pub reserves: [ReserveFleet; 2],
    pub side_to_move: Player,
    pub turn_moves: Vec<AllowedMove>,
}

impl Position {
    pub fn new(board: Board, reserves: [ReserveFleet; 2], side_to_move: Player) -> Self {
        Position { board, reserves, side_to_move, turn_moves: Vec::new() }
    }

    /// An empty board with empty reserves, Red to move.
    pub fn empty() -> Self {
        Position::new(Board::empty(), [ReserveFleet::default(); 2], Player::Red)
    }

    pub fn reserves_of(&self, player: Player) -> &ReserveFleet {
        &self.reserves[player.index()]
    }

    pub fn reserves_of_mut(&mut self, player: Player) -> &mut ReserveFleet {
        &mut self.reserves[player.index()]
    }

    /// Number of player-issued moves made so far this turn.
    pub fn moves_made(&self) -> usize {
        self.turn_moves.iter().filter(|m| m.is_player_move()).count()
    }

    /// Squares whose occupant has already moved, landed, or been deployed this turn.
    pub fn moved_squares(&self) -> Vec<Coord> {
        self.turn_moves.iter().filter_map(|m| m.landing_square()).collect()
    }

    pub fn has_moved(&self, at: Coord) -> bool {
        self.turn_moves.iter().any(|m| m.landing_square() == Some(at))
    }

    /// True if either HQ is missing.
    pub fn hq_missing(&self) -> Option<Player> {
        ALL_PLAYERS.into_iter().find(|p| self.board.hq(*p).is_none())
    }
}
