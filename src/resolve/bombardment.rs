//! Bombardment zones.
//!
//! Every artillery-class piece projects along its facing for up to its range.
//! An occupied square is still covered but stops the projection. The map is
//! recomputed from scratch for each board; it is 64 bytes and cheap to build.

use crate::board::{all_coords, Board, Coord, Player, ALL_PLAYERS, SQUARE_COUNT};

/// Which players bombard each square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BombardmentMap {
    /// Bit `player.index()` set when that player covers the square.
    cover: [u8; SQUARE_COUNT],
}

impl BombardmentMap {
    /// Computes the bombardment zones for every artillery piece on `board`.
    pub fn compute(board: &Board) -> Self {
        let mut cover = [0u8; SQUARE_COUNT];

        for (at, piece) in board.pieces() {
            let (Some(range), Some(facing)) = (piece.kind.bombard_range(), piece.orientation) else {
                continue;
            };
            let bit = 1u8 << piece.owner.index();
            let mut cur = at;
            for _ in 0..range {
                match cur.step(facing) {
                    Some(next) => {
                        cover[next.index()] |= bit;
                        if !board.is_empty(next) {
                            break;
                        }
                        cur = next;
                    }
                    None => break,
                }
            }
        }

        BombardmentMap { cover }
    }

    pub fn is_bombarded_by(&self, at: Coord, player: Player) -> bool {
        self.cover[at.index()] & (1 << player.index()) != 0
    }

    pub fn is_bombarded(&self, at: Coord) -> bool {
        self.cover[at.index()] != 0
    }

    /// Players covering the square, Red first.
    pub fn bombarders(&self, at: Coord) -> Vec<Player> {
        ALL_PLAYERS
            .into_iter()
            .filter(|p| self.is_bombarded_by(at, *p))
            .collect()
    }

    /// True if `mover` may not enter `at`: the opponent covers it and `mover`
    /// does not.
    pub fn denies(&self, at: Coord, mover: Player) -> bool {
        self.is_bombarded_by(at, mover.opponent()) && !self.is_bombarded_by(at, mover)
    }

    /// Squares covered by `player`, row-major.
    pub fn squares_of(&self, player: Player) -> impl Iterator<Item = Coord> + '_ {
        all_coords().filter(move |c| self.is_bombarded_by(*c, player))
    }

    /// Pieces of `victim` sitting in squares denied to them by the opponent,
    /// in row-major order. These are removed when the opponent's turn begins.
    pub fn exposed_pieces(&self, board: &Board, victim: Player) -> Vec<Coord> {
        board
            .pieces_of(victim)
            .filter(|(at, _)| self.denies(*at, victim))
            .map(|(at, _)| at)
            .collect()
    }
}
