//! Reinforcement move generation.
//!
//! Reserve pieces deploy onto empty squares of the owner's home rank. A home
//! square the enemy bombards (and the owner does not) is not a legal spawn.

use crate::board::{AllowedMove, Board, Coord, Player, Position, BOARD_SIZE};
use crate::resolve::bombardment::BombardmentMap;

/// Empty, unbombarded home-rank squares for `player`, file a first.
pub fn spawn_squares(board: &Board, bombardment: &BombardmentMap, player: Player) -> Vec<Coord> {
    let row = player.home_row();
    (0..BOARD_SIZE as u8)
        .map(|col| Coord::new(row, col))
        .filter(|c| board.is_empty(*c) && !bombardment.denies(*c, player))
        .collect()
}

/// One `Reinforce` per available reserve kind per spawn square.
pub fn legal_reinforcements(pos: &Position, bombardment: &BombardmentMap) -> Vec<AllowedMove> {
    let player = pos.side_to_move;
    let reserves = pos.reserves_of(player);
    if reserves.is_empty() {
        return Vec::new();
    }

    let squares = spawn_squares(&pos.board, bombardment, player);
    let mut moves = Vec::new();
    for kind in reserves.available() {
        for &to in &squares {
            moves.push(AllowedMove::Reinforce { kind, to });
        }
    }
    moves
}
