//! Heuristic board evaluation.
//!
//! Scores a board from Red's side (positive favours Red) using handcrafted
//! features: material, a centralization table, airborne depth, and
//! bombardment pressure.
//!
//! Design: everything is computed from fixed-size tables indexed by
//! `UnitKind as usize` and square row/column; no heap allocation apart from
//! the bombardment map, which is itself a fixed array.

use crate::board::{Board, Player, UnitKind, BOARD_SIZE, UNIT_KIND_COUNT};
use crate::resolve::bombardment::BombardmentMap;

/// Material value per unit kind, indexed by `UnitKind as usize`.
const MATERIAL: [i32; UNIT_KIND_COUNT] = [
    1000, // hq
    100,  // infantry
    150,  // armored infantry
    140,  // airborne infantry
    160,  // artillery
    200,  // armored artillery
    220,  // heavy artillery
];

/// Centralization bonus by square. Symmetric under a vertical flip, so one
/// table serves both players.
const POSITIONAL: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [-20, -10, -5, -5, -5, -5, -10, -20],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 5, 10, 12, 12, 10, 5, -5],
    [-5, 5, 12, 20, 20, 12, 5, -5],
    [-5, 5, 12, 20, 20, 12, 5, -5],
    [-5, 5, 10, 12, 12, 10, 5, -5],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-20, -10, -5, -5, -5, -5, -10, -20],
];

/// Airborne value lost per rank travelled from the home rank, as a divisor.
const AIRBORNE_DEPTH_DIVISOR: i32 = 14;

/// Bonus per enemy-occupied square a player bombards.
const BOMBARDMENT_BONUS: i32 = 25;

/// Returns the material value of one piece of `kind`.
pub fn material_value(kind: UnitKind) -> i32 {
    MATERIAL[kind as usize]
}

/// Evaluates `board` from Red's perspective.
pub fn evaluate(board: &Board) -> i32 {
    let mut score = 0i32;

    for (at, piece) in board.pieces() {
        let mut value = material_value(piece.kind);
        if piece.kind.has_parachute() {
            let depth = (at.row as i32 - piece.owner.home_row() as i32).abs();
            value -= value * depth / AIRBORNE_DEPTH_DIVISOR;
        }
        if piece.kind != UnitKind::Hq {
            value += POSITIONAL[at.row as usize][at.col as usize];
        }
        score += sign(piece.owner) * value;
    }

    let bombardment = BombardmentMap::compute(board);
    for (at, piece) in board.pieces() {
        if bombardment.is_bombarded_by(at, piece.owner.opponent()) {
            score += sign(piece.owner.opponent()) * BOMBARDMENT_BONUS;
        }
    }

    score
}

/// Evaluates `board` from `player`'s perspective.
pub fn evaluate_for(player: Player, board: &Board) -> i32 {
    sign(player) * evaluate(board)
}

fn sign(player: Player) -> i32 {
    match player {
        Player::Red => 1,
        Player::Blue => -1,
    }
}
