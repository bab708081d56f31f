//! Per-piece reachable squares.
//!
//! Pieces step in straight lines in the fixed compass order N, NE, E, SE, S,
//! SW, W, NW. Mobility-2 pieces may continue one more square in the same
//! direction when the first square was empty. Airborne pieces on their own
//! home rank may instead land on any empty square. Squares the enemy
//! bombards, and the mover's side does not, are off limits, both as
//! destinations and as the first square of a two-square step.

use crate::board::{all_coords, Board, Coord, ALL_ORIENTATIONS};
use crate::resolve::bombardment::BombardmentMap;

/// Squares the piece at `from` may move to, ignoring captures.
///
/// Returns an empty vec if `from` is empty.
pub fn reachable(board: &Board, bombardment: &BombardmentMap, from: Coord) -> Vec<Coord> {
    let Some(piece) = board.get(from) else {
        return Vec::new();
    };
    let mover = piece.owner;

    if piece.kind.has_parachute() && from.row == mover.home_row() {
        return all_coords()
            .filter(|c| board.is_empty(*c) && !bombardment.denies(*c, mover))
            .collect();
    }

    let mut targets = Vec::with_capacity(16);
    for dir in ALL_ORIENTATIONS {
        let mut cur = from;
        for _ in 0..piece.kind.mobility() {
            let Some(next) = cur.step(dir) else {
                break;
            };
            if !board.is_empty(next) || bombardment.denies(next, mover) {
                break;
            }
            targets.push(next);
            cur = next;
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Orientation, Piece, Player, UnitKind};

    fn c(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn sq(list: &[&str]) -> Vec<Coord> {
        list.iter().map(|s| c(s)).collect()
    }

    fn reach(board: &Board, from: &str) -> Vec<Coord> {
        let map = BombardmentMap::compute(board);
        reachable(board, &map, c(from))
    }

    #[test]
    fn infantry_steps_once_in_compass_order() {
        let mut board = Board::empty();
        board.place(c("d4"), Piece::new(UnitKind::Infantry, Player::Red)).unwrap();
        assert_eq!(
            reach(&board, "d4"),
            sq(&["d5", "e5", "e4", "e3", "d3", "c3", "c4", "c5"])
        );
    }

    #[test]
    fn corner_piece_has_three_moves() {
        let mut board = Board::empty();
        board.place(c("a1"), Piece::new(UnitKind::Infantry, Player::Red)).unwrap();
        assert_eq!(reach(&board, "a1"), sq(&["a2", "b2", "b1"]));
    }

    #[test]
    fn armored_piece_moves_two_without_jumping() {
        let mut board = Board::empty();
        board.place(c("a1"), Piece::new(UnitKind::ArmoredInfantry, Player::Red)).unwrap();
        board.place(c("b1"), Piece::new(UnitKind::Infantry, Player::Red)).unwrap();
        // East is blocked at once; north and north-east run two squares.
        assert_eq!(reach(&board, "a1"), sq(&["a2", "a3", "b2", "c3"]));
    }

    #[test]
    fn occupied_squares_are_not_destinations() {
        let mut board = Board::empty();
        board.place(c("d4"), Piece::new(UnitKind::Infantry, Player::Red)).unwrap();
        board.place(c("d5"), Piece::new(UnitKind::Infantry, Player::Blue)).unwrap();
        assert!(!reach(&board, "d4").contains(&c("d5")));
        assert_eq!(reach(&board, "d4").len(), 7);
    }

    #[test]
    fn airborne_on_home_rank_parachutes_anywhere_empty() {
        let mut board = Board::empty();
        board.place(c("c1"), Piece::new(UnitKind::AirborneInfantry, Player::Red)).unwrap();
        board.place(c("e5"), Piece::new(UnitKind::Infantry, Player::Blue)).unwrap();
        let targets = reach(&board, "c1");
        assert_eq!(targets.len(), 62);
        assert!(targets.contains(&c("h8")));
        assert!(!targets.contains(&c("e5")));
        assert!(!targets.contains(&c("c1")));
        // Row-major: a8 first.
        assert_eq!(targets[0], c("a8"));
    }

    #[test]
    fn airborne_off_home_rank_walks() {
        let mut board = Board::empty();
        board.place(c("c3"), Piece::new(UnitKind::AirborneInfantry, Player::Red)).unwrap();
        assert_eq!(reach(&board, "c3").len(), 8);

        // Blue's home rank is rank 8, not rank 1.
        let mut board = Board::empty();
        board.place(c("c1"), Piece::new(UnitKind::AirborneInfantry, Player::Blue)).unwrap();
        assert_eq!(reach(&board, "c1").len(), 5);
    }

    #[test]
    fn enemy_bombardment_excludes_destination() {
        let mut board = Board::empty();
        board.place(c("d6"), Piece::new(UnitKind::Artillery, Player::Blue)).unwrap();
        board.place(c("c3"), Piece::new(UnitKind::Infantry, Player::Red)).unwrap();
        // Blue covers d5 and d4.
        let targets = reach(&board, "c3");
        assert!(!targets.contains(&c("d4")));
        assert!(targets.contains(&c("c4")));
    }

    #[test]
    fn mutual_coverage_is_permitted() {
        let mut board = Board::empty();
        board.place(c("d6"), Piece::new(UnitKind::Artillery, Player::Blue)).unwrap();
        board.place(c("d2"), Piece::new(UnitKind::Artillery, Player::Red)).unwrap();
        board.place(c("c3"), Piece::new(UnitKind::Infantry, Player::Red)).unwrap();
        // Red covers d3, d4; Blue covers d5, d4.
        let targets = reach(&board, "c3");
        assert!(targets.contains(&c("d4")));
    }

    #[test]
    fn cannot_drive_through_bombardment() {
        let mut board = Board::empty();
        board.place(c("h3"), Piece::facing(UnitKind::Artillery, Player::Blue, Orientation::West)).unwrap();
        board.place(c("e1"), Piece::new(UnitKind::ArmoredInfantry, Player::Red)).unwrap();
        // Blue covers g3 and f3; e2 is free but the NE run e1-f2-g3 stops at f2.
        let targets = reach(&board, "e1");
        assert!(targets.contains(&c("f2")));
        assert!(!targets.contains(&c("g3")));
        // North run e2-e3 is clear.
        assert!(targets.contains(&c("e3")));
    }
}
