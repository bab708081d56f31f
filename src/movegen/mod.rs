//! Legal move generation.
//!
//! Composes the movement calculator, bombardment zones, and capture resolver
//! into the ordered list of legal moves for the side to move. The order is
//! part of the contract: reinforcements, then piece moves in row-major order
//! of the moving piece, then `skip`.

pub mod movement;
pub mod reinforce;

use std::collections::HashSet;

use rand::Rng;

use crate::board::{AllowedMove, Coord, Position, Rules, ALL_ORIENTATIONS};
use crate::resolve::bombardment::BombardmentMap;
use crate::resolve::capture::outnumbering_candidates;

/// Generates every legal move for `pos.side_to_move`, given the moves already
/// made this turn.
pub fn legal_moves(pos: &Position, rules: &Rules) -> Vec<AllowedMove> {
    let mut moves = Vec::new();

    if pos.moves_made() < rules.moves_per_turn() {
        let bombardment = BombardmentMap::compute(&pos.board);
        moves.extend(reinforce::legal_reinforcements(pos, &bombardment));

        let moved = pos.moved_squares();
        for (from, piece) in pos.board.pieces_of(pos.side_to_move) {
            if moved.contains(&from) {
                continue;
            }
            if piece.kind.is_artillery() {
                artillery_moves(pos, &bombardment, from, &mut moves);
            } else {
                relocation_moves(pos, &bombardment, from, &mut moves);
            }
        }
    }

    if rules.allow_skip {
        moves.push(AllowedMove::Skip);
    }

    dedup_in_order(moves)
}

/// Stationary reorientation first, then each reachable square, each with all
/// eight facings.
fn artillery_moves(pos: &Position, bombardment: &BombardmentMap, from: Coord, out: &mut Vec<AllowedMove>) {
    let mut destinations = vec![from];
    destinations.extend(movement::reachable(&pos.board, bombardment, from));
    for to in destinations {
        for facing in ALL_ORIENTATIONS {
            out.push(AllowedMove::MoveAndOrient { from, to, facing });
        }
    }
}

/// A plain move to each reachable square, followed by one capturing move per
/// enemy piece the landing would outnumber.
fn relocation_moves(pos: &Position, bombardment: &BombardmentMap, from: Coord, out: &mut Vec<AllowedMove>) {
    for to in movement::reachable(&pos.board, bombardment, from) {
        out.push(AllowedMove::Move { from, to, capture: None });

        let mut after = pos.board;
        if after.relocate(from, to).is_err() {
            continue;
        }
        for target in outnumbering_candidates(&after, to) {
            out.push(AllowedMove::Move { from, to, capture: Some(target) });
        }
    }
}

/// Drops repeats while keeping first-seen order. Equal moves print equal
/// notation, so value equality is notation equality.
fn dedup_in_order(moves: Vec<AllowedMove>) -> Vec<AllowedMove> {
    let mut seen = HashSet::with_capacity(moves.len());
    moves.into_iter().filter(|m| seen.insert(*m)).collect()
}

/// Returns true if `candidate` is among the legal moves. In-place
/// reorientations are accepted in either spelling.
pub fn is_legal(pos: &Position, rules: &Rules, candidate: &AllowedMove) -> bool {
    if matches!(candidate, AllowedMove::AutoCapture { .. }) {
        return false;
    }
    let wanted = candidate.normalized();
    legal_moves(pos, rules).contains(&wanted)
}

/// Picks a uniformly random legal move, or `None` when there is none.
pub fn random_move(pos: &Position, rules: &Rules, rng: &mut impl Rng) -> Option<AllowedMove> {
    let legal = legal_moves(pos, rules);
    if legal.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..legal.len());
    Some(legal[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CaptureCause, Orientation, Piece, Player, UnitKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn c(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn put(pos: &mut Position, sq: &str, kind: UnitKind, owner: Player) {
        pos.board.place(c(sq), Piece::new(kind, owner)).unwrap();
    }

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn skip_is_always_last() {
        let pos = Position::empty();
        assert_eq!(legal_moves(&pos, &Rules::default()), vec![AllowedMove::Skip]);
    }

    #[test]
    fn no_skip_means_empty_list() {
        let pos = Position::empty();
        let rules = Rules { allow_skip: false, ..Rules::default() };
        assert!(legal_moves(&pos, &rules).is_empty());
    }

    #[test]
    fn only_side_to_move_pieces_move() {
        let mut pos = Position::empty();
        put(&mut pos, "d4", UnitKind::Infantry, Player::Red);
        put(&mut pos, "d7", UnitKind::Infantry, Player::Blue);
        let moves = legal_moves(&pos, &Rules::default());
        assert_eq!(moves.len(), 9);
        assert!(moves
            .iter()
            .all(|m| matches!(m, AllowedMove::Skip) || m.origin_square() == Some(c("d4"))));
    }

    #[test]
    fn artillery_gets_eight_facings_per_square() {
        let mut pos = Position::empty();
        put(&mut pos, "a1", UnitKind::Artillery, Player::Red);
        let moves = legal_moves(&pos, &Rules::default());
        // In place + a2, b2, b1; 8 facings each; plus skip.
        assert_eq!(moves.len(), 4 * 8 + 1);
        assert_eq!(
            moves[0],
            AllowedMove::MoveAndOrient { from: c("a1"), to: c("a1"), facing: Orientation::North }
        );
    }

    #[test]
    fn capture_moves_follow_base_move() {
        let mut pos = Position::empty();
        put(&mut pos, "d4", UnitKind::Infantry, Player::Red);
        put(&mut pos, "f6", UnitKind::Infantry, Player::Red);
        put(&mut pos, "e6", UnitKind::Infantry, Player::Blue);
        let moves = legal_moves(&pos, &Rules::default());

        let base = AllowedMove::Move { from: c("d4"), to: c("e5"), capture: None };
        let taking = AllowedMove::Move { from: c("d4"), to: c("e5"), capture: Some(c("e6")) };
        let i = moves.iter().position(|m| *m == base).unwrap();
        assert_eq!(moves[i + 1], taking);
    }

    #[test]
    fn moved_pieces_are_excluded() {
        let mut pos = Position::empty();
        put(&mut pos, "d5", UnitKind::Infantry, Player::Red);
        pos.turn_moves.push(AllowedMove::Move { from: c("d4"), to: c("d5"), capture: None });
        assert_eq!(legal_moves(&pos, &Rules::default()), vec![AllowedMove::Skip]);
    }

    #[test]
    fn turn_cap_leaves_only_skip() {
        let mut pos = Position::empty();
        put(&mut pos, "a2", UnitKind::Infantry, Player::Red);
        for _ in 0..3 {
            pos.turn_moves.push(AllowedMove::Reinforce { kind: UnitKind::Infantry, to: c("h1") });
        }
        assert_eq!(legal_moves(&pos, &Rules::default()), vec![AllowedMove::Skip]);

        let variant = Rules { four_move_variant: true, ..Rules::default() };
        assert!(legal_moves(&pos, &variant).len() > 1);
    }

    #[test]
    fn auto_captures_do_not_count_toward_cap() {
        let mut pos = Position::empty();
        put(&mut pos, "a2", UnitKind::Infantry, Player::Red);
        for _ in 0..3 {
            pos.turn_moves.push(AllowedMove::AutoCapture { cause: CaptureCause::Bombardment, target: c("h8") });
        }
        assert!(legal_moves(&pos, &Rules::default()).len() > 1);
    }

    #[test]
    fn is_legal_accepts_both_reorientation_spellings() {
        let mut pos = Position::empty();
        put(&mut pos, "b1", UnitKind::Artillery, Player::Red);
        let rules = Rules::default();
        assert!(is_legal(&pos, &rules, &AllowedMove::ChangeOrientation { at: c("b1"), facing: Orientation::East }));
        assert!(is_legal(
            &pos,
            &rules,
            &AllowedMove::MoveAndOrient { from: c("b1"), to: c("b2"), facing: Orientation::West }
        ));
        assert!(!is_legal(
            &pos,
            &rules,
            &AllowedMove::MoveAndOrient { from: c("b1"), to: c("b3"), facing: Orientation::West }
        ));
        assert!(!is_legal(&pos, &rules, &AllowedMove::AutoCapture { cause: CaptureCause::Overwhelm, target: c("b1") }));
    }

    #[test]
    fn generated_moves_are_unique() {
        let mut pos = Position::empty();
        put(&mut pos, "d4", UnitKind::Infantry, Player::Red);
        put(&mut pos, "b1", UnitKind::Artillery, Player::Red);
        put(&mut pos, "c1", UnitKind::AirborneInfantry, Player::Red);
        pos.reserves_of_mut(Player::Red).add(UnitKind::Infantry).unwrap();
        let moves = legal_moves(&pos, &Rules::default());
        let unique: HashSet<AllowedMove> = moves.iter().copied().collect();
        assert_eq!(unique.len(), moves.len());
    }

    #[test]
    fn random_move_is_legal_and_deterministic() {
        let mut pos = Position::empty();
        put(&mut pos, "d4", UnitKind::Infantry, Player::Red);
        put(&mut pos, "b1", UnitKind::Artillery, Player::Red);
        let rules = Rules::default();

        let a = random_move(&pos, &rules, &mut seeded_rng()).unwrap();
        let b = random_move(&pos, &rules, &mut seeded_rng()).unwrap();
        assert_eq!(a, b);
        assert!(is_legal(&pos, &rules, &a) || a == AllowedMove::Skip);

        let none = Rules { allow_skip: false, ..Rules::default() };
        assert_eq!(random_move(&Position::empty(), &none, &mut seeded_rng()), None);
    }
}
