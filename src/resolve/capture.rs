//! Capture resolution.
//!
//! Two independent mechanisms, both evaluated on the board *after* the mover
//! has been relocated:
//!
//! - Outnumbering: infantry-class pieces capture an adjacent enemy infantry
//!   piece (or HQ) only when at least two of them touch it. A lone attacker
//!   is merely engaged, and pieces standing next to the target do not defend
//!   it. The player picks one target and it travels inside the move.
//! - Undefended artillery: a capturing piece that lands orthogonally next to
//!   enemy artillery overruns it, unless an enemy infantry piece touching the
//!   artillery also touches the attacker. The engine applies these itself.
//!
//! The two never compete for the same target: outnumbering only looks at
//! infantry and HQ targets, overrun only at artillery.

use crate::board::{Board, Coord, Player, UnitKind};

/// Counts `player`'s infantry-class pieces adjacent to `at`.
fn infantry_around(board: &Board, at: Coord, player: Player) -> usize {
    at.neighbors()
        .filter(|n| matches!(board.get(*n), Some(p) if p.owner == player && p.kind.is_infantry()))
        .count()
}

/// True if an infantry piece at `at` touches any enemy infantry piece.
pub fn is_engaged(board: &Board, at: Coord) -> bool {
    match board.get(at) {
        Some(p) if p.kind.is_infantry() => infantry_around(board, at, p.owner.opponent()) > 0,
        _ => false,
    }
}

/// Returns true if `target` would fall to outnumbering by `attacker`.
fn outnumbered(board: &Board, target: Coord, attacker: Player) -> bool {
    let Some(victim) = board.get(target) else {
        return false;
    };
    if victim.owner == attacker || !(victim.kind.is_infantry() || victim.kind == UnitKind::Hq) {
        return false;
    }
    infantry_around(board, target, attacker) >= 2
}

/// Enemy squares the piece that just landed on `landed` may capture by
/// outnumbering, in row-major order.
pub fn outnumbering_candidates(board: &Board, landed: Coord) -> Vec<Coord> {
    let Some(mover) = board.get(landed) else {
        return Vec::new();
    };
    if !mover.kind.is_infantry() || !mover.kind.can_capture() {
        return Vec::new();
    }
    let mut targets: Vec<Coord> = landed
        .neighbors()
        .filter(|n| outnumbered(board, *n, mover.owner))
        .collect();
    targets.sort();
    targets
}

/// Enemy artillery overrun by the piece that just landed on `landed`, in
/// row-major order.
pub fn overrun_targets(board: &Board, landed: Coord) -> Vec<Coord> {
    let Some(mover) = board.get(landed) else {
        return Vec::new();
    };
    if !mover.kind.can_capture() {
        return Vec::new();
    }
    let enemy = mover.owner.opponent();
    let mut targets: Vec<Coord> = landed
        .neighbors()
        .filter(|n| landed.is_orthogonally_adjacent(*n))
        .filter(|n| matches!(board.get(*n), Some(p) if p.owner == enemy && p.kind.is_artillery()))
        .filter(|n| !is_screened(board, *n, landed, enemy))
        .collect();
    targets.sort();
    targets
}

/// True if one of `defender`'s infantry pieces touches both the artillery at
/// `artillery` and the attacker at `attacker`.
fn is_screened(board: &Board, artillery: Coord, attacker: Coord, defender: Player) -> bool {
    artillery.neighbors().any(|n| {
        n.is_adjacent(attacker)
            && matches!(board.get(n), Some(p) if p.owner == defender && p.kind.is_infantry())
    })
}
