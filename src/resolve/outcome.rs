//! Game-over detection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Player, ALL_PLAYERS};
use crate::movegen::legal_moves;

use super::turn::GameState;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeReason {
    Time,
    HqCapture,
    Stalemate,
}

impl OutcomeReason {
    pub fn name(self) -> &'static str {
        match self {
            OutcomeReason::Time => "time",
            OutcomeReason::HqCapture => "hq_capture",
            OutcomeReason::Stalemate => "stalemate",
        }
    }
}

/// Final result. `winner` is `None` for a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Option<Player>,
    pub reason: OutcomeReason,
}

impl GameOutcome {
    pub fn win(winner: Player, reason: OutcomeReason) -> Self {
        GameOutcome { winner: Some(winner), reason }
    }

    pub fn draw(reason: OutcomeReason) -> Self {
        GameOutcome { winner: None, reason }
    }

    /// `"win"` or `"draw"`.
    pub fn status(&self) -> &'static str {
        if self.winner.is_some() {
            "win"
        } else {
            "draw"
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(p) => write!(f, "{} {} {}", self.status(), p.name(), self.reason.name()),
            None => write!(f, "{} {}", self.status(), self.reason.name()),
        }
    }
}

/// Checks, in order: a player over the time budget loses; a player without
/// an HQ loses; a side to move with no legal move at all draws. Red is
/// checked before Blue at each step. Analysis games never end.
pub fn game_over(state: &GameState) -> Option<GameOutcome> {
    if state.analysis {
        return None;
    }

    if let Some(budget) = state.rules.time_control {
        for player in ALL_PLAYERS {
            if state.elapsed_of(player) > budget {
                return Some(GameOutcome::win(player.opponent(), OutcomeReason::Time));
            }
        }
    }

    if let Some(loser) = state.position.hq_missing() {
        return Some(GameOutcome::win(loser.opponent(), OutcomeReason::HqCapture));
    }

    if legal_moves(&state.position, &state.rules).is_empty() {
        return Some(GameOutcome::draw(OutcomeReason::Stalemate));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Piece, Position, Rules, UnitKind};

    fn c(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn both_hqs() -> Position {
        let mut pos = Position::empty();
        pos.board.place(c("e1"), Piece::new(UnitKind::Hq, Player::Red)).unwrap();
        pos.board.place(c("e8"), Piece::new(UnitKind::Hq, Player::Blue)).unwrap();
        pos
    }

    fn timed(red: u64, blue: u64) -> GameState {
        let rules = Rules { time_control: Some(100), ..Rules::default() };
        let mut state = GameState::new(both_hqs(), rules);
        state.elapsed = [red, blue];
        state
    }

    #[test]
    fn ongoing_game_has_no_outcome() {
        assert_eq!(game_over(&GameState::new(both_hqs(), Rules::default())), None);
    }

    #[test]
    fn time_loss_either_side() {
        assert_eq!(game_over(&timed(101, 0)), Some(GameOutcome::win(Player::Blue, OutcomeReason::Time)));
        assert_eq!(game_over(&timed(0, 101)), Some(GameOutcome::win(Player::Red, OutcomeReason::Time)));
        assert_eq!(game_over(&timed(100, 100)), None);
    }

    #[test]
    fn red_time_checked_first() {
        assert_eq!(game_over(&timed(150, 150)).and_then(|o| o.winner), Some(Player::Blue));
    }

    #[test]
    fn time_outranks_missing_hq() {
        let rules = Rules { time_control: Some(100), ..Rules::default() };
        let mut pos = Position::empty();
        pos.board.place(c("e1"), Piece::new(UnitKind::Hq, Player::Red)).unwrap();
        let mut state = GameState::new(pos, rules);
        state.elapsed = [101, 0];
        assert_eq!(game_over(&state), Some(GameOutcome::win(Player::Blue, OutcomeReason::Time)));
    }

    #[test]
    fn missing_hq_loses() {
        let mut pos = Position::empty();
        pos.board.place(c("e8"), Piece::new(UnitKind::Hq, Player::Blue)).unwrap();
        let state = GameState::new(pos, Rules::default());
        assert_eq!(state.outcome, Some(GameOutcome::win(Player::Blue, OutcomeReason::HqCapture)));
    }

    #[test]
    fn stalemate_needs_skip_disabled() {
        let mut pos = both_hqs();
        // Turn cap already reached.
        for _ in 0..3 {
            pos.turn_moves.push(crate::board::AllowedMove::Reinforce { kind: UnitKind::Infantry, to: c("a1") });
        }
        let with_skip = GameState::new(pos.clone(), Rules::default());
        assert_eq!(with_skip.outcome, None);

        let rules = Rules { allow_skip: false, ..Rules::default() };
        let without = GameState::new(pos, rules);
        assert_eq!(without.outcome, Some(GameOutcome::draw(OutcomeReason::Stalemate)));
    }

    #[test]
    fn display_reads_naturally() {
        assert_eq!(GameOutcome::win(Player::Red, OutcomeReason::HqCapture).to_string(), "win red hq_capture");
        assert_eq!(GameOutcome::draw(OutcomeReason::Stalemate).to_string(), "draw stalemate");
    }
}
