//! Move notation encoding and decoding.
//!
//! One compact token per move:
//!
//! - `b2b3`, `b2b3xc4` relocation, optionally capturing
//! - `b1b2^` artillery relocation (or `b1b1^` in place) with a new facing
//! - `b1>` artillery turning in place
//! - `ria1` reinforcement (lowercase kind letter)
//! - `sbc4`, `sfc4` engine auto-captures (bombardment, overrun)
//! - `skip`
//!
//! Lists of moves are comma-separated, with `-` for the empty list.

use thiserror::Error;

use crate::board::{AllowedMove, CaptureCause, Coord, InvariantViolation, Orientation, UnitKind};

/// Errors that can occur when parsing move or position notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unexpected '{found}', expected {expected}")]
    UnexpectedToken { expected: String, found: String },

    #[error("unexpected end of '{input}', expected {expected}")]
    UnexpectedEnd { expected: String, input: String },

    #[error("invalid position: {0}")]
    Invalid(#[from] InvariantViolation),
}

impl NotationError {
    pub(crate) fn unexpected(expected: &str, found: &str) -> Self {
        NotationError::UnexpectedToken { expected: expected.to_string(), found: found.to_string() }
    }
}

const SQUARE: &str = "square (a1-h8)";

/// Parses a square at byte offset `at` of `s`.
fn square_at(s: &str, at: usize) -> Result<Coord, NotationError> {
    let Some(text) = s.get(at..at + 2) else {
        return Err(match s.get(at..) {
            Some(rest) if !rest.is_empty() => NotationError::unexpected(SQUARE, rest),
            _ => NotationError::UnexpectedEnd { expected: SQUARE.to_string(), input: s.to_string() },
        });
    };
    Coord::from_algebraic(text).ok_or_else(|| NotationError::unexpected(SQUARE, text))
}

/// Parses the single facing glyph making up the rest of `s` from `at`.
fn glyph_at(s: &str, at: usize) -> Result<Orientation, NotationError> {
    const GLYPH: &str = "facing glyph (^ } > ] v [ < {)";
    let rest = s.get(at..).unwrap_or_default();
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Orientation::from_glyph(c).ok_or_else(|| NotationError::unexpected(GLYPH, rest)),
        (None, _) => Err(NotationError::UnexpectedEnd { expected: GLYPH.to_string(), input: s.to_string() }),
        _ => Err(NotationError::unexpected(GLYPH, rest)),
    }
}

fn expect_end(s: &str, at: usize) -> Result<(), NotationError> {
    match s.get(at..) {
        Some("") => Ok(()),
        Some(rest) => Err(NotationError::unexpected("end of move", rest)),
        None => Err(NotationError::unexpected("end of move", s)),
    }
}

/// Parses a single move token.
pub fn parse_move(s: &str) -> Result<AllowedMove, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    if s == "skip" {
        return Ok(AllowedMove::Skip);
    }

    if let Some(cause) = s.get(..2).and_then(capture_cause_from_prefix) {
        let target = square_at(s, 2)?;
        expect_end(s, 4)?;
        return Ok(AllowedMove::AutoCapture { cause, target });
    }

    if let Some(rest) = s.strip_prefix('r') {
        const KIND: &str = "reserve kind letter (i t p a s g)";
        let letter = rest
            .chars()
            .next()
            .ok_or_else(|| NotationError::UnexpectedEnd { expected: KIND.to_string(), input: s.to_string() })?;
        let kind = UnitKind::from_letter(letter)
            .filter(|k| letter.is_ascii_lowercase() && k.is_reservable())
            .ok_or_else(|| NotationError::unexpected(KIND, &letter.to_string()))?;
        let to = square_at(s, 2)?;
        expect_end(s, 4)?;
        return Ok(AllowedMove::Reinforce { kind, to });
    }

    let from = square_at(s, 0)?;
    match s.get(2..3) {
        None | Some("") => Err(NotationError::UnexpectedEnd {
            expected: "destination square or facing glyph".to_string(),
            input: s.to_string(),
        }),
        Some(next) if next.starts_with(|c: char| Orientation::from_glyph(c).is_some()) => {
            let facing = glyph_at(s, 2)?;
            Ok(AllowedMove::ChangeOrientation { at: from, facing })
        }
        Some(_) => {
            let to = square_at(s, 2)?;
            match s.get(4..5) {
                None | Some("") => {
                    expect_end(s, 4)?;
                    Ok(AllowedMove::Move { from, to, capture: None })
                }
                Some("x") => {
                    let target = square_at(s, 5)?;
                    expect_end(s, 7)?;
                    Ok(AllowedMove::Move { from, to, capture: Some(target) })
                }
                Some(_) => {
                    let facing = glyph_at(s, 4)?;
                    Ok(AllowedMove::MoveAndOrient { from, to, facing })
                }
            }
        }
    }
}

fn capture_cause_from_prefix(prefix: &str) -> Option<CaptureCause> {
    match prefix {
        "sb" => Some(CaptureCause::Bombardment),
        "sf" => Some(CaptureCause::Overwhelm),
        _ => None,
    }
}

fn capture_cause_prefix(cause: CaptureCause) -> &'static str {
    match cause {
        CaptureCause::Bombardment => "sb",
        CaptureCause::Overwhelm => "sf",
    }
}

/// Formats a move as its notation token.
pub fn format_move(mv: &AllowedMove) -> String {
    match *mv {
        AllowedMove::Move { from, to, capture: None } => format!("{}{}", from.algebraic(), to.algebraic()),
        AllowedMove::Move { from, to, capture: Some(target) } => {
            format!("{}{}x{}", from.algebraic(), to.algebraic(), target.algebraic())
        }
        AllowedMove::MoveAndOrient { from, to, facing } => {
            format!("{}{}{}", from.algebraic(), to.algebraic(), facing.glyph())
        }
        AllowedMove::ChangeOrientation { at, facing } => format!("{}{}", at.algebraic(), facing.glyph()),
        AllowedMove::Reinforce { kind, to } => format!("r{}{}", kind.letter(), to.algebraic()),
        AllowedMove::AutoCapture { cause, target } => {
            format!("{}{}", capture_cause_prefix(cause), target.algebraic())
        }
        AllowedMove::Skip => "skip".to_string(),
    }
}

/// Parses a comma-separated move list. `-` is the empty list.
pub fn parse_moves(s: &str) -> Result<Vec<AllowedMove>, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    if s == "-" {
        return Ok(Vec::new());
    }
    s.split(',').map(parse_move).collect()
}

/// Formats a move list, comma-separated, or `-` when empty.
pub fn format_moves(moves: &[AllowedMove]) -> String {
    if moves.is_empty() {
        return "-".to_string();
    }
    moves.iter().map(format_move).collect::<Vec<_>>().join(",")
}
