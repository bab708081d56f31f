//! Position notation encoding and decoding.
//!
//! A position is a single line with five space-separated fields:
//!
//! `<ranks> <red reserve> <blue reserve> <side> <turn moves>`
//!
//! - ranks: eight rank strings from rank 8 down to rank 1, separated by `/`.
//!   Digits are runs of empty squares; letters are pieces (uppercase Red,
//!   lowercase Blue); artillery letters are followed by a facing glyph.
//! - reserves: piece letters in catalog order, in the owner's case, or `-`.
//! - side: `r` or `b`.
//! - turn moves: the moves already made this turn, comma-separated, or `-`.

use crate::board::{
    Board, Coord, Orientation, Piece, Player, Position, ReserveFleet, UnitKind, ALL_PLAYERS,
    BOARD_SIZE,
};

use super::notation::{format_moves, parse_moves, NotationError};

/// The standard starting position.
pub const START_POSITION: &str = "1avp1hpav1/iti2iti/8/8/8/8/ITI2ITI/1A^P1HPA^1 IITPSG iitpsg r -";

/// Parses a position from its notation.
pub fn parse_position(s: &str) -> Result<Position, NotationError> {
    let fields: Vec<&str> = s.split_whitespace().collect();
    if fields.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    if fields.len() != 5 {
        return Err(NotationError::unexpected(
            "5 fields: ranks, red reserve, blue reserve, side, turn moves",
            s.trim(),
        ));
    }

    let board = parse_ranks(fields[0])?;
    let reserves = [parse_reserve(fields[1], Player::Red)?, parse_reserve(fields[2], Player::Blue)?];

    let mut flag = fields[3].chars();
    let side = match (flag.next(), flag.next()) {
        (Some(c), None) => Player::from_flag(c),
        _ => None,
    }
    .ok_or_else(|| NotationError::unexpected("side flag (r or b)", fields[3]))?;

    let mut pos = Position::new(board, reserves, side);
    pos.turn_moves = parse_moves(fields[4])?;
    Ok(pos)
}

fn parse_ranks(s: &str) -> Result<Board, NotationError> {
    let ranks: Vec<&str> = s.split('/').collect();
    if ranks.len() != BOARD_SIZE {
        return Err(NotationError::unexpected("8 ranks separated by '/'", s));
    }

    let mut board = Board::empty();
    for (row, rank) in ranks.iter().enumerate() {
        parse_rank(rank, row as u8, &mut board)?;
    }
    Ok(board)
}

fn parse_rank(rank: &str, row: u8, board: &mut Board) -> Result<(), NotationError> {
    const CELL: &str = "piece letter or empty-run digit";
    let mut col = 0usize;
    let mut chars = rank.chars();

    while let Some(c) = chars.next() {
        if col >= BOARD_SIZE {
            return Err(NotationError::unexpected("exactly 8 squares per rank", rank));
        }
        if let Some(run) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
            col += run as usize;
            continue;
        }

        let kind = UnitKind::from_letter(c)
            .ok_or_else(|| NotationError::unexpected(CELL, &c.to_string()))?;
        let owner = if c.is_ascii_uppercase() { Player::Red } else { Player::Blue };
        let piece = if kind.is_artillery() {
            let glyph = chars.next().ok_or_else(|| NotationError::UnexpectedEnd {
                expected: "facing glyph after artillery".to_string(),
                input: rank.to_string(),
            })?;
            let facing = Orientation::from_glyph(glyph)
                .ok_or_else(|| NotationError::unexpected("facing glyph after artillery", &glyph.to_string()))?;
            Piece::facing(kind, owner, facing)
        } else {
            Piece::new(kind, owner)
        };

        board.place(Coord::new(row, col as u8), piece)?;
        col += 1;
    }

    if col != BOARD_SIZE {
        return Err(NotationError::unexpected("exactly 8 squares per rank", rank));
    }
    Ok(())
}

fn parse_reserve(s: &str, player: Player) -> Result<ReserveFleet, NotationError> {
    let mut fleet = ReserveFleet::default();
    if s == "-" {
        return Ok(fleet);
    }
    let expected = match player {
        Player::Red => "uppercase reserve letters or '-'",
        Player::Blue => "lowercase reserve letters or '-'",
    };
    for c in s.chars() {
        let right_case = match player {
            Player::Red => c.is_ascii_uppercase(),
            Player::Blue => c.is_ascii_lowercase(),
        };
        let kind = UnitKind::from_letter(c)
            .filter(|k| right_case && k.is_reservable())
            .ok_or_else(|| NotationError::unexpected(expected, &c.to_string()))?;
        fleet.add(kind)?;
    }
    Ok(fleet)
}

/// Encodes a position as canonical notation.
pub fn encode_position(pos: &Position) -> String {
    let mut out = String::with_capacity(96);
    out.push_str(&encode_ranks(&pos.board));
    for player in ALL_PLAYERS {
        out.push(' ');
        out.push_str(&encode_reserve(pos.reserves_of(player), player));
    }
    out.push(' ');
    out.push(pos.side_to_move.flag());
    out.push(' ');
    out.push_str(&format_moves(&pos.turn_moves));
    out
}

fn encode_ranks(board: &Board) -> String {
    let mut ranks = Vec::with_capacity(BOARD_SIZE);
    for row in 0..BOARD_SIZE as u8 {
        let mut rank = String::new();
        let mut empty = 0u32;
        for col in 0..BOARD_SIZE as u8 {
            match board.get(Coord::new(row, col)) {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        rank.push_str(&empty.to_string());
                        empty = 0;
                    }
                    rank.push(piece.letter());
                    if let Some(facing) = piece.orientation {
                        rank.push(facing.glyph());
                    }
                }
            }
        }
        if empty > 0 {
            rank.push_str(&empty.to_string());
        }
        ranks.push(rank);
    }
    ranks.join("/")
}

fn encode_reserve(fleet: &ReserveFleet, player: Player) -> String {
    if fleet.is_empty() {
        return "-".to_string();
    }
    let mut out = String::new();
    for kind in fleet.available() {
        let letter = match player {
            Player::Red => kind.letter().to_ascii_uppercase(),
            Player::Blue => kind.letter(),
        };
        for _ in 0..fleet.count(kind) {
            out.push(letter);
        }
    }
    out
}
