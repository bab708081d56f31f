//! Players, board coordinates, and compass orientations.
//!
//! The board is 8x8. Row 0 is rank 8 (Blue's home rank) and row 7 is rank 1
//! (Red's home rank). Files a-h map to columns 0-7. "North" points toward
//! row 0.

use serde::{Deserialize, Serialize};

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// Number of squares on the board.
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Blue,
}

/// Both players in turn order.
pub const ALL_PLAYERS: [Player; 2] = [Player::Red, Player::Blue];

impl Player {
    /// Returns the other player.
    pub const fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Index for per-player arrays.
    pub const fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Blue => 1,
        }
    }

    /// Returns the row of this player's home rank.
    pub const fn home_row(self) -> u8 {
        match self {
            Player::Red => 7,
            Player::Blue => 0,
        }
    }

    /// Returns the lowercase name of this player.
    pub const fn name(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Blue => "blue",
        }
    }

    /// Returns the side-to-move flag used in position notation.
    pub const fn flag(self) -> char {
        match self {
            Player::Red => 'r',
            Player::Blue => 'b',
        }
    }

    /// Parses a player from its lowercase name.
    pub fn from_name(name: &str) -> Option<Player> {
        match name {
            "red" => Some(Player::Red),
            "blue" => Some(Player::Blue),
            _ => None,
        }
    }

    /// Parses a player from its side-to-move flag.
    pub fn from_flag(c: char) -> Option<Player> {
        match c {
            'r' => Some(Player::Red),
            'b' => Some(Player::Blue),
            _ => None,
        }
    }
}

/// A square on the board as (row, col), each in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    /// Creates a coordinate. Callers guarantee `row` and `col` are below 8.
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE);
        Coord { row, col }
    }

    /// Creates a coordinate if both components are on the board.
    pub fn checked(row: i8, col: i8) -> Option<Coord> {
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Coord { row: row as u8, col: col as u8 })
        } else {
            None
        }
    }

    /// Row-major index in `0..64`.
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Inverse of [`Coord::index`].
    pub const fn from_index(idx: usize) -> Coord {
        Coord { row: (idx / BOARD_SIZE) as u8, col: (idx % BOARD_SIZE) as u8 }
    }

    /// Steps one square in the given direction, or `None` off the board.
    pub fn step(self, dir: Orientation) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        Coord::checked(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Returns the up-to-eight neighbours in compass order.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        ALL_ORIENTATIONS.into_iter().filter_map(move |d| self.step(d))
    }

    /// True if the two squares touch, diagonals included.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }

    /// True if the two squares share an edge.
    pub fn is_orthogonally_adjacent(self, other: Coord) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Algebraic name, e.g. `a1` for row 7, col 0.
    pub fn algebraic(self) -> String {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        format!("{}{}", file, rank)
    }

    /// Parses an algebraic square name like `e4`.
    pub fn from_algebraic(s: &str) -> Option<Coord> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Coord { row: b'8' - rank, col: file - b'a' })
    }
}

/// All 64 squares in row-major order.
pub fn all_coords() -> impl Iterator<Item = Coord> {
    (0..SQUARE_COUNT).map(Coord::from_index)
}

/// A compass facing. Doubles as the direction set for movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Orientation {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

/// Orientations in clockwise order from north. Movement iterates in this order.
pub const ALL_ORIENTATIONS: [Orientation; 8] = [
    Orientation::North,
    Orientation::NorthEast,
    Orientation::East,
    Orientation::SouthEast,
    Orientation::South,
    Orientation::SouthWest,
    Orientation::West,
    Orientation::NorthWest,
];

impl Orientation {
    /// (row delta, col delta) for one step.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Orientation::North => (-1, 0),
            Orientation::NorthEast => (-1, 1),
            Orientation::East => (0, 1),
            Orientation::SouthEast => (1, 1),
            Orientation::South => (1, 0),
            Orientation::SouthWest => (1, -1),
            Orientation::West => (0, -1),
            Orientation::NorthWest => (-1, -1),
        }
    }

    /// Compass bearing in degrees.
    pub const fn degrees(self) -> u16 {
        self as u16 * 45
    }

    /// Returns the single-character facing glyph.
    ///
    /// Glyphs avoid digits and piece letters so they can follow a piece code
    /// in position notation without ambiguity.
    pub const fn glyph(self) -> char {
        match self {
            Orientation::North => '^',
            Orientation::NorthEast => '}',
            Orientation::East => '>',
            Orientation::SouthEast => ']',
            Orientation::South => 'v',
            Orientation::SouthWest => '[',
            Orientation::West => '<',
            Orientation::NorthWest => '{',
        }
    }

    /// Parses a facing glyph.
    pub fn from_glyph(c: char) -> Option<Orientation> {
        ALL_ORIENTATIONS.into_iter().find(|o| o.glyph() == c)
    }

    /// The facing that points from `player`'s home rank toward the enemy.
    pub const fn forward(player: Player) -> Orientation {
        match player {
            Player::Red => Orientation::North,
            Player::Blue => Orientation::South,
        }
    }
}
