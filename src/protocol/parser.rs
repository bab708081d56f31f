//! Engine command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that the
//! engine main loop dispatches on. Arguments that carry notation (positions
//! and moves) are kept as text here and decoded by the engine, so notation
//! errors can be reported with context.

/// A parsed controller-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake; engine replies with `id`, `option` lines and `gtpok`.
    Gtp,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset to the starting position under the current options.
    NewGame,

    /// Set the position: `position startpos` or `position <notation>`.
    Position { notation: String },

    /// Apply a move to the current game.
    Play { mv: String },

    /// List the legal moves for the side to move.
    Legal,

    /// Report the static evaluation of the current board.
    Eval,

    /// Report side to move, clocks, and result.
    Status,

    /// Step back or forward one move in the game history.
    Undo,
    Redo,

    /// Add elapsed time to the turn in progress.
    Elapsed { amount: u64 },

    /// Pick a move for the side to move.
    Go,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "gtp" => Some(Command::Gtp),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "legal" => Some(Command::Legal),
        "eval" => Some(Command::Eval),
        "status" => Some(Command::Status),
        "undo" => Some(Command::Undo),
        "redo" => Some(Command::Redo),
        "go" => Some(Command::Go),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(trimmed),
        "play" => parse_play(&tokens),
        "elapsed" => parse_elapsed(&tokens),

        other => {
            log::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        log::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                log::warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <notation>`. Notation contains spaces, so everything
/// after the keyword is taken.
fn parse_position(line: &str) -> Option<Command> {
    let notation = line.strip_prefix("position").unwrap_or_default().trim();
    if notation.is_empty() {
        log::warn!("malformed position: expected 'position startpos' or 'position <notation>'");
        return None;
    }
    Some(Command::Position { notation: notation.to_string() })
}

/// Parses `play <move>`.
fn parse_play(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        log::warn!("malformed play: expected 'play <move>'");
        return None;
    }
    Some(Command::Play { mv: tokens[1].to_string() })
}

/// Parses `elapsed <n>`.
fn parse_elapsed(tokens: &[&str]) -> Option<Command> {
    let Some(raw) = tokens.get(1) else {
        log::warn!("malformed elapsed: expected 'elapsed <n>'");
        return None;
    };
    match raw.parse::<u64>() {
        Ok(amount) => Some(Command::Elapsed { amount }),
        Err(_) => {
            log::warn!("invalid elapsed value: '{}'", raw);
            None
        }
    }
}
