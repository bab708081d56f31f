//! Engine state management.
//!
//! Holds the game history, engine options, and the time reported since the
//! last move, and answers the protocol commands dispatched by the main loop.
//! Options map onto `Rules` when a new game or position is set up.

use std::collections::HashMap;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Rules, ALL_PLAYERS};
use crate::eval::evaluate;
use crate::movegen::{legal_moves, random_move};
use crate::protocol::notation::{format_move, parse_move, NotationError};
use crate::protocol::position::{encode_position, parse_position, START_POSITION};
use crate::resolve::{GameHistory, GameState, MoveError};

/// Errors surfaced to the controller for a single command.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub history: GameHistory,
    pub options: HashMap<String, String>,
    /// Time reported with `elapsed` since the last applied move.
    pub pending_elapsed: u64,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine at the starting position with default rules.
    pub fn new() -> Self {
        Engine {
            history: GameHistory::new(start_state(Rules::default())),
            options: HashMap::new(),
            pending_elapsed: 0,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an engine whose `go` choices are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Engine { rng: SmallRng::seed_from_u64(seed), ..Engine::new() }
    }

    pub fn state(&self) -> &GameState {
        self.history.current()
    }

    /// Rules built from the current options.
    pub fn rules(&self) -> Rules {
        let defaults = Rules::default();
        Rules {
            four_move_variant: self.flag("FourMoveVariant").unwrap_or(defaults.four_move_variant),
            allow_skip: self.flag("AllowSkip").unwrap_or(defaults.allow_skip),
            time_control: match self.number("TimeControl") {
                Some(0) => None,
                Some(budget) => Some(budget),
                None => defaults.time_control,
            },
            turn_bonus: self.number("TurnBonus").unwrap_or(defaults.turn_bonus),
        }
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match self.options.get(name).map(String::as_str) {
            Some("true") | Some("") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }

    fn number(&self, name: &str) -> Option<u64> {
        self.options.get(name).and_then(|v| v.parse::<u64>().ok())
    }

    /// Resets to the starting position under the current options.
    pub fn new_game(&mut self) {
        self.history = GameHistory::new(start_state(self.rules()));
        self.pending_elapsed = 0;
    }

    /// Sets the current position from notation, or `startpos`.
    pub fn set_position(&mut self, notation: &str) -> Result<(), EngineError> {
        let text = if notation == "startpos" { START_POSITION } else { notation };
        let position = parse_position(text)?;
        self.history = GameHistory::new(GameState::new(position, self.rules()));
        self.pending_elapsed = 0;
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Adds to the time charged with the next move.
    pub fn add_elapsed(&mut self, amount: u64) {
        self.pending_elapsed = self.pending_elapsed.saturating_add(amount);
    }

    /// Parses and applies a move, charging any pending elapsed time.
    pub fn play(&mut self, text: &str) -> Result<(), EngineError> {
        let mv = parse_move(text)?;
        self.history.push_timed(mv, self.pending_elapsed)?;
        self.pending_elapsed = 0;
        Ok(())
    }

    pub fn undo(&mut self) -> Result<(), EngineError> {
        if self.history.undo()? {
            Ok(())
        } else {
            Err(EngineError::NothingToUndo)
        }
    }

    pub fn redo(&mut self) -> Result<(), EngineError> {
        if self.history.redo()? {
            Ok(())
        } else {
            Err(EngineError::NothingToRedo)
        }
    }

    /// Handles the handshake: writes id, options, and gtpok.
    pub fn handle_gtp<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name gridfront")?;
        writeln!(out, "id author gridfront developers")?;
        writeln!(out, "option name FourMoveVariant type check default false")?;
        writeln!(out, "option name AllowSkip type check default true")?;
        writeln!(out, "option name TimeControl type spin default 0 min 0 max 86400000")?;
        writeln!(out, "option name TurnBonus type spin default 0 min 0 max 86400000")?;
        writeln!(out, "gtpok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Writes `ok`, or `error <reason>` for a failed command.
    pub fn handle_result<W: Write>(&self, result: Result<(), EngineError>, out: &mut W) -> io::Result<()> {
        match result {
            Ok(()) => writeln!(out, "ok")?,
            Err(e) => {
                log::warn!("{}", e);
                writeln!(out, "error {}", e)?;
            }
        }
        out.flush()
    }

    /// Lists the legal moves for the side to move on one line.
    pub fn handle_legal<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let state = self.state();
        let moves: Vec<String> = if state.is_over() {
            Vec::new()
        } else {
            legal_moves(&state.position, &state.rules).iter().map(format_move).collect()
        };
        writeln!(out, "legal {}", moves.join(" "))?;
        out.flush()
    }

    /// Writes the static evaluation from Red's side.
    pub fn handle_eval<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "eval {}", evaluate(&self.state().position.board))?;
        out.flush()
    }

    /// Writes the position line and a status summary.
    pub fn handle_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let state = self.state();
        writeln!(out, "position {}", encode_position(&state.position))?;
        let clocks: Vec<String> = ALL_PLAYERS.iter().map(|p| state.elapsed_of(*p).to_string()).collect();
        let result = match &state.outcome {
            Some(outcome) => outcome.to_string(),
            None => "ongoing".to_string(),
        };
        writeln!(
            out,
            "status side {} turn {} moves {} elapsed {} result {}",
            state.side_to_move().name(),
            state.turn_number,
            state.position.moves_made(),
            clocks.join(" "),
            result
        )?;
        out.flush()
    }

    /// Picks a random legal move for the side to move.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let state = self.history.current();
        let choice = if state.is_over() {
            None
        } else {
            random_move(&state.position, &state.rules, &mut self.rng)
        };
        match choice {
            Some(mv) => writeln!(out, "bestmove {}", format_move(&mv))?,
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()
    }
}

fn start_state(rules: Rules) -> GameState {
    match parse_position(START_POSITION) {
        Ok(position) => GameState::new(position, rules),
        Err(e) => {
            log::error!("start position does not parse: {}", e);
            GameState::new(crate::board::Position::empty(), rules)
        }
    }
}
