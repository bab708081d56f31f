//! Gridfront -- rules engine for an 8x8 two-player military strategy game.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr; see `GRIDFRONT_LOG`.

use std::io::{self, BufRead};

use gridfront::engine::Engine;
use gridfront::logging;
use gridfront::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() -> io::Result<()> {
    logging::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Gtp => engine.handle_gtp(&mut out)?,
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame => engine.new_game(),
            Command::Position { notation } => {
                if let Err(e) = engine.set_position(&notation) {
                    log::warn!("position rejected: {}", e);
                }
            }
            Command::Play { mv } => {
                let result = engine.play(&mv);
                engine.handle_result(result, &mut out)?;
            }
            Command::Legal => engine.handle_legal(&mut out)?,
            Command::Eval => engine.handle_eval(&mut out)?,
            Command::Status => engine.handle_status(&mut out)?,
            Command::Undo => {
                let result = engine.undo();
                engine.handle_result(result, &mut out)?;
            }
            Command::Redo => {
                let result = engine.redo();
                engine.handle_result(result, &mut out)?;
            }
            Command::Elapsed { amount } => engine.add_elapsed(amount),
            Command::Go => engine.handle_go(&mut out)?,
            Command::Quit => break,
        }
    }
    Ok(())
}
