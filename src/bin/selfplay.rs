//! Self-play game generation CLI.
//!
//! Plays random games and writes them as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 10)
//!   --max-moves N    Abandon games after N player moves (default: 400)
//!   --four-move      Play the four-move variant
//!   --no-skip        Disallow skipping
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress progress and summary

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use gridfront::logging;
use gridfront::selfplay::{self, SelfPlayConfig};

fn main() -> ExitCode {
    logging::init_with_level(log::LevelFilter::Info);

    let args: Vec<String> = env::args().skip(1).collect();
    let (config, output_path) = match parse_args(&args) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("{}", msg);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    if config.quiet {
        log::set_max_level(log::LevelFilter::Warn);
    }

    log::info!(
        "self-play: {} games, max {} moves, four-move {}, skip {}, {} threads",
        config.num_games,
        config.max_moves,
        config.rules.four_move_variant,
        config.rules.allow_skip,
        config.threads
    );

    let start = Instant::now();
    let games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            log::error!("self-play failed: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    log::info!("completed {} games in {:.1}s", games.len(), elapsed.as_secs_f64());
    selfplay::log_summary(&games);

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => selfplay::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };
    if let Err(e) = written {
        log::error!("failed to write output: {}", e);
        return ExitCode::FAILURE;
    }
    if let Some(path) = output_path {
        log::info!("wrote {} games to {}", games.len(), path);
    }
    ExitCode::SUCCESS
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<(SelfPlayConfig, Option<String>)>, String> {
    let mut config = SelfPlayConfig::default();
    let mut output_path = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--games" => config.num_games = value(&mut iter, arg)?,
            "--max-moves" => config.max_moves = value(&mut iter, arg)?,
            "--threads" => config.threads = value(&mut iter, arg)?,
            "--seed" => config.seed = value(&mut iter, arg)?,
            "--output" => output_path = Some(value(&mut iter, arg)?),
            "--four-move" => config.rules.four_move_variant = true,
            "--no-skip" => config.rules.allow_skip = false,
            "--quiet" => config.quiet = true,
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(Some((config, output_path)))
}

fn value<'a, T: FromStr>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<T, String> {
    let raw = iter.next().ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse().map_err(|_| format!("invalid {} value: {}", flag, raw))
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 10)");
    eprintln!("  --max-moves N    Abandon games after N player moves (default: 400)");
    eprintln!("  --four-move      Play the four-move variant");
    eprintln!("  --no-skip        Disallow skipping");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary");
    eprintln!("  --help           Show this help");
}
