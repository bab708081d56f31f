//! Self-play game generation.
//!
//! Plays games between two random movers from the starting position and
//! writes one JSON object per game. The output doubles as a soak test for
//! the move generator and turn reducer: every chosen move is replayed
//! through the same validation a controller's moves go through.

use std::io::{self, Write};
use std::sync::mpsc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::board::{Player, Rules};
use crate::movegen::random_move;
use crate::protocol::{encode_position, parse_position, GameRecord, NotationError, START_POSITION};
use crate::resolve::{GameHistory, GameOutcome, GameState, MoveError};

#[derive(Debug, Error)]
pub enum SelfPlayError {
    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error("game {game_id}: {source}")]
    Move { game_id: usize, source: MoveError },

    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a self-play run.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    /// Player moves after which an unfinished game is abandoned.
    pub max_moves: usize,
    pub threads: usize,
    /// 0 seeds from entropy.
    pub seed: u64,
    pub quiet: bool,
    pub rules: Rules,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            max_moves: 400,
            threads: 4,
            seed: 0,
            quiet: false,
            rules: Rules::default(),
        }
    }
}

/// One finished (or abandoned) self-play game.
#[derive(Debug, Clone, Serialize)]
pub struct SelfPlayGame {
    pub game_id: usize,
    #[serde(flatten)]
    pub record: GameRecord,
    /// `None` when the game hit the move cap first.
    pub outcome: Option<GameOutcome>,
    pub turns: u32,
    #[serde(rename = "final")]
    pub final_position: String,
}

impl SelfPlayGame {
    pub fn winner(&self) -> Option<Player> {
        self.outcome.as_ref().and_then(|o| o.winner)
    }
}

/// Plays one game with uniformly random legal moves for both sides.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> Result<SelfPlayGame, SelfPlayError> {
    let position = parse_position(START_POSITION)?;
    let mut history = GameHistory::new(GameState::new(position, config.rules));

    while !history.current().is_over() && history.cursor() < config.max_moves {
        let state = history.current();
        let Some(mv) = random_move(&state.position, &state.rules, rng) else {
            break;
        };
        history.push(mv).map_err(|source| SelfPlayError::Move { game_id, source })?;
    }

    let last = history.current();
    log::debug!(
        "game {} finished after {} moves: {}",
        game_id,
        history.cursor(),
        last.outcome.as_ref().map_or_else(|| "abandoned".to_string(), |o| o.to_string())
    );

    Ok(SelfPlayGame {
        game_id,
        record: GameRecord::from_history(&history),
        outcome: last.outcome.clone(),
        turns: last.turn_number,
        final_position: encode_position(&last.position),
    })
}

/// Runs self-play and returns the games ordered by id.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<SelfPlayGame>, SelfPlayError> {
    run_self_play_with_callback(config, |_| {})
}

/// Runs self-play, calling `on_game` as each game completes.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<Vec<SelfPlayGame>, SelfPlayError>
where
    F: FnMut(&SelfPlayGame),
{
    let mut games = if config.threads <= 1 {
        run_sequential(config, &mut on_game)?
    } else {
        run_parallel(config, &mut on_game)?
    };
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    }
}

fn run_sequential<F>(config: &SelfPlayConfig, on_game: &mut F) -> Result<Vec<SelfPlayGame>, SelfPlayError>
where
    F: FnMut(&SelfPlayGame),
{
    let mut games = Vec::with_capacity(config.num_games);
    for game_id in 0..config.num_games {
        let mut rng = game_rng(config, game_id);
        let game = play_game(config, game_id, &mut rng)?;
        if !config.quiet {
            log::info!("game {}/{} done", game_id + 1, config.num_games);
        }
        on_game(&game);
        games.push(game);
    }
    Ok(games)
}

fn run_parallel<F>(config: &SelfPlayConfig, on_game: &mut F) -> Result<Vec<SelfPlayGame>, SelfPlayError>
where
    F: FnMut(&SelfPlayGame),
{
    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads).build()?;
    let (tx, rx) = mpsc::channel();

    pool.install(|| {
        (0..config.num_games).into_par_iter().for_each_with(tx, |tx, game_id| {
            let mut rng = game_rng(config, game_id);
            // The receiver outlives the pool, so a failed send cannot happen.
            let _ = tx.send(play_game(config, game_id, &mut rng));
        });
    });

    let mut games = Vec::with_capacity(config.num_games);
    for result in rx {
        let game = result?;
        if !config.quiet {
            log::info!("game {}/{} done", games.len() + 1, config.num_games);
        }
        on_game(&game);
        games.push(game);
    }
    Ok(games)
}

/// Writes one JSON object per line.
pub fn write_jsonl<W: Write>(games: &[SelfPlayGame], out: &mut W) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Logs win, draw, and abandonment counts at info level.
pub fn log_summary(games: &[SelfPlayGame]) {
    let total = games.len();
    let mut wins = [0usize; 2];
    let mut draws = 0usize;
    let mut abandoned = 0usize;
    let mut total_moves = 0usize;

    for game in games {
        total_moves += game.record.moves.len();
        match (&game.outcome, game.winner()) {
            (None, _) => abandoned += 1,
            (Some(_), Some(player)) => wins[player.index()] += 1,
            (Some(_), None) => draws += 1,
        }
    }

    log::info!("games: {}", total);
    log::info!("avg moves/game: {:.1}", total_moves as f64 / total.max(1) as f64);
    log::info!(
        "red wins: {}, blue wins: {}, draws: {}, abandoned: {}",
        wins[Player::Red.index()],
        wins[Player::Blue.index()],
        draws,
        abandoned
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(num_games: usize, threads: usize, seed: u64) -> SelfPlayConfig {
        SelfPlayConfig { num_games, max_moves: 60, threads, seed, quiet: true, ..Default::default() }
    }

    #[test]
    fn single_game_respects_move_cap() {
        let config = small_config(1, 1, 42);
        let mut rng = SmallRng::seed_from_u64(42);
        let game = play_game(&config, 0, &mut rng).unwrap();
        assert!(game.record.moves.len() <= config.max_moves);
        assert_eq!(game.record.initial, START_POSITION);
        if game.outcome.is_none() {
            assert_eq!(game.record.moves.len(), config.max_moves);
        }
    }

    #[test]
    fn game_record_replays_to_final_position() {
        let config = small_config(1, 1, 123);
        let mut rng = SmallRng::seed_from_u64(123);
        let game = play_game(&config, 0, &mut rng).unwrap();
        let state = game.record.replay().unwrap();
        assert_eq!(encode_position(&state.position), game.final_position);
        assert_eq!(state.outcome, game.outcome);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = small_config(2, 1, 9);
        let a = run_self_play(&config).unwrap();
        let b = run_self_play(&config).unwrap();
        let moves = |games: &[SelfPlayGame]| games.iter().map(|g| g.record.moves.clone()).collect::<Vec<_>>();
        assert_eq!(moves(&a), moves(&b));
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let games = run_self_play(&small_config(3, 1, 99)).unwrap();
        assert_eq!(games.len(), 3);
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let sequential = run_self_play(&small_config(4, 1, 77)).unwrap();
        let mut seen = 0;
        let parallel = run_self_play_with_callback(&small_config(4, 2, 77), |_| seen += 1).unwrap();
        assert_eq!(seen, 4);
        let ids: Vec<usize> = parallel.iter().map(|g| g.game_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        for (s, p) in sequential.iter().zip(&parallel) {
            assert_eq!(s.record, p.record);
        }
    }

    #[test]
    fn jsonl_output_is_valid() {
        let games = run_self_play(&small_config(2, 1, 5)).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["initial"].is_string());
            assert!(value["moves"].is_array());
            assert!(value["final"].is_string());
            // The flattened record loads back as a plain game record.
            let record = GameRecord::from_json(line).unwrap();
            assert!(record.replay().is_ok());
        }
    }
}
