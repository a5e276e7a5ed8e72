//! Batch play with a random player.
//!
//! Plays seeded games to completion by feeding each prompt a random legal
//! warpath action, and records a summary of every game as JSONL. Games run
//! concurrently on a rayon pool; game `i` uses seed `base + i`, so results
//! do not depend on scheduling.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::board::card::Era;
use crate::board::land::ALL_TRIBES;
use crate::dice::SeededDice;
use crate::engine::Game;

/// Configuration for a batch of games.
#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub num_games: usize,
    /// Stop a game at the first prompt after this many turns.
    pub max_turns: u32,
    pub threads: usize,
    /// Base seed; game `i` is played with `seed + i`.
    pub seed: u64,
    pub quiet: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        AutoplayConfig { num_games: 10, max_turns: 60, threads: 4, seed: 1, quiet: false }
    }
}

/// Errors that stop a batch.
#[derive(Debug, thiserror::Error)]
pub enum AutoplayError {
    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write records: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode record: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a game stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ended,
    TurnLimit,
    Aborted { reason: String },
}

/// Summary of one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub seed: u64,
    pub turns: u32,
    pub era: Era,
    pub chiefdoms: usize,
    pub controlled: usize,
    pub outcome: Outcome,
    pub log_lines: usize,
}

/// Chooses the next command for the random player.
fn choose_command(game: &Game, rng: &mut ChaCha8Rng) -> String {
    let enabled: Vec<String> = game
        .available_warpath_actions()
        .into_iter()
        .flat_map(|warpath| {
            let tribe = warpath.tribe.name().to_lowercase();
            warpath
                .actions
                .into_iter()
                .filter(|a| a.enabled)
                .map(move |a| format!("{} {}", a.token, tribe))
        })
        .collect();
    if enabled.is_empty() {
        let tribe = ALL_TRIBES[rng.gen_range(0..ALL_TRIBES.len())];
        format!("att {}", tribe.name().to_lowercase())
    } else {
        enabled[rng.gen_range(0..enabled.len())].clone()
    }
}

/// Plays one game with seed `seed`.
pub fn play_game(game_id: usize, seed: u64, max_turns: u32) -> GameRecord {
    let mut game = Game::new(SeededDice::new(seed));
    let mut player = ChaCha8Rng::seed_from_u64(seed);

    let mut result = game.start();
    let outcome = loop {
        if let Err(e) = &result {
            break Outcome::Aborted { reason: e.to_string() };
        }
        if game.is_over() {
            break Outcome::Ended;
        }
        if game.board().turn > max_turns {
            break Outcome::TurnLimit;
        }
        let command = choose_command(&game, &mut player);
        tracing::trace!(game_id, %command, "random player");
        result = game.handle_request(&command);
    };

    let board = game.board();
    GameRecord {
        game_id,
        seed,
        turns: board.turn,
        era: board.current_era,
        chiefdoms: board.chiefdom_count(),
        controlled: board.controlled_count(),
        outcome,
        log_lines: game.log().len(),
    }
}

/// Plays every game in the batch and returns the records in game order.
pub fn run_autoplay(config: &AutoplayConfig) -> Result<Vec<GameRecord>, AutoplayError> {
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads.max(1)).build()?;

    let records = pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| {
                let record = play_game(i, config.seed.wrapping_add(i as u64), config.max_turns);
                if !config.quiet {
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    tracing::info!(
                        "Game {}/{}: {:?} after {} turns ({} controlled)",
                        n,
                        config.num_games,
                        record.outcome,
                        record.turns,
                        record.controlled
                    );
                }
                record
            })
            .collect()
    });
    Ok(records)
}

/// Writes records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[GameRecord], out: &mut W) -> Result<(), AutoplayError> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Prints a summary of a batch to stderr.
pub fn print_summary(records: &[GameRecord]) {
    let total = records.len().max(1) as f64;
    let ended = records.iter().filter(|r| r.outcome == Outcome::Ended).count();
    let limited = records.iter().filter(|r| r.outcome == Outcome::TurnLimit).count();
    let aborted = records.len() - ended - limited;
    let turns: u32 = records.iter().map(|r| r.turns).sum();
    let controlled: usize = records.iter().map(|r| r.controlled).sum();

    eprintln!("=== Autoplay Summary ===");
    eprintln!("Games: {}", records.len());
    eprintln!("Ended: {}  Turn limit: {}  Aborted: {}", ended, limited, aborted);
    eprintln!("Avg turns/game: {:.1}", f64::from(turns) / total);
    eprintln!("Avg controlled chiefdoms: {:.1}", controlled as f64 / total);
}
