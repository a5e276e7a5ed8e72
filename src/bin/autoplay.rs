//! Batch play CLI.
//!
//! Plays seeded games with a random player and writes one JSON record per
//! game.
//!
//! Usage:
//!   cargo run --release --bin autoplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use moundbuilders::autoplay::{self, AutoplayConfig, AutoplayError};

#[derive(Parser, Debug)]
#[command(name = "autoplay", about = "Play many seeded games with a random player")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Stop each game after this many turns
    #[arg(long, default_value_t = 60)]
    max_turns: u32,

    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Output file path (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Suppress progress and summary output
    #[arg(long)]
    quiet: bool,
}

fn run(args: Args) -> Result<(), AutoplayError> {
    let config = AutoplayConfig {
        num_games: args.games,
        max_turns: args.max_turns,
        threads: args.threads,
        seed: args.seed,
        quiet: args.quiet,
    };

    let start = Instant::now();
    let records = autoplay::run_autoplay(&config)?;
    match &args.output {
        Some(path) => autoplay::write_jsonl(&records, &mut BufWriter::new(File::create(path)?))?,
        None => autoplay::write_jsonl(&records, &mut io::stdout().lock())?,
    }

    if !config.quiet {
        autoplay::print_summary(&records);
        eprintln!("Elapsed: {:.1}s", start.elapsed().as_secs_f64());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("autoplay: {}", e);
            ExitCode::FAILURE
        }
    }
}
