//! Mound Builders -- a text front end for the turn engine.
//!
//! Prints the event log as it grows, then a prompt, and reads one line of
//! input per prompt from stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use moundbuilders::config::{ConfigError, GameConfig};
use moundbuilders::{EngineError, Game};

#[derive(Parser, Debug)]
#[command(name = "moundbuilders", about = "Play Mound Builders in the terminal")]
struct Args {
    /// Dice seed for a new game
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Game state file, loaded if present and saved after every request
    #[arg(long)]
    state: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "moundbuilders=trace"; overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(args: Args) -> Result<(), RunError> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let (mut game, resumed): (Game, bool) = match &args.state {
        Some(path) if path.exists() => {
            tracing::info!(path = %path.display(), "resuming saved game");
            (Game::load(path)?, true)
        }
        _ => {
            let dice = config.dice();
            tracing::info!(seed = dice.seed(), "new game");
            let mut game = Game::new(dice);
            game.start()?;
            (game, false)
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut lines = stdin.lock().lines();
    // A resumed game only shows what happens from here on.
    let mut printed = if config.echo_log && !resumed { 0 } else { game.log().len() };

    loop {
        if let Some(path) = &args.state {
            game.save(path)?;
        }
        if config.echo_log {
            for line in game.log().since(printed) {
                writeln!(out, "{}", line)?;
            }
        }
        printed = game.log().len();

        let Some(response) = game.response() else {
            break;
        };
        if let Some(error) = &response.error {
            writeln!(out, "\nError: {}", error)?;
        }
        write!(out, "\n{}> ", response.prompt)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(());
        };
        game.handle_request(&line?)?;
    }

    writeln!(out, "\nEnd of game")?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("moundbuilders: {}", e);
            ExitCode::FAILURE
        }
    }
}
