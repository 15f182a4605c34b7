//! Headless Star Crush runner (default binary).
//!
//! Plays one seeded game with a greedy hint player and reports the result.
//! There is no terminal UI: every step is emitted as a tracing event and the
//! final board is printed as a letter grid (or the session snapshot as JSON).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use star_crush::core::{GameConfig, Session, StepEvent};

#[derive(Parser, Debug)]
#[command(name = "star-crush", about = "Play a seeded match-3 game headlessly")]
struct Args {
    /// Seed for board generation.
    #[arg(long, default_value_t = 1)]
    seed: u32,
    /// Optional TOML file with `width`, `kinds`, `moves`, `match_points`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board side length (overrides the config file).
    #[arg(long)]
    width: Option<usize>,
    /// Number of distinct tokens (overrides the config file).
    #[arg(long)]
    kinds: Option<u8>,
    /// Moves per game (overrides the config file).
    #[arg(long)]
    moves: Option<u32>,
    /// Print the final session snapshot as JSON instead of the board.
    #[arg(long)]
    json: bool,
    /// Print every step event to stdout as a JSON line while playing.
    #[arg(long)]
    events: bool,
    /// Tracing filter, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(args.log.clone()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(&args)?;
    info!(
        seed = args.seed,
        width = config.width,
        kinds = config.kinds,
        moves = config.moves,
        "starting game"
    );

    let mut session = Session::new(config, args.seed).context("failed to start session")?;
    run(&mut session, args.events)?;

    if args.json {
        let json = serde_json::to_string_pretty(&session.snapshot())
            .context("failed to serialize snapshot")?;
        println!("{json}");
    } else {
        println!("{}", session.board());
        println!(
            "score {} | moves left {} | tokens left {}",
            session.score(),
            session.moves_left(),
            session.board().occupied_count()
        );
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(kinds) = args.kinds {
        config.kinds = kinds;
    }
    if let Some(moves) = args.moves {
        config.moves = moves;
    }
    config.validate().context("invalid game configuration")?;
    Ok(config)
}

/// Drive moves one primitive at a time until the game ends or the board is stuck.
fn run(session: &mut Session, print_events: bool) -> Result<()> {
    while !session.game_over() {
        let Some(&(a, b)) = session.board().valid_swaps().first() else {
            warn!(score = session.score(), "no swap can make a match, stopping");
            break;
        };

        session.begin_move(a, b)?;
        while let Some(event) = session.advance()? {
            if print_events {
                println!(
                    "{}",
                    serde_json::to_string(&event).context("failed to serialize event")?
                );
            }
            match event {
                StepEvent::Swapped { a, b } => info!(a, b, "swap"),
                StepEvent::Reverted { a, b } => info!(a, b, "revert"),
                StepEvent::Cleared {
                    cells,
                    points,
                    streak,
                } => info!(cells, points, streak, score = session.score(), "clear"),
                StepEvent::Collapsed => {}
                StepEvent::Settled => info!(moves_left = session.moves_left(), "settled"),
            }
        }
    }

    if session.game_over() {
        info!(score = session.score(), best = session.best_score(), "game over");
    }
    Ok(())
}
