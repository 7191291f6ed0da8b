//! Elemental Tiles - command-line driver
//!
//! Each invocation restores the saved game, applies one signal, persists
//! the result and prints the frame as JSON.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use elemental_tiles::{GameConfig, GameManager, RecordingActuator, SqliteStore};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

#[instrument(skip_all, fields(db = %cli.db))]
fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::new(),
    };
    debug!(?config, "Using config");

    let store = SqliteStore::open(&cli.db).context("opening game database")?;
    let mut game = GameManager::new(config, store, RecordingActuator::new())?;

    match cli.command {
        Command::Show => {}
        Command::Move { direction } => {
            let report = game.make_move(direction)?;
            info!(%direction, moved = report.moved, points = report.points, "Move applied");
        }
        Command::KeepPlaying => {
            game.keep_playing();
            game.actuate()?;
        }
        Command::Restart => game.restart()?,
    }

    print_frame(game.actuator())
}

/// Writes the last rendered frame to stdout.
fn print_frame(actuator: &RecordingActuator) -> Result<()> {
    let frame = serde_json::json!({
        "grid": actuator.last_grid(),
        "payload": actuator.last_payload(),
    });
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}
