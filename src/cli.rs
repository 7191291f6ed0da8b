//! Command-line interface for elemental_tiles.

use clap::{Parser, Subcommand};
use elemental_tiles::Direction;

/// Elemental Tiles - play the elemental 2048 puzzle one signal at a time
#[derive(Parser, Debug)]
#[command(name = "elemental_tiles")]
#[command(about = "Rules engine for an elemental 2048-style puzzle", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the database file (created if it doesn't exist)
    #[arg(long, global = true, default_value = "elemental_tiles.db")]
    pub db: String,

    /// Path to a TOML game config
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the current game, starting one if none is saved
    Show,

    /// Slide the tiles in one direction
    Move {
        /// Direction to slide (up, right, down, left)
        direction: Direction,
    },

    /// Continue playing after reaching the win value
    KeepPlaying,

    /// Discard the saved game and start a new one
    Restart,
}
