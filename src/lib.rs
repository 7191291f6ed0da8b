//! Elemental Tiles - rules engine for an elemental 2048-style puzzle
//!
//! Tiles slide across a square grid and merge. Besides the usual
//! power-of-two numbers there are three elements, Grass, Water and Fire,
//! which fuse with their neighbour in the cycle into a numeric 4.
//! New tiles are drawn from a small elemental deck and enter from the
//! edge opposite the move.
//!
//! # Architecture
//!
//! - **Games**: grid, tiles, deck, move engine and the game state machine
//! - **Storage**: persistence of the saved game and best score (memory, SQLite)
//! - **Actuator**: render sinks that receive the board after every change
//! - **Config**: TOML-loadable game rules
//!
//! # Example
//!
//! ```no_run
//! use elemental_tiles::{Direction, GameConfig, GameManager, MemoryStore, TracingActuator};
//!
//! # fn example() -> Result<(), elemental_tiles::GameError> {
//! let mut game = GameManager::new(GameConfig::new(), MemoryStore::new(), TracingActuator)?;
//! let report = game.make_move(Direction::Left)?;
//! println!("moved: {}, score: {}", report.moved, game.state().score());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod actuator;
mod config;
mod error;
mod games;
mod storage;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig, MAX_GRID_SIZE};

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Render sinks
pub use actuator::{Actuator, RecordingActuator, RenderPayload, TracingActuator};

// Crate-level exports - Persistence
pub use storage::{GameStore, MemoryStore, NewStoreEntry, SqliteStore, StoreEntry, StoreError};

// Crate-level exports - Game types
pub use games::elemental::{
    Deck, Direction, ELEMENTAL_MERGE_VALUE, Element, FarthestPosition, GameManager, GameState,
    Grid, GridSnapshot, Kind, Merge, MoveEngine, MoveReport, NextTile, Position, Tile, TileId,
    TileRecord, Traversals, Vector, can_merge, merge_outcome, on_entry_edge, spawn_cell,
};

// Crate-level exports - Invariants
pub use games::elemental::invariants::{
    BoardInvariants, DeckStockedInvariant, Invariant, InvariantSet, InvariantViolation,
    TilesInSyncInvariant,
};
