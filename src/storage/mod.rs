//! Persistence for game state and best score.

mod error;
mod memory;
mod models;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use models::{NewStoreEntry, StoreEntry};
pub use sqlite::SqliteStore;

use crate::GameState;

/// Key/value persistence used by the game manager.
///
/// Holds at most one saved game plus the best score ever reached.
pub trait GameStore {
    /// Returns the saved game, if any.
    fn game_state(&self) -> Result<Option<GameState>, StoreError>;

    /// Saves the game, replacing any previous one.
    fn set_game_state(&mut self, state: &GameState) -> Result<(), StoreError>;

    /// Discards the saved game.
    fn clear_game_state(&mut self) -> Result<(), StoreError>;

    /// Returns the best score, zero if none was recorded.
    fn best_score(&self) -> Result<u64, StoreError>;

    /// Records a new best score.
    fn set_best_score(&mut self, score: u64) -> Result<(), StoreError>;
}
