//! In-process store.

use super::{GameStore, StoreError};
use crate::GameState;
use tracing::{debug, instrument};

/// Store that keeps everything in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    game_state: Option<GameState>,
    best_score: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a saved game.
    pub fn with_game_state(state: GameState) -> Self {
        Self {
            game_state: Some(state),
            best_score: 0,
        }
    }

    /// Returns true if a game is saved.
    pub fn has_game_state(&self) -> bool {
        self.game_state.is_some()
    }
}

impl GameStore for MemoryStore {
    fn game_state(&self) -> Result<Option<GameState>, StoreError> {
        Ok(self.game_state.clone())
    }

    #[instrument(skip_all, fields(score = state.score()))]
    fn set_game_state(&mut self, state: &GameState) -> Result<(), StoreError> {
        debug!("Saving game state in memory");
        self.game_state = Some(state.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear_game_state(&mut self) -> Result<(), StoreError> {
        debug!("Clearing game state in memory");
        self.game_state = None;
        Ok(())
    }

    fn best_score(&self) -> Result<u64, StoreError> {
        Ok(self.best_score)
    }

    #[instrument(skip(self))]
    fn set_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        self.best_score = score;
        Ok(())
    }
}
