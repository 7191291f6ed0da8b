//! Game configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Largest accepted grid edge length.
pub const MAX_GRID_SIZE: usize = 16;

/// Tunable rules for a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid edge length.
    #[serde(default = "default_size")]
    size: usize,

    /// Tiles spawned when a fresh game is set up.
    #[serde(default = "default_start_tiles")]
    start_tiles: usize,

    /// Copies of each element appended to the deck on every restock.
    #[serde(default = "default_deck_quota")]
    deck_quota: usize,

    /// Numeric tile value that wins the game.
    #[serde(default = "default_win_value")]
    win_value: u32,

    /// RNG seed. `None` draws from OS entropy.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_size() -> usize {
    4
}

fn default_start_tiles() -> usize {
    4
}

fn default_deck_quota() -> usize {
    2
}

fn default_win_value() -> u32 {
    2048
}

impl GameConfig {
    /// Creates the standard 4x4 configuration.
    #[instrument]
    pub fn new() -> Self {
        Self {
            size: default_size(),
            start_tiles: default_start_tiles(),
            deck_quota: default_deck_quota(),
            win_value: default_win_value(),
            seed: None,
        }
    }

    /// Sets the grid size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the number of starting tiles.
    pub fn with_start_tiles(mut self, start_tiles: usize) -> Self {
        self.start_tiles = start_tiles;
        self
    }

    /// Sets the per-element deck quota.
    pub fn with_deck_quota(mut self, deck_quota: usize) -> Self {
        self.deck_quota = deck_quota;
        self
    }

    /// Sets the win value.
    pub fn with_win_value(mut self, win_value: u32) -> Self {
        self.win_value = win_value;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Loads configuration from a TOML file and validates it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(size = config.size, seed = ?config.seed, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text and validates it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations no game can be played with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::new("Grid size must be at least 1"));
        }
        if self.size > MAX_GRID_SIZE {
            return Err(ConfigError::new(format!(
                "Grid size {} exceeds the maximum of {}",
                self.size, MAX_GRID_SIZE
            )));
        }
        let cells = self
            .size
            .checked_mul(self.size)
            .ok_or_else(|| ConfigError::new(format!("Grid size {} is too large", self.size)))?;
        if self.start_tiles > cells {
            return Err(ConfigError::new(format!(
                "Cannot place {} start tiles on a {}x{} grid",
                self.start_tiles, self.size, self.size
            )));
        }
        if self.deck_quota == 0 {
            return Err(ConfigError::new("Deck quota must be at least 1"));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
