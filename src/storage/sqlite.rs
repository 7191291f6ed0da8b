//! SQLite-backed store.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use super::{GameStore, NewStoreEntry, StoreEntry, StoreError, schema};
use crate::GameState;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const GAME_STATE_KEY: &str = "game_state";
const BEST_SCORE_KEY: &str = "best_score";

/// Store persisting game state and best score in a SQLite key/value table.
///
/// The game state is stored as JSON; the best score as a decimal string.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens the database at `db_path`, creating it and applying migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.as_ref().to_string(),
        };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        info!(path = %store.db_path, migrations = applied.len(), "SqliteStore opened");
        Ok(store)
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;
        let entry = schema::store_entries::table
            .find(key)
            .select(StoreEntry::as_select())
            .first::<StoreEntry>(&mut conn)
            .optional()?;
        debug!(found = entry.is_some(), "Entry lookup");
        Ok(entry.map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let entry = NewStoreEntry::new(key.to_string(), value, Utc::now().naive_utc());
        diesel::replace_into(schema::store_entries::table)
            .values(&entry)
            .execute(&mut conn)?;
        debug!("Entry written");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::store_entries::table.find(key))
            .execute(&mut conn)?;
        debug!(removed, "Entry deleted");
        Ok(())
    }
}

impl GameStore for SqliteStore {
    fn game_state(&self) -> Result<Option<GameState>, StoreError> {
        match self.get(GAME_STATE_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip_all, fields(score = state.score()))]
    fn set_game_state(&mut self, state: &GameState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state)?;
        self.put(GAME_STATE_KEY, json)
    }

    fn clear_game_state(&mut self) -> Result<(), StoreError> {
        self.delete(GAME_STATE_KEY)
    }

    fn best_score(&self) -> Result<u64, StoreError> {
        match self.get(BEST_SCORE_KEY)? {
            Some(raw) => raw
                .parse()
                .map_err(|e| StoreError::new(format!("Invalid best score '{}': {}", raw, e))),
            None => Ok(0),
        }
    }

    fn set_best_score(&mut self, score: u64) -> Result<(), StoreError> {
        self.put(BEST_SCORE_KEY, score.to_string())
    }
}
