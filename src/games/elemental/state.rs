//! The single in-memory game state and its persisted snapshot form.

use super::deck::{Deck, NextTile};
use super::grid::Grid;
use serde::{Deserialize, Serialize};

/// Complete game state.
///
/// Serializes to `{ grid: {size, cells}, score, over, won, keepPlaying, deck, nextTile }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    grid: Grid,
    score: u64,
    over: bool,
    won: bool,
    keep_playing: bool,
    deck: Deck,
    next_tile: NextTile,
}

impl GameState {
    /// Creates a blank state: empty grid, zero score, empty deck.
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            score: 0,
            over: false,
            won: false,
            keep_playing: false,
            deck: Deck::new(),
            next_tile: NextTile::default(),
        }
    }

    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the score.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Returns true once no moves are left.
    pub fn over(&self) -> bool {
        self.over
    }

    /// Returns true once the win value has been reached.
    pub fn won(&self) -> bool {
        self.won
    }

    /// Returns true if the player chose to continue after winning.
    pub fn keep_playing(&self) -> bool {
        self.keep_playing
    }

    /// Returns the deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the next tile to spawn.
    pub fn next_tile(&self) -> NextTile {
        self.next_tile
    }

    /// Lost, or won without opting to continue.
    pub fn is_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    pub(super) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub(super) fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub(super) fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    pub(super) fn set_over(&mut self) {
        self.over = true;
    }

    pub(super) fn set_won(&mut self) {
        self.won = true;
    }

    pub(super) fn set_keep_playing(&mut self) {
        self.keep_playing = true;
    }

    pub(super) fn set_next_tile(&mut self, next_tile: NextTile) {
        self.next_tile = next_tile;
    }
}
