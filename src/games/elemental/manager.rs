//! Game state machine: setup, moves, spawning, termination and persistence.

use super::engine::{MoveEngine, MoveReport};
use super::invariants::{BoardInvariants, InvariantSet};
use super::rules;
use super::spawn;
use super::state::GameState;
use super::tile::Tile;
use super::types::{Direction, Kind};
use crate::{Actuator, GameConfig, GameError, GameStore, RenderPayload};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

/// Orchestrates one game against a store and a render sink.
///
/// Owns the only [`GameState`]. Every signal (move, restart, keep playing) runs
/// to completion, including persistence and rendering, before returning.
#[derive(Debug)]
pub struct GameManager<S, A> {
    config: GameConfig,
    engine: MoveEngine,
    store: S,
    actuator: A,
    rng: StdRng,
    state: GameState,
}

impl<S, A> GameManager<S, A>
where
    S: GameStore,
    A: Actuator,
{
    /// Creates a manager and runs [`setup`](Self::setup).
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the config is invalid or the store fails.
    #[instrument(skip(store, actuator))]
    pub fn new(config: GameConfig, store: S, actuator: A) -> Result<Self, GameError> {
        config.validate()?;
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        let mut manager = Self {
            engine: MoveEngine::new(*config.win_value()),
            state: GameState::new(*config.size()),
            config,
            store,
            actuator,
            rng,
        };
        manager.setup()?;
        Ok(manager)
    }

    /// Restores the persisted game if there is one, otherwise starts a fresh game.
    /// Always ends by actuating.
    #[instrument(skip(self))]
    pub fn setup(&mut self) -> Result<(), GameError> {
        match self.store.game_state()? {
            Some(previous) => {
                info!(score = previous.score(), "Restoring saved game");
                self.state = previous;
            }
            None => {
                info!(size = self.config.size(), "Starting fresh game");
                self.state = GameState::new(*self.config.size());
                self.add_start_tiles();
            }
        }
        self.assert_invariants();
        self.actuate()
    }

    /// Discards the saved game and sets up a new one.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), GameError> {
        info!(score = self.state.score(), "Restarting");
        self.store.clear_game_state()?;
        self.actuator.continue_game();
        self.setup()
    }

    /// Lets the player continue after winning.
    ///
    /// Does not persist by itself; the next [`actuate`](Self::actuate) does.
    #[instrument(skip(self))]
    pub fn keep_playing(&mut self) {
        info!("Keep playing past win");
        self.state.set_keep_playing();
        self.actuator.continue_game();
    }

    /// Lost, or won without opting to continue.
    pub fn is_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// Plays one move.
    ///
    /// Ignored once the game is terminated. If the board changed, one tile spawns
    /// on the entry edge, the game ends if no moves remain, and the result is
    /// actuated. A board that cannot change at all also ends the game.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if persisting the result fails.
    #[instrument(skip(self), fields(score = self.state.score()))]
    pub fn make_move(&mut self, direction: Direction) -> Result<MoveReport, GameError> {
        if self.is_terminated() {
            debug!("Game terminated, ignoring move");
            return Ok(MoveReport::default());
        }

        let score_before = self.state.score();
        let report = self.engine.execute(self.state.grid_mut(), direction);

        self.state.add_score(report.points);
        if report.reached_win && !self.state.won() {
            info!(score = self.state.score(), "Game won");
            self.state.set_won();
        }
        debug_assert!(self.state.score() >= score_before, "Score decreased");

        if report.moved {
            self.add_random_tile(Some(direction));
            if !self.moves_available() {
                info!(score = self.state.score(), "Game over");
                self.state.set_over();
            }
            self.assert_invariants();
            self.actuate()?;
        } else if !self.moves_available() {
            info!(score = self.state.score(), "Game over, board is stuck");
            self.state.set_over();
            self.actuate()?;
        }

        Ok(report)
    }

    /// Plays one move from a raw input signal (0=up, 1=right, 2=down, 3=left).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidDirection`] for signals outside `0..=3`.
    pub fn make_move_signal(&mut self, signal: u8) -> Result<MoveReport, GameError> {
        let direction = Direction::try_from(signal)?;
        self.make_move(direction)
    }

    /// Spawns the next tile from the deck.
    ///
    /// With a direction, the tile appears on the edge opposite the move; without
    /// one, anywhere. Does nothing if the grid is full.
    #[instrument(skip(self))]
    pub fn add_random_tile(&mut self, direction: Option<Direction>) {
        if !self.state.grid().cells_available() {
            warn!("No empty cell to spawn into");
            return;
        }

        let next = self.state.next_tile();
        let kind = next.kind();
        self.state.deck_mut().draw(&next);

        let Some(cell) = spawn::spawn_cell(self.state.grid(), direction, &mut self.rng) else {
            return;
        };
        debug!(%cell, %kind, "Spawning tile");
        self.state
            .grid_mut()
            .insert_tile(Tile::new(cell, 1, Kind::from(kind)));

        if self.state.deck().is_empty() {
            self.shuffle_deck();
        }
        self.pick_next_tile();
    }

    /// Appends the configured quota of each element to the deck.
    pub fn shuffle_deck(&mut self) {
        let quota = *self.config.deck_quota();
        self.state.deck_mut().shuffle(quota);
    }

    /// Chooses the deck entry the next spawn consumes.
    pub fn pick_next_tile(&mut self) {
        match self.state.deck().pick(&mut self.rng) {
            Some(next) => self.state.set_next_tile(next),
            None => warn!("Cannot pick next tile from an empty deck"),
        }
    }

    /// True if an empty cell exists or two neighbouring tiles could merge.
    pub fn moves_available(&self) -> bool {
        self.state.grid().cells_available() || self.tile_matches_available()
    }

    /// Updates the best score, persists or clears the game, and renders.
    ///
    /// # Errors
    ///
    /// Returns [`GameError`] if the store fails.
    #[instrument(skip(self))]
    pub fn actuate(&mut self) -> Result<(), GameError> {
        let score = self.state.score();
        if self.store.best_score()? < score {
            debug!(score, "New best score");
            self.store.set_best_score(score)?;
        }

        if self.state.over() {
            self.store.clear_game_state()?;
        } else {
            self.store.set_game_state(&self.state)?;
        }

        let payload = RenderPayload::new(
            score,
            self.state.over(),
            self.state.won(),
            self.store.best_score()?,
            self.state.next_tile(),
            self.is_terminated(),
        );
        self.actuator.actuate(self.state.grid(), &payload);
        Ok(())
    }

    /// Returns the current game state, the form that gets persisted.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the render sink.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    fn add_start_tiles(&mut self) {
        self.shuffle_deck();
        self.pick_next_tile();
        for _ in 0..*self.config.start_tiles() {
            self.add_random_tile(None);
        }
    }

    fn tile_matches_available(&self) -> bool {
        let grid = self.state.grid();
        grid.tiles().any(|tile| {
            Direction::ALL.iter().any(|direction| {
                tile.position()
                    .offset(direction.vector())
                    .and_then(|cell| grid.cell_content(cell))
                    .is_some_and(|other| rules::can_merge(tile, other))
            })
        })
    }

    fn assert_invariants(&self) {
        debug_assert!(
            BoardInvariants::check_all(&self.state).is_ok(),
            "Board invariants violated"
        );
    }
}
