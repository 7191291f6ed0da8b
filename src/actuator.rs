//! Render sinks: where the game sends its state after every change.

use crate::{Grid, NextTile};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Everything a renderer needs besides the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    /// Current score.
    score: u64,
    /// True once no moves are left.
    over: bool,
    /// True once the win value was reached.
    won: bool,
    /// Best score across games.
    best_score: u64,
    /// Element that spawns next.
    next_tile: NextTile,
    /// True if the game no longer accepts moves.
    terminated: bool,
}

/// Receives the board after every state change.
pub trait Actuator {
    /// Renders the grid and payload.
    fn actuate(&mut self, grid: &Grid, payload: &RenderPayload);

    /// Dismisses any win or game-over overlay.
    fn continue_game(&mut self);
}

/// Actuator that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingActuator;

impl Actuator for TracingActuator {
    #[instrument(skip_all)]
    fn actuate(&mut self, grid: &Grid, payload: &RenderPayload) {
        info!(
            tiles = grid.tile_count(),
            score = payload.score,
            best_score = payload.best_score,
            over = payload.over,
            won = payload.won,
            terminated = payload.terminated,
            next = %payload.next_tile.kind(),
            "Actuate"
        );
    }

    #[instrument(skip_all)]
    fn continue_game(&mut self) {
        info!("Continue game");
    }
}

/// Actuator that keeps the most recent frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    last_grid: Option<Grid>,
    last_payload: Option<RenderPayload>,
    frames: usize,
    continues: usize,
}

impl RecordingActuator {
    /// Creates an actuator with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grid from the last frame.
    pub fn last_grid(&self) -> Option<&Grid> {
        self.last_grid.as_ref()
    }

    /// Payload from the last frame.
    pub fn last_payload(&self) -> Option<&RenderPayload> {
        self.last_payload.as_ref()
    }

    /// Number of frames received.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Number of continue signals received.
    pub fn continues(&self) -> usize {
        self.continues
    }
}

impl Actuator for RecordingActuator {
    fn actuate(&mut self, grid: &Grid, payload: &RenderPayload) {
        self.last_grid = Some(grid.clone());
        self.last_payload = Some(*payload);
        self.frames += 1;
    }

    fn continue_game(&mut self) {
        self.continues += 1;
    }
}
