//! Where new tiles appear.
//!
//! After a move, tiles enter from the edge opposite the movement direction.
//! During setup there is no direction and any empty cell will do.

use super::grid::Grid;
use super::types::{Direction, Position};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument, warn};

/// Returns true if `position` lies on the edge tiles enter from after a move in `direction`.
pub fn on_entry_edge(position: Position, direction: Direction, size: usize) -> bool {
    let last = size.saturating_sub(1);
    match direction {
        Direction::Up => position.y == last,
        Direction::Right => position.x == 0,
        Direction::Down => position.y == 0,
        Direction::Left => position.x == last,
    }
}

/// Chooses the cell for the next spawned tile, or `None` if the grid is full.
///
/// With a direction, the choice is uniform over empty cells on the entry edge.
/// If that edge is full the choice falls back to any empty cell.
#[instrument(skip(grid, rng), fields(size = grid.size()))]
pub fn spawn_cell<R: Rng + ?Sized>(
    grid: &Grid,
    direction: Option<Direction>,
    rng: &mut R,
) -> Option<Position> {
    let Some(direction) = direction else {
        return grid.random_available_cell(rng);
    };

    let edge: Vec<Position> = grid
        .available_cells()
        .into_iter()
        .filter(|position| on_entry_edge(*position, direction, grid.size()))
        .collect();

    match edge.choose(rng) {
        Some(cell) => {
            debug!(%cell, candidates = edge.len(), "Spawn cell on entry edge");
            Some(*cell)
        }
        None => {
            warn!(%direction, "Entry edge full, spawning anywhere");
            grid.random_available_cell(rng)
        }
    }
}
