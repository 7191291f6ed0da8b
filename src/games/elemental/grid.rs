//! The square board and its occupancy queries.

use super::tile::Tile;
use super::types::{Kind, Position};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Fixed-size square board of optional tiles, indexed `cells[x][y]`.
///
/// Tiles only enter or leave through [`Grid::insert_tile`] and
/// [`Grid::remove_tile`] (plus the crate-internal moves built on them), which
/// keeps each tile's own position equal to the cell that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GridSnapshot", try_from = "GridSnapshot")]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Option<Tile>>>,
}

impl Grid {
    /// Creates an empty grid.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![None; size]; size],
        }
    }

    /// Edge length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw cell layout, `cells[x][y]`.
    pub fn cells(&self) -> &[Vec<Option<Tile>>] {
        &self.cells
    }

    /// Returns true if at least one cell is empty.
    pub fn cells_available(&self) -> bool {
        self.cells.iter().flatten().any(Option::is_none)
    }

    /// All empty cells, column by column.
    pub fn available_cells(&self) -> Vec<Position> {
        let mut available = Vec::new();
        self.each_cell(|position, tile| {
            if tile.is_none() {
                available.push(position);
            }
        });
        available
    }

    /// Picks one empty cell uniformly at random, or `None` if the grid is full.
    #[instrument(skip(self, rng))]
    pub fn random_available_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let cell = self.available_cells().choose(rng).copied();
        debug!(?cell, "Random available cell");
        cell
    }

    /// Returns the tile at `position`. Out-of-bounds positions hold nothing.
    pub fn cell_content(&self, position: Position) -> Option<&Tile> {
        self.cells
            .get(position.x)
            .and_then(|column| column.get(position.y))
            .and_then(Option::as_ref)
    }

    /// Returns true if `position` lies on the grid.
    pub fn within_bounds(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// Returns true if `position` lies on the grid and is empty.
    pub fn cell_available(&self, position: Position) -> bool {
        self.within_bounds(position) && self.cell_content(position).is_none()
    }

    /// Places a tile at its own position, replacing whatever was there.
    #[instrument(
        skip(self, tile),
        fields(position = %tile.position(), kind = %tile.kind(), value = tile.value())
    )]
    pub fn insert_tile(&mut self, tile: Tile) {
        let size = self.size;
        match self.cell_mut(tile.position()) {
            Some(cell) => *cell = Some(tile),
            None => warn!(size, "Tile position outside grid, dropping tile"),
        }
    }

    /// Clears the tile's cell if it still holds this exact tile, returning the removed tile.
    ///
    /// Tiles are matched by [`Tile::id`], so an equal but distinct tile is left in place.
    #[instrument(skip(self, tile), fields(position = %tile.position()))]
    pub fn remove_tile(&mut self, tile: &Tile) -> Option<Tile> {
        let cell = self.cell_mut(tile.position())?;
        if cell.as_ref().map(Tile::id) == Some(tile.id()) {
            cell.take()
        } else {
            debug!("Cell no longer holds this tile");
            None
        }
    }

    /// Visits every cell column by column with its coordinates and content.
    pub fn each_cell<F>(&self, mut visitor: F)
    where
        F: FnMut(Position, Option<&Tile>),
    {
        for (x, column) in self.cells.iter().enumerate() {
            for (y, cell) in column.iter().enumerate() {
                visitor(Position::new(x, y), cell.as_ref());
            }
        }
    }

    /// Iterates over occupied cells.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten().flatten()
    }

    /// Number of occupied cells.
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    /// Resets per-move metadata on every tile.
    pub(super) fn prepare_tiles(&mut self) {
        for tile in self.cells.iter_mut().flatten().flatten() {
            tile.prepare();
        }
    }

    /// Takes the tile out of `position`, leaving the cell empty.
    pub(super) fn take_tile(&mut self, position: Position) -> Option<Tile> {
        self.cell_mut(position).and_then(|cell| cell.take())
    }

    /// Slides the tile at `from` into the empty cell `to`.
    pub(super) fn move_tile(&mut self, from: Position, to: Position) {
        if from == to {
            return;
        }
        if let Some(mut tile) = self.take_tile(from) {
            tile.update_position(to);
            self.insert_tile(tile);
        }
    }

    fn cell_mut(&mut self, position: Position) -> Option<&mut Option<Tile>> {
        self.cells
            .get_mut(position.x)
            .and_then(|column| column.get_mut(position.y))
    }
}

/// Serialized form of a tile: position, value and kind only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Cell the tile occupies.
    pub position: Position,
    /// Tile value.
    pub value: u32,
    /// Tile kind.
    pub kind: Kind,
}

/// Serialized form of a grid: `{ size, cells }` with `cells[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Edge length.
    pub size: usize,
    /// Cell layout.
    pub cells: Vec<Vec<Option<TileRecord>>>,
}

impl From<Grid> for GridSnapshot {
    fn from(grid: Grid) -> Self {
        let cells = grid
            .cells
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|cell| {
                        cell.as_ref().map(|tile| TileRecord {
                            position: tile.position(),
                            value: tile.value(),
                            kind: tile.kind(),
                        })
                    })
                    .collect()
            })
            .collect();
        Self {
            size: grid.size,
            cells,
        }
    }
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = String;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        if snapshot.cells.len() != snapshot.size
            || snapshot.cells.iter().any(|column| column.len() != snapshot.size)
        {
            return Err(format!(
                "Grid cells do not form a {0}x{0} layout",
                snapshot.size
            ));
        }

        let mut grid = Grid::new(snapshot.size);
        for (x, column) in snapshot.cells.into_iter().enumerate() {
            for (y, record) in column.into_iter().enumerate() {
                let Some(record) = record else { continue };
                if record.position != Position::new(x, y) {
                    return Err(format!(
                        "Tile at cell ({}, {}) claims position {}",
                        x, y, record.position
                    ));
                }
                grid.insert_tile(Tile::new(record.position, record.value, record.kind));
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn number(x: usize, y: usize, value: u32) -> Tile {
        Tile::new(Position::new(x, y), value, Kind::Number)
    }

    #[test]
    fn test_empty_grid_is_all_available() {
        let grid = Grid::new(4);
        assert!(grid.cells_available());
        assert_eq!(grid.available_cells().len(), 16);
        assert_eq!(grid.tile_count(), 0);
    }

    #[test]
    fn test_insert_and_query() {
        let mut grid = Grid::new(4);
        grid.insert_tile(number(1, 2, 8));

        assert_eq!(grid.cell_content(Position::new(1, 2)).map(Tile::value), Some(8));
        assert!(!grid.cell_available(Position::new(1, 2)));
        assert!(grid.cell_available(Position::new(2, 1)));
        assert!(!grid.cell_available(Position::new(4, 0)));
        assert_eq!(grid.available_cells().len(), 15);
    }

    #[test]
    fn test_within_bounds() {
        let grid = Grid::new(4);
        assert!(grid.within_bounds(Position::new(0, 0)));
        assert!(grid.within_bounds(Position::new(3, 3)));
        assert!(!grid.within_bounds(Position::new(4, 3)));
        assert!(!grid.within_bounds(Position::new(0, 4)));
    }

    #[test]
    fn test_remove_only_matching_tile() {
        let mut grid = Grid::new(4);
        let tile = number(0, 0, 2);
        grid.insert_tile(tile.clone());

        assert!(grid.remove_tile(&number(0, 0, 4)).is_none());
        assert_eq!(grid.tile_count(), 1);

        let removed = grid.remove_tile(&tile).expect("Tile removed");
        assert_eq!(removed.id(), tile.id());
        assert_eq!(grid.tile_count(), 0);
    }

    #[test]
    fn test_remove_ignores_equal_replacement() {
        let mut grid = Grid::new(4);
        let stale = number(0, 0, 2);
        grid.insert_tile(stale.clone());
        grid.take_tile(Position::new(0, 0));
        let replacement = number(0, 0, 2);
        grid.insert_tile(replacement.clone());
        assert_eq!(stale, replacement);

        assert!(grid.remove_tile(&stale).is_none());
        assert_eq!(
            grid.cell_content(Position::new(0, 0)).map(Tile::id),
            Some(replacement.id())
        );
    }

    #[test]
    fn test_full_grid_has_no_random_cell() {
        let mut grid = Grid::new(2);
        for x in 0..2 {
            for y in 0..2 {
                grid.insert_tile(number(x, y, 2));
            }
        }
        let mut rng = StdRng::seed_from_u64(7);
        assert!(!grid.cells_available());
        assert_eq!(grid.random_available_cell(&mut rng), None);
    }

    #[test]
    fn test_random_cell_is_empty() {
        let mut grid = Grid::new(4);
        grid.insert_tile(number(0, 0, 2));
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let cell = grid.random_available_cell(&mut rng).unwrap();
            assert!(grid.cell_available(cell));
        }
    }

    #[test]
    fn test_each_cell_visits_column_by_column() {
        let grid = Grid::new(2);
        let mut visited = Vec::new();
        grid.each_cell(|position, _| visited.push(position));
        assert_eq!(
            visited,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_move_tile_keeps_position_in_sync() {
        let mut grid = Grid::new(4);
        grid.insert_tile(number(0, 3, 2));
        grid.move_tile(Position::new(0, 3), Position::new(0, 0));

        let tile = grid.cell_content(Position::new(0, 0)).unwrap();
        assert_eq!(tile.position(), Position::new(0, 0));
        assert!(grid.cell_available(Position::new(0, 3)));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut grid = Grid::new(2);
        grid.insert_tile(Tile::new(Position::new(1, 0), 1, Kind::Grass));

        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["size"], 2);
        assert!(json["cells"][0][0].is_null());
        assert_eq!(json["cells"][1][0]["kind"], "grass");
        assert_eq!(json["cells"][1][0]["value"], 1);
        assert_eq!(json["cells"][1][0]["position"]["x"], 1);
    }

    #[test]
    fn test_restore_rejects_misplaced_tile() {
        let json = serde_json::json!({
            "size": 2,
            "cells": [
                [{"position": {"x": 1, "y": 1}, "value": 2, "kind": "number"}, null],
                [null, null]
            ]
        });
        assert!(serde_json::from_value::<Grid>(json).is_err());
    }

    #[test]
    fn test_restore_rejects_wrong_shape() {
        let json = serde_json::json!({ "size": 3, "cells": [[null], [null]] });
        assert!(serde_json::from_value::<Grid>(json).is_err());
    }
}
