//! Tiles: the occupants of grid cells.

use super::types::{Kind, Position};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TILE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a tile, unique within the process.
///
/// Clones share the id of the tile they were cloned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(u64);

impl TileId {
    fn next() -> Self {
        Self(NEXT_TILE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A single occupant of one grid cell.
///
/// Kind and value never change after construction. The position is only moved by
/// the grid and the move engine, which keep it in sync with the cell holding the
/// tile. `previous_position` and `merged_from` are per-move metadata for renderers.
#[derive(Debug, Clone)]
pub struct Tile {
    id: TileId,
    position: Position,
    kind: Kind,
    value: u32,
    previous_position: Option<Position>,
    merged_from: Option<Box<[Tile; 2]>>,
}

impl Tile {
    /// Creates a tile at `position`.
    pub fn new(position: Position, value: u32, kind: Kind) -> Self {
        Self {
            id: TileId::next(),
            position,
            kind,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Returns the tile's identity.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Returns the cell this tile occupies.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the tile kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the tile value. Elemental tiles carry a fixed value of 1.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Where the tile stood before the current move, if a move has started.
    pub fn previous_position(&self) -> Option<Position> {
        self.previous_position
    }

    /// The two tiles consumed to create this one during the current move.
    pub fn merged_from(&self) -> Option<&[Tile; 2]> {
        self.merged_from.as_deref()
    }

    /// Returns true if this tile was produced by a merge this move.
    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }

    /// Clears merge metadata and snapshots the current position.
    pub(super) fn prepare(&mut self) {
        self.merged_from = None;
        self.previous_position = Some(self.position);
    }

    pub(super) fn update_position(&mut self, position: Position) {
        self.position = position;
    }

    pub(super) fn set_merged_from(&mut self, sources: [Tile; 2]) {
        self.merged_from = Some(Box::new(sources));
    }
}

/// Tiles are equal when they hold the same cell with the same kind and value.
/// Identity and move metadata are ignored.
impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.kind == other.kind && self.value == other.value
    }
}

impl Eq for Tile {}
