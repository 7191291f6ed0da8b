mod deck;
mod engine;
mod grid;
mod manager;
mod rules;
mod spawn;
mod state;
mod tile;
mod types;

pub mod invariants;

pub use deck::{Deck, NextTile};
pub use engine::{FarthestPosition, MoveEngine, MoveReport, Traversals};
pub use grid::{Grid, GridSnapshot, TileRecord};
pub use manager::GameManager;
pub use rules::{ELEMENTAL_MERGE_VALUE, Merge, can_merge, merge_outcome};
pub use spawn::{on_entry_edge, spawn_cell};
pub use state::GameState;
pub use tile::{Tile, TileId};
pub use types::{Direction, Element, Kind, Position, Vector};
