//! Every tile sits in the cell named by its own position.

use super::Invariant;
use crate::games::elemental::GameState;
use tracing::warn;

/// Invariant: a tile's position equals the coordinates of the cell holding it.
///
/// Because each cell holds at most one tile, this also means no two tiles
/// share a position.
pub struct TilesInSyncInvariant;

impl Invariant<GameState> for TilesInSyncInvariant {
    fn holds(state: &GameState) -> bool {
        let mut in_sync = true;
        state.grid().each_cell(|position, tile| {
            if let Some(tile) = tile {
                if tile.position() != position {
                    warn!(cell = %position, tile = %tile.position(), "Tile out of sync with cell");
                    in_sync = false;
                }
            }
        });
        in_sync
    }

    fn description() -> &'static str {
        "Tile positions match the cells that hold them"
    }
}
