//! Merge rules.
//!
//! Pure functions deciding whether two tiles combine. Kept apart from the
//! move engine so the same table drives both move resolution and the
//! game-over check.

use super::tile::Tile;
use super::types::Kind;
use tracing::instrument;

/// Value of the numeric tile produced by fusing two elements.
pub const ELEMENTAL_MERGE_VALUE: u32 = 4;

/// How a sliding tile combines with the tile it runs into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// Two equal numbers fuse into their double.
    Numeric {
        /// Value of the resulting tile.
        value: u32,
    },
    /// Two cyclically paired elements fuse into a number.
    Elemental,
}

impl Merge {
    /// Value of the tile the merge produces.
    pub fn value(self) -> u32 {
        match self {
            Merge::Numeric { value } => value,
            Merge::Elemental => ELEMENTAL_MERGE_VALUE,
        }
    }
}

/// Decides how `tile` merges into `next` during a move, if at all.
///
/// A tile that already came out of a merge this move never merges again.
#[instrument(skip_all, fields(tile = %tile.kind(), next = %next.kind()))]
pub fn merge_outcome(tile: &Tile, next: &Tile) -> Option<Merge> {
    if next.is_merged() || tile.value() != next.value() {
        return None;
    }
    kinds_merge(tile.kind(), next.kind(), tile.value())
}

/// Returns true if two neighbouring tiles could merge on some move.
///
/// Used by the game-over check, so it ignores per-move merge metadata.
pub fn can_merge(a: &Tile, b: &Tile) -> bool {
    a.value() == b.value() && kinds_merge(a.kind(), b.kind(), a.value()).is_some()
}

fn kinds_merge(a: Kind, b: Kind, value: u32) -> Option<Merge> {
    match (a.element(), b.element()) {
        (None, None) => Some(Merge::Numeric {
            value: value.saturating_mul(2),
        }),
        (Some(a), Some(b)) if a.pairs_with(b) => Some(Merge::Elemental),
        _ => None,
    }
}
