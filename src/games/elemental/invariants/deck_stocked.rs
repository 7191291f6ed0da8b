//! The deck is never left empty between turns.

use super::Invariant;
use crate::games::elemental::GameState;
use tracing::warn;

/// Invariant: the deck has cards and the next tile points at one of the recorded kind.
pub struct DeckStockedInvariant;

impl Invariant<GameState> for DeckStockedInvariant {
    fn holds(state: &GameState) -> bool {
        let next = state.next_tile();
        let found = state.deck().get(next.selection());
        let valid = found == Some(next.kind());
        if !valid {
            warn!(
                deck_len = state.deck().len(),
                selection = next.selection(),
                ?found,
                "Next tile does not point into the deck"
            );
        }
        valid
    }

    fn description() -> &'static str {
        "Deck is stocked and the next tile points at a matching card"
    }
}
