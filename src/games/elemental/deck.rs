//! The elemental deck that decides which kind spawns next.

use super::types::Element;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Finite pool of elements drawn from when spawning tiles.
///
/// Restocking appends a fixed quota of each element in kind-grouped order;
/// randomness comes from which index is picked, not from the deck order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vec<Element>,
}

impl Deck {
    /// Creates an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards left.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if no cards are left.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in deck order.
    pub fn cards(&self) -> &[Element] {
        &self.cards
    }

    /// Returns the card at `index`.
    pub fn get(&self, index: usize) -> Option<Element> {
        self.cards.get(index).copied()
    }

    /// Appends `quota` copies of each element, grouped by kind.
    #[instrument(skip(self), fields(before = self.cards.len()))]
    pub fn shuffle(&mut self, quota: usize) {
        for element in Element::ALL {
            self.cards.extend(std::iter::repeat_n(element, quota));
        }
        debug!(after = self.cards.len(), "Deck restocked");
    }

    /// Picks a uniformly random index, or `None` if the deck is empty.
    #[instrument(skip(self, rng), fields(len = self.cards.len()))]
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NextTile> {
        if self.cards.is_empty() {
            return None;
        }
        let selection = rng.random_range(0..self.cards.len());
        let next = NextTile::new(selection, self.cards[selection]);
        debug!(?next, "Picked next tile");
        Some(next)
    }

    /// Removes the card `next` points at.
    ///
    /// Returns the removed element, or `None` if the selection no longer exists.
    #[instrument(skip(self), fields(len = self.cards.len()))]
    pub fn draw(&mut self, next: &NextTile) -> Option<Element> {
        if next.selection >= self.cards.len() {
            warn!(selection = next.selection, "Next tile selection outside deck");
            return None;
        }
        let drawn = self.cards.remove(next.selection);
        if drawn != next.kind {
            warn!(expected = %next.kind, found = %drawn, "Deck entry differs from next tile");
        }
        Some(drawn)
    }
}

/// The precomputed card that the next spawn consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextTile {
    selection: usize,
    kind: Element,
}

impl NextTile {
    /// Creates a pointer to deck index `selection` holding `kind`.
    pub fn new(selection: usize, kind: Element) -> Self {
        Self { selection, kind }
    }

    /// Index into the current deck.
    pub fn selection(&self) -> usize {
        self.selection
    }

    /// Element at that index.
    pub fn kind(&self) -> Element {
        self.kind
    }
}

impl Default for NextTile {
    fn default() -> Self {
        Self::new(0, Element::Grass)
    }
}
