//! Deck index arithmetic.

/// The index triple the render layer works from.
///
/// `previous` and `secondary` wrap around the deck in both directions so the
/// rewind card and the card rising behind the active one are always defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardIndexes {
    pub active: usize,
    pub previous: usize,
    pub secondary: usize,
}

/// Computes the index triple for the given active index.
///
/// `active == deck_len` is allowed and marks an exhausted deck (one past the
/// end); `previous` still points at the last card so rewind can restore it.
pub fn card_indexes(active: usize, deck_len: usize) -> CardIndexes {
    assert!(deck_len > 0, "deck must contain at least one card");
    debug_assert!(
        active <= deck_len,
        "active index {} past the exhausted-deck marker for deck of {}",
        active,
        deck_len
    );
    CardIndexes {
        active,
        previous: (active + deck_len - 1) % deck_len,
        secondary: (active + 1) % deck_len,
    }
}
