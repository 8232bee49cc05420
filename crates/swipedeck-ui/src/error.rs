//! Error type for the widget's public control surface.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SwiperError {
    /// The widget needs at least one card to be usable.
    #[error("deck must contain at least one card")]
    EmptyDeck,

    /// A card index referred to a card that does not exist.
    #[error("card index {index} out of range for deck of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A programmatic swipe was asked to travel along a non-finite vector.
    #[error("swipe vector must be finite, got ({x}, {y})")]
    DegenerateVector { x: f32, y: f32 },
}

pub type Result<T> = std::result::Result<T, SwiperError>;
