//! Swipeable card-deck widget core.
//!
//! A [`SwiperState`] owns the deck indexes, the drag offset, and the stacked
//! depth visuals, and turns gesture events into commit-or-cancel decisions.
//! Rendering, styling, and pointer capture stay with the host: feed gesture
//! events in with [`SwiperState::handle_event`], drain animation frames
//! through the runtime, and paint whatever [`SwiperState::stack_entries`]
//! returns.

pub mod callbacks;
pub mod config;
pub mod control;
pub mod deck;
pub mod error;
pub mod render;
pub mod stack;
pub mod state;

pub use callbacks::SwiperCallbacks;
pub use config::SwiperConfig;
pub use deck::{card_indexes, CardIndexes};
pub use error::{Result, SwiperError};
pub use render::StackEntry;
pub use stack::{StackSlot, StackSlots};
pub use state::SwiperState;

pub use swipedeck_foundation::classifier::SwipeDirection;
