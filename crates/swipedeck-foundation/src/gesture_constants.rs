//! Shared gesture constants for consistent pointer handling.
//!
//! Values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor; the fixed values here work
//! well for typical desktop/mobile displays.

/// Tap dead zone in logical pixels.
///
/// If the pointer never moves more than this distance from the press
/// position, the release is treated as a tap on the active card rather than
/// a drag. Matches common touch-slop conventions for small targets.
pub const TAP_DEAD_ZONE: f32 = 5.0;

/// Distance the pointer must travel before a drag is recognized at all.
///
/// Keeps finger jitter from stealing the gesture away from taps underneath.
pub const DRAG_START_DISTANCE: f32 = 10.0;

/// Multiplier applied to a release offset to carry the card fully off-screen.
///
/// A commit animates the card to `release_offset * OFF_SCREEN_TRAVEL_FACTOR`,
/// which clears the viewport from any release position that passed the
/// commit threshold.
pub const OFF_SCREEN_TRAVEL_FACTOR: f32 = 4.5;
