//! Widget configuration.

use swipedeck_animation::SpringSpec;
use swipedeck_foundation::classifier::{SwipeDirection, SwipeThresholds};
use swipedeck_foundation::geometry::{Offset, Rect, Size};
use swipedeck_foundation::gesture_constants::TAP_DEAD_ZONE;

/// Configuration for a [`SwiperState`](crate::SwiperState).
///
/// Every field has a usable default from [`SwiperConfig::new`]; thresholds
/// and the off-screen rewind position default relative to the window size and
/// follow it when the window changes, unless overridden explicitly.
#[derive(Clone, Debug)]
pub struct SwiperConfig {
    /// Host window size; sizes the active card and anchors the defaults
    /// below.
    pub window: Size,
    /// Index of the card shown first.
    pub initial_index: usize,
    /// Allow horizontal drag movement.
    pub horizontal_swipe: bool,
    /// Allow vertical drag movement.
    pub vertical_swipe: bool,
    /// Commit threshold on the horizontal axis. `None` means a quarter of
    /// the window width.
    pub horizontal_threshold: Option<f32>,
    /// Commit threshold on the vertical axis. `None` means a fifth of the
    /// window height.
    pub vertical_threshold: Option<f32>,
    /// Overlay-label threshold on the horizontal axis; falls back to the
    /// commit threshold.
    pub overlay_horizontal_threshold: Option<f32>,
    /// Overlay-label threshold on the vertical axis; falls back to the
    /// commit threshold.
    pub overlay_vertical_threshold: Option<f32>,
    pub disable_left_swipe: bool,
    pub disable_right_swipe: bool,
    pub disable_top_swipe: bool,
    pub disable_bottom_swipe: bool,
    /// Committing in this direction rewinds to the previous card instead of
    /// advancing.
    pub go_back_on_swipe_left: bool,
    pub go_back_on_swipe_right: bool,
    pub go_back_on_swipe_top: bool,
    pub go_back_on_swipe_bottom: bool,
    /// Number of cards rendered in the stack, active card included.
    pub stack_size: usize,
    /// Vertical separation between consecutive stack slots, in pixels.
    pub stack_separation: f32,
    /// Scale lost per depth slot, in percent.
    pub stack_scale_step: f32,
    /// Render cards beneath the active one.
    pub show_second_card: bool,
    /// Wrap index arithmetic at deck boundaries instead of exhausting.
    pub infinite: bool,
    /// Render the previous card so rewind has something to fly back in.
    pub show_swipe_back_card: bool,
    /// Duration of the commit fling off-screen, in milliseconds.
    pub swipe_animation_duration: u64,
    /// Spring for the cancel path (card returning to center).
    pub reset_spring: SpringSpec,
    /// Spring for stack-depth shifts and the rewind fly-in.
    pub stack_spring: SpringSpec,
    /// Drag distance below which a release counts as a tap.
    pub tap_dead_zone: f32,
    /// Where the previous card rests while hidden. `None` means one window
    /// off-screen toward the top-left.
    pub previous_card_default_position: Option<Offset>,
    pub card_horizontal_margin: f32,
    pub card_vertical_margin: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl SwiperConfig {
    pub fn new(window: Size) -> Self {
        Self {
            window,
            initial_index: 0,
            horizontal_swipe: true,
            vertical_swipe: true,
            horizontal_threshold: None,
            vertical_threshold: None,
            overlay_horizontal_threshold: None,
            overlay_vertical_threshold: None,
            disable_left_swipe: false,
            disable_right_swipe: false,
            disable_top_swipe: false,
            disable_bottom_swipe: false,
            go_back_on_swipe_left: false,
            go_back_on_swipe_right: false,
            go_back_on_swipe_top: false,
            go_back_on_swipe_bottom: false,
            stack_size: 1,
            stack_separation: 10.0,
            stack_scale_step: 3.0,
            show_second_card: true,
            infinite: false,
            show_swipe_back_card: false,
            swipe_animation_duration: 350,
            reset_spring: SpringSpec::default(),
            stack_spring: SpringSpec::default(),
            tap_dead_zone: TAP_DEAD_ZONE,
            previous_card_default_position: None,
            card_horizontal_margin: 10.0,
            card_vertical_margin: 10.0,
            margin_top: 0.0,
            margin_bottom: 0.0,
        }
    }

    /// Thresholds a release must exceed to commit.
    pub fn commit_thresholds(&self) -> SwipeThresholds {
        SwipeThresholds {
            horizontal: self
                .horizontal_threshold
                .unwrap_or(self.window.width / 4.0),
            vertical: self.vertical_threshold.unwrap_or(self.window.height / 5.0),
        }
    }

    /// Thresholds driving the live overlay label during a drag.
    pub fn overlay_thresholds(&self) -> SwipeThresholds {
        let commit = self.commit_thresholds();
        SwipeThresholds {
            horizontal: self
                .overlay_horizontal_threshold
                .unwrap_or(commit.horizontal),
            vertical: self.overlay_vertical_threshold.unwrap_or(commit.vertical),
        }
    }

    pub fn direction_enabled(&self, direction: SwipeDirection) -> bool {
        match direction {
            SwipeDirection::Left => !self.disable_left_swipe,
            SwipeDirection::Right => !self.disable_right_swipe,
            SwipeDirection::Top => !self.disable_top_swipe,
            SwipeDirection::Bottom => !self.disable_bottom_swipe,
        }
    }

    pub fn goes_back(&self, direction: SwipeDirection) -> bool {
        match direction {
            SwipeDirection::Left => self.go_back_on_swipe_left,
            SwipeDirection::Right => self.go_back_on_swipe_right,
            SwipeDirection::Top => self.go_back_on_swipe_top,
            SwipeDirection::Bottom => self.go_back_on_swipe_bottom,
        }
    }

    /// Hidden resting position for the previous card.
    pub fn previous_card_default(&self) -> Offset {
        self.previous_card_default_position
            .unwrap_or(Offset::new(-self.window.width, -self.window.height))
    }

    /// Frame of the active card inside the window.
    pub fn card_layout(&self) -> Rect {
        let width = self.window.width - self.card_horizontal_margin * 2.0;
        let height = self.window.height
            - self.card_vertical_margin * 2.0
            - self.margin_top
            - self.margin_bottom;
        Rect {
            x: self.card_horizontal_margin,
            y: self.card_vertical_margin,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_default_from_window_size() {
        let config = SwiperConfig::new(Size::new(480.0, 800.0));
        let thresholds = config.commit_thresholds();
        assert_eq!(thresholds.horizontal, 120.0);
        assert_eq!(thresholds.vertical, 160.0);
    }

    #[test]
    fn overlay_thresholds_fall_back_to_commit() {
        let mut config = SwiperConfig::new(Size::new(480.0, 800.0));
        assert_eq!(config.overlay_thresholds(), config.commit_thresholds());

        config.overlay_horizontal_threshold = Some(30.0);
        let overlay = config.overlay_thresholds();
        assert_eq!(overlay.horizontal, 30.0);
        assert_eq!(overlay.vertical, 160.0);
    }

    #[test]
    fn previous_card_hides_one_window_away() {
        let config = SwiperConfig::new(Size::new(480.0, 800.0));
        assert_eq!(config.previous_card_default(), Offset::new(-480.0, -800.0));
    }

    #[test]
    fn card_layout_applies_margins() {
        let mut config = SwiperConfig::new(Size::new(480.0, 800.0));
        config.margin_top = 20.0;
        let layout = config.card_layout();
        assert_eq!(layout.x, 10.0);
        assert_eq!(layout.y, 10.0);
        assert_eq!(layout.width, 460.0);
        assert_eq!(layout.height, 760.0);
    }
}
