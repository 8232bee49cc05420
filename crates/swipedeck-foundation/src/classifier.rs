//! Swipe direction classification.
//!
//! A drag offset classifies into at most one direction: the dominant axis is
//! chosen first, then the offset along that axis must exceed the axis
//! threshold. The same rule serves live overlay feedback (against overlay
//! thresholds) and the release-time commit decision (against commit
//! thresholds), so the label a user sees mid-drag always agrees with what a
//! release at that point would do.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Top,
    Bottom,
}

impl SwipeDirection {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, SwipeDirection::Left | SwipeDirection::Right)
    }
}

/// Per-axis magnitudes a drag must exceed to classify.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeThresholds {
    pub horizontal: f32,
    pub vertical: f32,
}

impl SwipeThresholds {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Classifies a drag offset into a swipe direction, or `None` when the
/// offset stays within the thresholds.
///
/// When `|dx| == |dy|` the horizontal axis wins, so classification is
/// deterministic for any finite input.
pub fn classify(dx: f32, dy: f32, thresholds: SwipeThresholds) -> Option<SwipeDirection> {
    if dx.abs() >= dy.abs() {
        if dx.abs() > thresholds.horizontal {
            if dx > 0.0 {
                Some(SwipeDirection::Right)
            } else {
                Some(SwipeDirection::Left)
            }
        } else {
            None
        }
    } else if dy.abs() > thresholds.vertical {
        if dy > 0.0 {
            Some(SwipeDirection::Bottom)
        } else {
            Some(SwipeDirection::Top)
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: SwipeThresholds = SwipeThresholds {
        horizontal: 120.0,
        vertical: 160.0,
    };

    #[test]
    fn below_both_thresholds_is_none() {
        assert_eq!(classify(0.0, 0.0, THRESHOLDS), None);
        assert_eq!(classify(119.9, 0.0, THRESHOLDS), None);
        assert_eq!(classify(0.0, -159.9, THRESHOLDS), None);
    }

    #[test]
    fn horizontal_classification_follows_sign() {
        assert_eq!(classify(150.0, 0.0, THRESHOLDS), Some(SwipeDirection::Right));
        assert_eq!(classify(-150.0, 0.0, THRESHOLDS), Some(SwipeDirection::Left));
    }

    #[test]
    fn vertical_classification_follows_sign() {
        assert_eq!(classify(0.0, 200.0, THRESHOLDS), Some(SwipeDirection::Bottom));
        assert_eq!(classify(0.0, -200.0, THRESHOLDS), Some(SwipeDirection::Top));
    }

    #[test]
    fn dominant_axis_wins_even_when_both_exceed() {
        assert_eq!(
            classify(200.0, 180.0, THRESHOLDS),
            Some(SwipeDirection::Right)
        );
        assert_eq!(
            classify(130.0, -300.0, THRESHOLDS),
            Some(SwipeDirection::Top)
        );
    }

    #[test]
    fn exact_tie_favors_horizontal_axis() {
        assert_eq!(
            classify(200.0, 200.0, THRESHOLDS),
            Some(SwipeDirection::Right)
        );
        assert_eq!(
            classify(-200.0, -200.0, THRESHOLDS),
            Some(SwipeDirection::Left)
        );
    }

    #[test]
    fn dominant_axis_below_threshold_is_none() {
        // Vertical exceeds its threshold but horizontal dominates and does
        // not exceed its own: no classification.
        assert_eq!(classify(119.0, 119.0, THRESHOLDS), None);
    }

    #[test]
    fn classification_is_exclusive_for_arbitrary_offsets() {
        let offsets = [
            (0.0, 0.0),
            (500.0, 1.0),
            (-500.0, 499.0),
            (3.0, 1000.0),
            (-1e6, -1e6),
            (f32::MIN_POSITIVE, 0.0),
        ];
        for (dx, dy) in offsets {
            // classify returns Option, so "exactly one of the five outcomes"
            // holds by construction; just make sure nothing panics and the
            // result is stable.
            assert_eq!(
                classify(dx, dy, THRESHOLDS),
                classify(dx, dy, THRESHOLDS)
            );
        }
    }
}
