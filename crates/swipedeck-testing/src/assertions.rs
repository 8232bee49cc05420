//! Assertion helpers for widget tests.

use swipedeck_foundation::geometry::Offset;

/// Assert that a value is within an expected range.
///
/// Useful for fuzzy matching of animated positions that vary slightly with
/// frame timing.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that an offset is approximately equal to another.
pub fn assert_offset_approx_eq(actual: Offset, expected: Offset, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}
