//! Planar angle and distance helpers shared by sensors, kinematics and obstacles.
//!
//! Coordinate system: origin at the bottom-left corner of the world, X grows
//! rightward, Y grows upward. Heading 0 points along +X, π/2 along +Y.

use std::f32::consts::{PI, TAU};

/// Wrap an angle into `[0, 2π)`.
///
/// Non-finite input collapses to 0 so a corrupted heading can never leak into
/// trigonometry downstream.
#[inline]
pub fn normalize_heading(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid of a tiny negative value rounds up to exactly TAU in f32
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle into `(-π, π]`.
#[inline]
pub fn normalize_signed(angle: f32) -> f32 {
    let wrapped = normalize_heading(angle);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Mirror a heading across the vertical axis (bounce off a left/right edge).
#[inline]
pub fn reflect_vertical(heading: f32) -> f32 {
    normalize_heading(PI - heading)
}

/// Mirror a heading across the horizontal axis (bounce off a bottom/top edge).
#[inline]
pub fn reflect_horizontal(heading: f32) -> f32 {
    normalize_heading(TAU - heading)
}

#[inline]
pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Unit direction vector for an angle in radians.
#[inline]
pub fn direction(angle: f32) -> (f32, f32) {
    (angle.cos(), angle.sin())
}

/// Smallest absolute difference between two angles.
#[inline]
pub fn angle_diff(a: f32, b: f32) -> f32 {
    normalize_signed(a - b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_heading_basic() {
        assert_eq!(normalize_heading(0.0), 0.0);
        assert!((normalize_heading(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-5);
        assert!((normalize_heading(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert_eq!(normalize_heading(f32::NAN), 0.0);
        assert_eq!(normalize_heading(-1e-9), 0.0);
    }

    #[test]
    fn test_reflections() {
        // Heading east bounces to west off a vertical wall
        assert!((reflect_vertical(0.0) - PI).abs() < 1e-5);
        // Heading north-east bounces to north-west
        assert!((reflect_vertical(PI / 4.0) - 3.0 * PI / 4.0).abs() < 1e-5);
        // Heading north bounces to south off a horizontal wall
        assert!((reflect_horizontal(PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-5);
        assert_eq!(reflect_horizontal(0.0), 0.0);
    }

    #[test]
    fn test_distance_and_direction() {
        assert!((distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-6);
        let (dx, dy) = direction(PI / 2.0);
        assert!(dx.abs() < 1e-6);
        assert!((dy - 1.0).abs() < 1e-6);
        assert!(angle_diff(0.1, TAU - 0.1) < 0.2 + 1e-5);
    }

    proptest! {
        #[test]
        fn prop_normalized_heading_in_range(angle in -100.0f32..100.0f32) {
            let h = normalize_heading(angle);
            prop_assert!((0.0..TAU).contains(&h));
        }

        #[test]
        fn prop_double_reflection_is_identity(angle in 0.0f32..6.28f32) {
            let twice = reflect_vertical(reflect_vertical(angle));
            prop_assert!(angle_diff(twice, angle) < 1e-3);
            let twice = reflect_horizontal(reflect_horizontal(angle));
            prop_assert!(angle_diff(twice, angle) < 1e-3);
        }
    }
}
