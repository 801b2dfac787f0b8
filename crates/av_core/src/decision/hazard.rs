//! Hazard score and time-to-collision.

use serde::{Deserialize, Serialize};

use crate::config::DrivingProfile;
use crate::sensors::SensorReading;

/// Below this speed TTC is undefined (infinite).
pub const TTC_MIN_SPEED: f32 = 0.01;

/// Per-tick decision metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardMetrics {
    /// Worst-case sensor danger in `[0, 1]`
    pub hazard_score: f32,
    /// Seconds until contact; `f32::INFINITY` when not closing
    #[serde(with = "crate::sim::telemetry::ttc_serde")]
    pub ttc: f32,
}

impl Default for HazardMetrics {
    fn default() -> Self {
        Self { hazard_score: 0.0, ttc: f32::INFINITY }
    }
}

/// Danger contributed by one sensor distance.
///
/// `1` inside the danger zone, a linear ramp through the warning zone, `0` beyond.
#[inline]
pub fn danger_value(distance: f32, profile: &DrivingProfile) -> f32 {
    let danger = profile.danger_threshold;
    let warning = profile.warning_threshold;
    if distance <= danger {
        1.0
    } else if distance <= warning {
        // distance lies in (danger, warning] so the span is positive
        ((warning - distance) / (warning - danger)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Maximum danger over all four sensors.
pub fn hazard_score(reading: &SensorReading, profile: &DrivingProfile) -> f32 {
    reading.iter().map(|(_, d)| danger_value(d, profile)).fold(0.0, f32::max)
}

/// `front_distance / speed`, or infinity when the vehicle is not moving forward.
#[inline]
pub fn time_to_collision(front_distance: f32, speed: f32) -> f32 {
    if speed < TTC_MIN_SPEED || speed.is_nan() {
        f32::INFINITY
    } else {
        front_distance / speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NORMAL: DrivingProfile = DrivingProfile::NORMAL;

    fn reading(d: [f32; 4]) -> SensorReading {
        SensorReading::from_distances(10.0, d)
    }

    #[test]
    fn test_danger_ramp() {
        assert_eq!(danger_value(1.0, &NORMAL), 1.0);
        assert_eq!(danger_value(2.0, &NORMAL), 1.0);
        assert!((danger_value(2.75, &NORMAL) - 0.5).abs() < 1e-6);
        assert_eq!(danger_value(3.5, &NORMAL), 0.0);
        assert_eq!(danger_value(9.0, &NORMAL), 0.0);
    }

    #[test]
    fn test_worst_sensor_dominates() {
        assert_eq!(hazard_score(&reading([10.0, 10.0, 10.0, 10.0]), &NORMAL), 0.0);
        assert_eq!(hazard_score(&reading([10.0, 10.0, 10.0, 0.5]), &NORMAL), 1.0);
        let mixed = hazard_score(&reading([3.0, 2.75, 10.0, 10.0]), &NORMAL);
        assert!((mixed - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_equal_thresholds_do_not_divide_by_zero() {
        let flat = DrivingProfile { danger_threshold: 2.0, warning_threshold: 2.0, ..NORMAL };
        assert_eq!(danger_value(2.0, &flat), 1.0);
        assert_eq!(danger_value(2.0001, &flat), 0.0);
    }

    #[test]
    fn test_ttc() {
        assert_eq!(time_to_collision(3.0, 0.0), f32::INFINITY);
        assert_eq!(time_to_collision(3.0, 0.009), f32::INFINITY);
        assert_eq!(time_to_collision(3.0, -2.0), f32::INFINITY);
        assert_eq!(time_to_collision(3.0, 5.0), 3.0 / 5.0);
        assert!((time_to_collision(3.0, 5.0) - 0.6).abs() < 1e-6);
        assert_eq!(time_to_collision(4.0, 0.01), 400.0);
    }

    #[test]
    fn test_cautious_scores_at_least_aggressive() {
        let r = reading([2.5, 4.0, 6.0, 1.8]);
        assert!(
            hazard_score(&r, &DrivingProfile::CAUTIOUS) >= hazard_score(&r, &DrivingProfile::AGGRESSIVE)
        );
    }

    proptest! {
        #[test]
        fn prop_hazard_in_unit_range(d in prop::array::uniform4(0.0f32..10.0f32)) {
            let h = hazard_score(&reading(d), &NORMAL);
            prop_assert!((0.0..=1.0).contains(&h));
        }

        #[test]
        fn prop_beyond_warning_is_zero(d in prop::array::uniform4(3.51f32..10.0f32)) {
            prop_assert_eq!(hazard_score(&reading(d), &NORMAL), 0.0);
        }

        #[test]
        fn prop_within_danger_is_one(
            d in prop::array::uniform4(0.0f32..10.0f32),
            idx in 0usize..4,
            close in 0.0f32..=2.0f32,
        ) {
            let mut d = d;
            d[idx] = close;
            prop_assert_eq!(hazard_score(&reading(d), &NORMAL), 1.0);
        }

        #[test]
        fn prop_monotone_in_each_sensor(
            d in prop::array::uniform4(0.0f32..10.0f32),
            idx in 0usize..4,
            bump in 0.0f32..5.0f32,
        ) {
            let before = hazard_score(&reading(d), &NORMAL);
            let mut farther = d;
            farther[idx] += bump;
            let after = hazard_score(&reading(farther), &NORMAL);
            prop_assert!(after <= before);
        }

        #[test]
        fn prop_cautious_dominates_aggressive(d in prop::array::uniform4(0.0f32..10.0f32)) {
            let r = reading(d);
            prop_assert!(
                hazard_score(&r, &DrivingProfile::CAUTIOUS)
                    >= hazard_score(&r, &DrivingProfile::AGGRESSIVE)
            );
        }

        #[test]
        fn prop_ttc_exact_quotient(front in 0.0f32..10.0f32, speed in 0.01f32..10.0f32) {
            prop_assert_eq!(time_to_collision(front, speed), front / speed);
        }
    }
}
