//! Ray–circle intersection.
//!
//! A ray `p(t) = o + t·d` meets a circle `|p − c|² = r²` where
//! `a·t² + b·t + c = 0` with
//! `a = d·d`, `b = 2·(o − c)·d`, `c = |o − c|² − r²`.

use crate::world::ObstacleView;

/// Directions shorter than this are treated as degenerate.
const MIN_DIRECTION_SQ: f32 = 1e-12;

/// Distance along the ray to the first crossing of `obstacle`'s boundary.
///
/// Returns `None` when the ray misses, when the direction is degenerate, or
/// when every root lies at or behind `epsilon`.
pub fn ray_circle_distance(
    origin: (f32, f32),
    dir: (f32, f32),
    obstacle: &ObstacleView,
    epsilon: f32,
) -> Option<f32> {
    let a = dir.0 * dir.0 + dir.1 * dir.1;
    if !a.is_finite() || a < MIN_DIRECTION_SQ {
        return None;
    }

    let fx = origin.0 - obstacle.x;
    let fy = origin.1 - obstacle.y;
    let b = 2.0 * (fx * dir.0 + fy * dir.1);
    let c = fx * fx + fy * fy - obstacle.radius * obstacle.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t_near = (-b - sqrt_disc) / (2.0 * a);
    let t_far = (-b + sqrt_disc) / (2.0 * a);

    // t is in units of |dir|; convert to meters
    let scale = a.sqrt();
    [t_near, t_far]
        .into_iter()
        .map(|t| t * scale)
        .find(|&distance| distance > epsilon)
}

/// Nearest hit along `dir` across all obstacles, clamped to `[0, max_range]`.
pub fn cast_ray_dir(
    origin: (f32, f32),
    dir: (f32, f32),
    obstacles: &[ObstacleView],
    max_range: f32,
    epsilon: f32,
) -> f32 {
    let a = dir.0 * dir.0 + dir.1 * dir.1;
    if !a.is_finite() || a < MIN_DIRECTION_SQ {
        return max_range;
    }

    obstacles
        .iter()
        .filter_map(|obstacle| ray_circle_distance(origin, dir, obstacle, epsilon))
        .fold(max_range, f32::min)
        .clamp(0.0, max_range)
}

/// Nearest hit along absolute angle `angle` (rad).
pub fn cast_ray(
    origin: (f32, f32),
    angle: f32,
    obstacles: &[ObstacleView],
    max_range: f32,
    epsilon: f32,
) -> f32 {
    cast_ray_dir(origin, (angle.cos(), angle.sin()), obstacles, max_range, epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_head_on_hit() {
        let obs = ObstacleView::new(5.0, 0.0, 1.0);
        let d = ray_circle_distance((0.0, 0.0), (1.0, 0.0), &obs, EPS).unwrap();
        assert!((d - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_miss_and_behind() {
        let obs = ObstacleView::new(5.0, 3.0, 1.0);
        assert!(ray_circle_distance((0.0, 0.0), (1.0, 0.0), &obs, EPS).is_none());

        let behind = ObstacleView::new(-5.0, 0.0, 1.0);
        assert!(ray_circle_distance((0.0, 0.0), (1.0, 0.0), &behind, EPS).is_none());
    }

    #[test]
    fn test_origin_inside_circle_uses_exit_root() {
        let obs = ObstacleView::new(0.5, 0.0, 1.0);
        let d = ray_circle_distance((0.0, 0.0), (1.0, 0.0), &obs, EPS).unwrap();
        assert!((d - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_unnormalized_direction_reports_meters() {
        let obs = ObstacleView::new(0.0, 6.0, 1.0);
        let d = ray_circle_distance((0.0, 0.0), (0.0, 3.0), &obs, EPS).unwrap();
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_tangent_touch() {
        let obs = ObstacleView::new(4.0, 1.0, 1.0);
        let d = ray_circle_distance((0.0, 0.0), (1.0, 0.0), &obs, EPS).unwrap();
        assert!((d - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_direction_is_max_range() {
        let obs = [ObstacleView::new(1.0, 0.0, 0.5)];
        assert_eq!(cast_ray_dir((0.0, 0.0), (0.0, 0.0), &obs, 10.0, EPS), 10.0);
        assert_eq!(cast_ray_dir((0.0, 0.0), (f32::NAN, 0.0), &obs, 10.0, EPS), 10.0);
    }

    #[test]
    fn test_nearest_of_many_and_clamp() {
        let obstacles = [
            ObstacleView::new(0.0, 8.0, 1.0),
            ObstacleView::new(0.0, 4.0, 1.0),
            ObstacleView::new(0.0, 30.0, 1.0),
        ];
        let d = cast_ray((0.0, 0.0), FRAC_PI_2, &obstacles, 10.0, EPS);
        assert!((d - 3.0).abs() < 1e-4);

        let far = [ObstacleView::new(0.0, 30.0, 1.0)];
        assert_eq!(cast_ray((0.0, 0.0), FRAC_PI_2, &far, 10.0, EPS), 10.0);
        assert_eq!(cast_ray((0.0, 0.0), FRAC_PI_2, &[], 10.0, EPS), 10.0);
    }
}
