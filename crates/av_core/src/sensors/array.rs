use serde::{Deserialize, Serialize};

use super::filter::MovingAverage;
use super::noise::GaussianNoise;
use super::raycast::cast_ray;
use super::{SensorId, SensorReading};
use crate::config::SensorConfig;
use crate::error::ConfigError;
use crate::world::ObstacleView;

/// Endpoint of one sensor ray, for dashboards and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorRay {
    pub id: SensorId,
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub distance: f32,
    /// Absolute ray angle (rad)
    pub angle: f32,
}

/// The four-ray proximity sensor.
///
/// Without noise or filtering the array is a pure function of pose and
/// obstacles. With either enabled it carries per-channel history.
#[derive(Debug, Clone)]
pub struct SensorArray {
    config: SensorConfig,
    offsets_rad: [f32; 4],
    seed: u64,
    noise: Option<GaussianNoise>,
    filters: [MovingAverage; 4],
    last: SensorReading,
}

impl SensorArray {
    pub fn new(config: SensorConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let offsets_rad = config.offsets_deg.map(f32::to_radians);
        let noise = config.noise_enabled.then(|| GaussianNoise::new(seed, config.noise_factor));
        let filters = std::array::from_fn(|_| MovingAverage::new(config.filter_window));
        let last = SensorReading::clear(config.max_range);
        Ok(Self { config, offsets_rad, seed, noise, filters, last })
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn max_range(&self) -> f32 {
        self.config.max_range
    }

    /// Offset of `id` relative to heading (rad).
    pub fn offset(&self, id: SensorId) -> f32 {
        self.offsets_rad[id.index()]
    }

    /// Noise-free, filter-free raycast of all four sensors.
    pub fn raycast(&self, position: (f32, f32), heading: f32, obstacles: &[ObstacleView]) -> SensorReading {
        let distances = SensorId::ALL.map(|id| {
            cast_ray(
                position,
                heading + self.offset(id),
                obstacles,
                self.config.max_range,
                self.config.ray_epsilon,
            )
        });
        SensorReading::from_distances(self.config.max_range, distances)
    }

    /// Full sensing pipeline: raycast, then noise, then smoothing.
    pub fn scan(&mut self, position: (f32, f32), heading: f32, obstacles: &[ObstacleView]) -> SensorReading {
        let max_range = self.config.max_range;
        let mut distances = self.raycast(position, heading, obstacles).as_array();

        if let Some(noise) = self.noise.as_mut() {
            for d in &mut distances {
                *d = noise.apply(*d, max_range);
            }
        }

        if self.config.filter_enabled {
            for (d, filter) in distances.iter_mut().zip(self.filters.iter_mut()) {
                *d = filter.push(*d).clamp(0.0, max_range);
            }
        }

        self.last = SensorReading::from_distances(max_range, distances);
        self.last.clone()
    }

    pub fn last_reading(&self) -> &SensorReading {
        &self.last
    }

    pub fn set_noise_enabled(&mut self, enabled: bool) {
        self.config.noise_enabled = enabled;
        self.noise = match (enabled, self.noise.take()) {
            (true, Some(existing)) => Some(existing),
            (true, None) => Some(GaussianNoise::new(self.seed, self.config.noise_factor)),
            (false, _) => None,
        };
    }

    /// Toggling the filter discards any smoothing history.
    pub fn set_filter_enabled(&mut self, enabled: bool) {
        if self.config.filter_enabled != enabled {
            self.filters.iter_mut().for_each(MovingAverage::reset);
        }
        self.config.filter_enabled = enabled;
    }

    pub fn noise_enabled(&self) -> bool {
        self.noise.is_some()
    }

    pub fn filter_enabled(&self) -> bool {
        self.config.filter_enabled
    }

    /// Ray endpoints based on the most recent `scan`.
    pub fn rays(&self, position: (f32, f32), heading: f32) -> Vec<SensorRay> {
        SensorId::ALL
            .into_iter()
            .map(|id| {
                let angle = heading + self.offset(id);
                let distance = self.last.distance(id);
                SensorRay {
                    id,
                    start: position,
                    end: (position.0 + distance * angle.cos(), position.1 + distance * angle.sin()),
                    distance,
                    angle,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;
    use strum::IntoEnumIterator;

    fn array() -> SensorArray {
        SensorArray::new(SensorConfig::default(), 0).unwrap()
    }

    #[test]
    fn test_empty_scene_reads_max_range() {
        let mut sensors = array();
        let reading = sensors.scan((10.0, 10.0), 0.0, &[]);
        for id in SensorId::iter() {
            assert_eq!(reading.distance(id), 10.0, "{id} should read max range");
        }
    }

    #[test]
    fn test_single_obstacle_on_each_ray() {
        let sensors = array();
        let d = 5.0;
        let r = 0.5;
        for id in SensorId::iter() {
            let angle = sensors.offset(id);
            let obstacle = ObstacleView::new(10.0 + d * angle.cos(), 10.0 + d * angle.sin(), r);
            let reading = sensors.raycast((10.0, 10.0), 0.0, &[obstacle]);
            for other in SensorId::iter() {
                if other == id {
                    assert!((reading.distance(other) - (d - r)).abs() < 1e-3);
                } else {
                    assert_eq!(reading.distance(other), 10.0);
                }
            }
        }
    }

    #[test]
    fn test_heading_rotates_rays() {
        let sensors = array();
        // Obstacle due north; with heading π/4 the FL ray points north
        let obstacle = ObstacleView::new(10.0, 14.0, 1.0);
        let reading = sensors.raycast((10.0, 10.0), PI / 4.0, &[obstacle]);
        assert!((reading.distance(SensorId::FrontLeft) - 3.0).abs() < 1e-3);
        assert_eq!(reading.distance(SensorId::FrontRight), 10.0);
    }

    #[test]
    fn test_noise_toggle_is_reproducible() {
        let obstacle = [ObstacleView::new(13.0, 13.0, 0.5)];
        let mut clean = array();
        let first = clean.scan((10.0, 10.0), 0.0, &obstacle);
        let second = clean.scan((10.0, 10.0), 0.0, &obstacle);
        assert_eq!(first, second);

        let mut noisy = array();
        noisy.set_noise_enabled(true);
        assert!(noisy.noise_enabled());
        let readings: Vec<f32> = (0..10)
            .map(|_| noisy.scan((10.0, 10.0), 0.0, &obstacle).distance(SensorId::FrontLeft))
            .collect();
        assert!(readings.iter().any(|&v| (v - readings[0]).abs() > 1e-6));
        assert!(readings.iter().all(|&v| (0.0..=10.0).contains(&v)));
    }

    #[test]
    fn test_filter_converges_on_steady_input() {
        let mut sensors = array();
        sensors.set_filter_enabled(true);
        let obstacle = [ObstacleView::new(13.0, 13.0, 0.5)];
        let truth = sensors.raycast((10.0, 10.0), 0.0, &obstacle).distance(SensorId::FrontLeft);

        // First scan sees the obstacle, later scans see an empty scene
        let first = sensors.scan((10.0, 10.0), 0.0, &obstacle).distance(SensorId::FrontLeft);
        assert!((first - truth).abs() < 1e-5);
        let smoothed = sensors.scan((10.0, 10.0), 0.0, &[]).distance(SensorId::FrontLeft);
        assert!((smoothed - (truth + 10.0) / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_rays_follow_last_reading() {
        let mut sensors = array();
        let obstacle = [ObstacleView::new(10.0 + 4.0 * (PI / 4.0).cos(), 10.0 + 4.0 * (PI / 4.0).sin(), 1.0)];
        sensors.scan((10.0, 10.0), 0.0, &obstacle);
        let rays = sensors.rays((10.0, 10.0), 0.0);
        assert_eq!(rays.len(), 4);
        let fl = rays.iter().find(|r| r.id == SensorId::FrontLeft).unwrap();
        assert!((fl.distance - 3.0).abs() < 1e-3);
        let reach = crate::geometry::distance(fl.start, fl.end);
        assert!((reach - fl.distance).abs() < 1e-3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = SensorConfig { max_range: -1.0, ..SensorConfig::default() };
        assert!(SensorArray::new(cfg, 0).is_err());
    }
}
