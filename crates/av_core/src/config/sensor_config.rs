use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ConfigError};

/// Proximity sensor array settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Maximum detection range in meters
    pub max_range: f32,
    /// Ray offsets relative to heading in degrees, ordered FL, FR, BL, BR
    pub offsets_deg: [f32; 4],
    /// Roots closer than this are treated as self-intersection and ignored
    pub ray_epsilon: f32,
    /// Add zero-mean Gaussian noise after raycasting
    pub noise_enabled: bool,
    /// Noise standard deviation as a fraction of the true reading
    pub noise_factor: f32,
    /// Smooth each channel with a moving average
    pub filter_enabled: bool,
    /// Moving-average window length in ticks
    pub filter_window: usize,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_range: 10.0,
            offsets_deg: [45.0, -45.0, 135.0, -135.0],
            ray_epsilon: 1e-3,
            noise_enabled: false,
            noise_factor: 0.05,
            filter_enabled: false,
            filter_window: 5,
        }
    }
}

impl SensorConfig {
    /// Noise and smoothing both on, as used for robustness runs.
    pub fn noisy() -> Self {
        Self { noise_enabled: true, filter_enabled: true, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("max_range", self.max_range)
            .and_then(|_| ensure_non_negative("ray_epsilon", self.ray_epsilon))
            .and_then(|_| ensure_non_negative("noise_factor", self.noise_factor))
            .map_err(ConfigError::into_sensor)?;
        if self.filter_window == 0 {
            return Err(ConfigError::InvalidSensorConfig(
                "filter_window must be at least 1".to_string(),
            ));
        }
        if let Some(bad) = self.offsets_deg.iter().find(|o| !o.is_finite()) {
            return Err(ConfigError::InvalidSensorConfig(format!(
                "sensor offset must be finite, got {bad}"
            )));
        }
        Ok(())
    }
}
