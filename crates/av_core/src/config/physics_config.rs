use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ConfigError};

/// Vehicle dynamics and world bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Full-throttle acceleration (m/s²)
    pub max_accel: f32,
    /// Full-brake deceleration (m/s²)
    pub max_brake: f32,
    /// Coulomb friction deceleration opposing motion (m/s²)
    pub friction: f32,
    /// Yaw rate at full steering (rad/s)
    pub turn_rate: f32,
    /// Steering has no effect below this speed (m/s)
    pub steering_min_speed: f32,
    /// Speeds below this count as stopped for friction purposes (m/s)
    pub rest_speed: f32,
    /// Collision radius of the vehicle (m)
    pub vehicle_radius: f32,
    pub world_width: f32,
    pub world_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_accel: 1.0,
            max_brake: 2.0,
            friction: 0.1,
            turn_rate: 2.0,
            steering_min_speed: 0.1,
            rest_speed: 0.01,
            vehicle_radius: 0.5,
            world_width: 20.0,
            world_height: 20.0,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_ranges().map_err(ConfigError::into_physics)?;

        let footprint = 2.0 * self.vehicle_radius;
        if self.world_width <= footprint || self.world_height <= footprint {
            return Err(ConfigError::WorldTooSmall {
                width: self.world_width,
                height: self.world_height,
                radius: self.vehicle_radius,
            });
        }
        Ok(())
    }

    fn check_ranges(&self) -> Result<(), ConfigError> {
        ensure_non_negative("max_accel", self.max_accel)?;
        ensure_non_negative("max_brake", self.max_brake)?;
        ensure_non_negative("friction", self.friction)?;
        ensure_non_negative("turn_rate", self.turn_rate)?;
        ensure_non_negative("steering_min_speed", self.steering_min_speed)?;
        ensure_non_negative("rest_speed", self.rest_speed)?;
        ensure_non_negative("vehicle_radius", self.vehicle_radius)?;
        ensure_positive("world_width", self.world_width)?;
        ensure_positive("world_height", self.world_height)
    }
}
