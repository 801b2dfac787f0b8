//! # Simulation Configuration
//!
//! All tunables live here, grouped by concern, with preset constructors and
//! serde support. Configuration is validated once, before a session starts;
//! nothing is re-checked per tick.
//!
//! ## Usage
//! ```rust
//! use av_core::config::{DrivingMode, SimConfig};
//!
//! let config = SimConfig::default();
//! let cautious = SimConfig::for_mode(DrivingMode::Cautious);
//! assert!(cautious.validate().is_ok());
//! ```
//!
//! ## Environment Variables
//!
//! - `AV_DRIVING_MODE`: `cautious` | `normal` | `aggressive`
//! - `AV_SCENARIO`: `empty` | `random` | `corridor` | `intersection` | `dense`
//! - `AV_SEED`: unsigned integer seed

mod driving_profile;
mod physics_config;
mod sensor_config;

pub use driving_profile::{DrivingMode, DrivingProfile};
pub use physics_config::PhysicsConfig;
pub use sensor_config::SensorConfig;

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::ConfigError;
use crate::world::Scenario;

pub const ENV_MODE: &str = "AV_DRIVING_MODE";
pub const ENV_SCENARIO: &str = "AV_SCENARIO";
pub const ENV_SEED: &str = "AV_SEED";

/// Control loop timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Nominal tick period in milliseconds
    pub cycle_time_ms: u32,
    /// Default run length in simulated seconds
    pub duration_s: f32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self { cycle_time_ms: crate::sim::timestep::CONTROL_DT_MS, duration_s: 60.0 }
    }
}

impl ControlConfig {
    /// Tick period in seconds.
    pub fn dt(&self) -> f32 {
        self.cycle_time_ms as f32 / 1000.0
    }

    /// Number of ticks covering `duration_s`.
    pub fn total_ticks(&self) -> u64 {
        (self.duration_s / self.dt()).round().max(0.0) as u64
    }
}

/// Initial vehicle pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartPose {
    pub x: f32,
    pub y: f32,
    pub heading: f32,
}

impl Default for StartPose {
    fn default() -> Self {
        Self { x: 10.0, y: 10.0, heading: 0.0 }
    }
}

/// Full session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub mode: DrivingMode,
    pub scenario: Scenario,
    /// Seeds obstacle generation and sensor noise
    pub seed: u64,
    pub start: StartPose,
    pub sensors: SensorConfig,
    pub physics: PhysicsConfig,
    pub control: ControlConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: DrivingMode::Normal,
            scenario: Scenario::Random,
            seed: 42,
            start: StartPose::default(),
            sensors: SensorConfig::default(),
            physics: PhysicsConfig::default(),
            control: ControlConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn for_mode(mode: DrivingMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Noise-free, filter-free, obstacle-free. Used by tests.
    pub fn deterministic() -> Self {
        Self {
            scenario: Scenario::Empty,
            sensors: SensorConfig { noise_enabled: false, filter_enabled: false, ..SensorConfig::default() },
            ..Self::default()
        }
    }

    pub fn profile(&self) -> DrivingProfile {
        self.mode.profile()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.profile().validate()?;
        self.sensors.validate()?;
        self.physics.validate()?;
        if self.control.cycle_time_ms == 0 {
            return Err(ConfigError::InvalidControl { field: "cycle_time_ms", value: 0.0 });
        }
        let duration = self.control.duration_s;
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(ConfigError::InvalidControl { field: "duration_s", value: duration });
        }

        let r = self.physics.vehicle_radius;
        let StartPose { x, y, heading } = self.start;
        let inside = x >= r && y >= r && x <= self.physics.world_width - r && y <= self.physics.world_height - r;
        // NaN coordinates fail every comparison above
        if !inside || !heading.is_finite() {
            return Err(ConfigError::StartOutsideWorld { x, y, heading });
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a YAML document. Missing fields take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults overridden by `AV_DRIVING_MODE`, `AV_SCENARIO` and `AV_SEED`.
    ///
    /// Unset variables keep the default; set-but-invalid variables are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Some(mode) = lookup(ENV_MODE) {
            cfg.mode = mode.parse()?;
        }
        if let Some(scenario) = lookup(ENV_SCENARIO) {
            cfg.scenario = scenario.parse()?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            cfg.seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("{ENV_SEED}={seed} is not a valid seed")))?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
