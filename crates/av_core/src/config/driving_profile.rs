//! Driving modes and their threshold profiles.
//!
//! | Mode       | danger | warning | max speed | TTC  | hysteresis |
//! |------------|--------|---------|-----------|------|------------|
//! | cautious   | 3.0 m  | 5.0 m   | 2.0 m/s   | 3.0s | 5 cycles   |
//! | normal     | 2.0 m  | 3.5 m   | 3.5 m/s   | 2.0s | 3 cycles   |
//! | aggressive | 1.0 m  | 2.0 m   | 5.0 m/s   | 1.0s | 2 cycles   |
//!
//! Profiles are plain `Copy` values. A mode switch replaces the whole profile,
//! never individual fields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, ensure_positive, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum DrivingMode {
    Cautious,
    #[default]
    Normal,
    Aggressive,
}

impl DrivingMode {
    pub const ALL: [DrivingMode; 3] =
        [DrivingMode::Cautious, DrivingMode::Normal, DrivingMode::Aggressive];

    pub fn as_str(&self) -> &'static str {
        match self {
            DrivingMode::Cautious => "cautious",
            DrivingMode::Normal => "normal",
            DrivingMode::Aggressive => "aggressive",
        }
    }

    pub fn profile(&self) -> DrivingProfile {
        DrivingProfile::for_mode(*self)
    }
}

impl fmt::Display for DrivingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrivingMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cautious" => Ok(DrivingMode::Cautious),
            "normal" => Ok(DrivingMode::Normal),
            "aggressive" => Ok(DrivingMode::Aggressive),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

/// Decision thresholds for one driving mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrivingProfile {
    /// Distance at or below which a sensor is fully dangerous (m)
    pub danger_threshold: f32,
    /// Distance at which the hazard ramp starts (m)
    pub warning_threshold: f32,
    /// Forward speed cap (m/s); reverse is capped at half of this
    pub max_speed: f32,
    /// Predictive brake fires when TTC drops below this (s)
    pub ttc_threshold: f32,
    /// Ticks a candidate state must persist before it becomes active
    pub hysteresis_cycles: u32,
}

impl DrivingProfile {
    pub const CAUTIOUS: DrivingProfile = DrivingProfile {
        danger_threshold: 3.0,
        warning_threshold: 5.0,
        max_speed: 2.0,
        ttc_threshold: 3.0,
        hysteresis_cycles: 5,
    };

    pub const NORMAL: DrivingProfile = DrivingProfile {
        danger_threshold: 2.0,
        warning_threshold: 3.5,
        max_speed: 3.5,
        ttc_threshold: 2.0,
        hysteresis_cycles: 3,
    };

    pub const AGGRESSIVE: DrivingProfile = DrivingProfile {
        danger_threshold: 1.0,
        warning_threshold: 2.0,
        max_speed: 5.0,
        ttc_threshold: 1.0,
        hysteresis_cycles: 2,
    };

    pub fn for_mode(mode: DrivingMode) -> Self {
        match mode {
            DrivingMode::Cautious => Self::CAUTIOUS,
            DrivingMode::Normal => Self::NORMAL,
            DrivingMode::Aggressive => Self::AGGRESSIVE,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("danger_threshold", self.danger_threshold)?;
        ensure_non_negative("warning_threshold", self.warning_threshold)?;
        ensure_positive("max_speed", self.max_speed)?;
        ensure_non_negative("ttc_threshold", self.ttc_threshold)?;
        if self.warning_threshold < self.danger_threshold {
            return Err(ConfigError::InvertedThresholds {
                danger: self.danger_threshold,
                warning: self.warning_threshold,
            });
        }
        if self.hysteresis_cycles == 0 {
            return Err(ConfigError::InvalidHysteresis(self.hysteresis_cycles));
        }
        Ok(())
    }
}

impl Default for DrivingProfile {
    fn default() -> Self {
        Self::NORMAL
    }
}
