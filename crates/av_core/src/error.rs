use thiserror::Error;

/// Configuration problems. All of these are rejected before the first tick runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown driving mode: {0}")]
    UnknownMode(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("Negative value for {field}: {value}")]
    NegativeValue { field: &'static str, value: f32 },

    #[error("Value for {field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("Warning threshold {warning} is below danger threshold {danger}")]
    InvertedThresholds { danger: f32, warning: f32 },

    #[error("Hysteresis cycle count must be positive, got {0}")]
    InvalidHysteresis(u32),

    #[error("Obstacle {index} has negative radius {radius}")]
    NegativeRadius { index: usize, radius: f32 },

    #[error("Invalid sensor configuration: {0}")]
    InvalidSensorConfig(String),

    #[error("Invalid physics parameter {field}: {value}")]
    InvalidPhysics { field: &'static str, value: f32 },

    #[error("World of {width}x{height} cannot hold a vehicle of radius {radius}")]
    WorldTooSmall { width: f32, height: f32, radius: f32 },

    #[error("Invalid control timing {field}: {value}")]
    InvalidControl { field: &'static str, value: f32 },

    #[error("Start pose ({x}, {y}, heading {heading}) is outside the world")]
    StartOutsideWorld { x: f32, y: f32, heading: f32 },

    #[error("Configuration parse error: {0}")]
    Parse(String),
}

impl ConfigError {
    /// Stable machine-readable code, used as the prefix of JSON API error strings.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::UnknownMode(_) => "E_UNKNOWN_MODE",
            ConfigError::UnknownScenario(_) => "E_UNKNOWN_SCENARIO",
            ConfigError::NegativeValue { .. }
            | ConfigError::NonPositive { .. }
            | ConfigError::InvertedThresholds { .. }
            | ConfigError::InvalidHysteresis(_) => "E_INVALID_PROFILE",
            ConfigError::NegativeRadius { .. } => "E_INVALID_OBSTACLE",
            ConfigError::InvalidSensorConfig(_) => "E_INVALID_SENSOR",
            ConfigError::InvalidPhysics { .. } | ConfigError::WorldTooSmall { .. } => "E_INVALID_PHYSICS",
            ConfigError::InvalidControl { .. } => "E_INVALID_CONTROL",
            ConfigError::StartOutsideWorld { .. } => "E_INVALID_START",
            ConfigError::Parse(_) => "E_PARSE",
        }
    }

    /// Re-tag a field range error raised while validating physics.
    pub(crate) fn into_physics(self) -> Self {
        match self {
            ConfigError::NegativeValue { field, value } | ConfigError::NonPositive { field, value } => {
                ConfigError::InvalidPhysics { field, value }
            }
            other => other,
        }
    }

    /// Re-tag a field range error raised while validating the sensor array.
    pub(crate) fn into_sensor(self) -> Self {
        match self {
            err @ (ConfigError::NegativeValue { .. } | ConfigError::NonPositive { .. }) => {
                ConfigError::InvalidSensorConfig(err.to_string())
            }
            other => other,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Requested {requested} ticks, limit is {max}")]
    TickLimit { requested: u64, max: u64 },
}

impl SimError {
    pub fn code(&self) -> &'static str {
        match self {
            SimError::Config(err) => err.code(),
            SimError::Serialization(_) => "E_PARSE",
            SimError::SchemaVersion { .. } => "E_SCHEMA_VERSION",
            SimError::TickLimit { .. } => "E_INVALID_TICKS",
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Require `value >= 0` (NaN fails).
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> std::result::Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NegativeValue { field, value })
    }
}

/// Require `value > 0` (NaN fails).
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> std::result::Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ConfigError::UnknownMode("turbo".into()).code(), "E_UNKNOWN_MODE");
        assert_eq!(ConfigError::InvalidHysteresis(0).code(), "E_INVALID_PROFILE");
        let sim: SimError = ConfigError::NegativeRadius { index: 2, radius: -1.0 }.into();
        assert_eq!(sim.code(), "E_INVALID_OBSTACLE");
        assert_eq!(ConfigError::StartOutsideWorld { x: 0.0, y: 0.0, heading: 0.0 }.code(), "E_INVALID_START");
        assert_eq!(ConfigError::InvalidControl { field: "cycle_time_ms", value: 0.0 }.code(), "E_INVALID_CONTROL");
        assert_eq!(SimError::TickLimit { requested: 5, max: 1 }.code(), "E_INVALID_TICKS");
    }

    #[test]
    fn test_section_retagging() {
        let err = ConfigError::NegativeValue { field: "friction", value: -1.0 };
        assert_eq!(err.clone().into_physics(), ConfigError::InvalidPhysics { field: "friction", value: -1.0 });
        assert_eq!(err.into_sensor().code(), "E_INVALID_SENSOR");
        let other = ConfigError::InvalidHysteresis(0);
        assert_eq!(other.clone().into_physics(), other);
    }

    #[test]
    fn test_display_messages() {
        let err = ConfigError::UnknownMode("turbo".into());
        assert_eq!(err.to_string(), "Unknown driving mode: turbo");

        let err = ConfigError::InvertedThresholds { danger: 3.0, warning: 2.0 };
        assert!(err.to_string().contains("below danger threshold"));
    }

    #[test]
    fn test_ensure_helpers_reject_nan() {
        assert!(ensure_non_negative("x", 0.0).is_ok());
        assert!(ensure_non_negative("x", -0.1).is_err());
        assert!(ensure_non_negative("x", f32::NAN).is_err());
        assert!(ensure_positive("x", 0.0).is_err());
        assert!(ensure_positive("x", f32::INFINITY).is_err());
    }
}
