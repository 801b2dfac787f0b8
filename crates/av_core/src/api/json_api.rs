use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::{SimConfig, StartPose};
use crate::error::SimError;
use crate::sim::{SessionMetrics, SessionSnapshot, SimulationSession, TelemetryRecord};
use crate::world::{CircleObstacle, Environment, ObstacleView};

pub const SCHEMA_VERSION: u8 = 1;

/// Upper bound on `ticks` per request (a bit over 27 simulated hours).
pub const MAX_REQUEST_TICKS: u64 = 1_000_000;

/// Label reported when the request supplies its own obstacles.
pub const CUSTOM_SCENARIO: &str = "custom";

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

#[derive(Debug, Deserialize)]
pub struct SimRequest {
    pub schema_version: u8,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// "cautious" | "normal" | "aggressive"
    #[serde(default)]
    pub mode: Option<String>,
    /// Preset layout name; ignored when `obstacles` is given
    #[serde(default)]
    pub scenario: Option<String>,
    /// Static scene replacing the preset layout
    #[serde(default)]
    pub obstacles: Option<Vec<ObstacleView>>,
    #[serde(default)]
    pub start: Option<StartPose>,
    /// Defaults to the configured run length
    #[serde(default)]
    pub ticks: Option<u64>,
    #[serde(default)]
    pub include_telemetry: bool,
    #[serde(default)]
    pub sensor_noise: bool,
    #[serde(default)]
    pub sensor_filter: bool,
}

fn default_seed() -> u64 {
    SimConfig::default().seed
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimResponse {
    pub schema_version: u8,
    pub mode: String,
    pub scenario: String,
    pub seed: u64,
    pub ticks: u64,
    pub metrics: SessionMetrics,
    pub final_state: SessionSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<Vec<TelemetryRecord>>,
}

/// Run one complete session described by a JSON request.
///
/// Errors are `"<CODE>: <message>"` strings, e.g. `E_UNKNOWN_MODE: Unknown driving mode: turbo`.
pub fn simulate_json(request_json: &str) -> Result<String, String> {
    let request: SimRequest = serde_json::from_str(request_json).map_err(|e| {
        error!("Failed to parse SimRequest: {}", e);
        err_code("E_PARSE", format!("Invalid JSON request: {e}"))
    })?;

    let response = simulate(request).map_err(|e| {
        error!("Simulation request rejected: {}", e);
        err_code(e.code(), e)
    })?;

    serde_json::to_string(&response).map_err(|e| err_code("E_PARSE", e))
}

/// Typed entry point behind [`simulate_json`].
pub fn simulate(request: SimRequest) -> Result<SimResponse, SimError> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::SchemaVersion { found: request.schema_version, expected: SCHEMA_VERSION });
    }

    let mut config = SimConfig { seed: request.seed, ..SimConfig::default() };
    if let Some(mode) = request.mode.as_deref() {
        config.mode = mode.parse()?;
    }
    if let Some(scenario) = request.scenario.as_deref() {
        config.scenario = scenario.parse()?;
    }
    if let Some(start) = request.start {
        config.start = start;
    }
    config.sensors.noise_enabled = request.sensor_noise;
    config.sensors.filter_enabled = request.sensor_filter;
    config.validate()?;

    let (env, scenario_label) = match request.obstacles {
        Some(obstacles) => {
            let mut env = Environment::new(config.physics.world_width, config.physics.world_height);
            env.add_obstacles(obstacles.into_iter().map(|o| CircleObstacle::fixed(o.x, o.y, o.radius)))?;
            (env, CUSTOM_SCENARIO.to_string())
        }
        None => (
            Environment::from_scenario(
                config.scenario,
                config.seed,
                config.physics.world_width,
                config.physics.world_height,
                (config.start.x, config.start.y),
            ),
            config.scenario.to_string(),
        ),
    };

    let ticks = request.ticks.unwrap_or_else(|| config.control.total_ticks());
    if ticks > MAX_REQUEST_TICKS {
        return Err(SimError::TickLimit { requested: ticks, max: MAX_REQUEST_TICKS });
    }
    info!("Simulating {} ticks: mode={} scenario={} seed={}", ticks, config.mode, scenario_label, config.seed);

    let mode = config.mode;
    let seed = config.seed;
    let mut session = SimulationSession::new(config, env)?;
    let mut telemetry: Vec<TelemetryRecord> = Vec::new();
    let metrics = if request.include_telemetry {
        session.run(ticks, &mut telemetry)?
    } else {
        session.run(ticks, &mut crate::sim::NullSink)?
    };
    debug!("Simulation finished: {:?}", metrics);

    Ok(SimResponse {
        schema_version: SCHEMA_VERSION,
        mode: mode.to_string(),
        scenario: scenario_label,
        seed,
        ticks,
        metrics,
        final_state: session.snapshot(),
        telemetry: request.include_telemetry.then_some(telemetry),
    })
}
