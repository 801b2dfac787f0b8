use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DrivingMode, SimConfig};
use crate::error::ConfigError;
use crate::sim::{NullSink, SessionMetrics, SimulationSession};
use crate::vehicle::VehicleKinematicState;
use crate::world::Scenario;

/// Outcome of one mode in a side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeComparison {
    pub mode: DrivingMode,
    pub metrics: SessionMetrics,
    pub final_state: VehicleKinematicState,
}

/// Run the same world once per driving mode, in parallel.
///
/// Each mode gets its own session; results come back in
/// [`DrivingMode::ALL`] order regardless of scheduling.
pub fn compare_modes(seed: u64, scenario: Scenario, ticks: u64) -> Result<Vec<ModeComparison>, ConfigError> {
    DrivingMode::ALL
        .par_iter()
        .map(|&mode| {
            let config = SimConfig { mode, scenario, seed, ..SimConfig::default() };
            let mut session = SimulationSession::from_config(config)?;
            let metrics = session.run(ticks, &mut NullSink)?;
            Ok(ModeComparison { mode, metrics, final_state: *session.vehicle().state() })
        })
        .collect()
}
