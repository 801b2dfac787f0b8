use serde::{Deserialize, Serialize};

use crate::decision::FsmState;

/// Whole-session counters, updated once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub ticks: u64,
    pub total_collisions: u32,
    /// Mean hazard score over all ticks so far
    pub avg_hazard_score: f32,
    /// Committed FSM state changes
    pub state_transitions: u32,
    /// Ticks spent in EmergencyBrake
    pub emergency_brakes: u32,
    /// Ticks whose TTC was below the profile's threshold
    pub ttc_interventions: u32,
    /// Ticks that ended with a wall bounce
    pub boundary_bounces: u32,
}

impl SessionMetrics {
    pub(crate) fn record_tick(
        &mut self,
        previous: FsmState,
        current: FsmState,
        hazard_score: f32,
        ttc_below_threshold: bool,
        bounced: bool,
        total_collisions: u32,
    ) {
        self.ticks += 1;
        // Incremental mean, f64 to keep long runs stable
        let n = self.ticks as f64;
        let mean = self.avg_hazard_score as f64;
        self.avg_hazard_score = (mean + (hazard_score as f64 - mean) / n) as f32;

        if current != previous {
            self.state_transitions += 1;
        }
        if current == FsmState::EmergencyBrake {
            self.emergency_brakes += 1;
        }
        if ttc_below_threshold {
            self.ttc_interventions += 1;
        }
        if bounced {
            self.boundary_bounces += 1;
        }
        self.total_collisions = total_collisions;
    }
}
