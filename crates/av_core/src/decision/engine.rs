//! # Decision Engine
//!
//! Turns a [`SensorReading`] and the current speed into an active
//! [`FsmState`]. Each `update`:
//!
//! 1. computes hazard score and TTC,
//! 2. proposes a next state (TTC override first, then the reactive table),
//! 3. debounces the proposal through the [`HysteresisTracker`].
//!
//! Only the debounced *active* state drives actuation.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::command::ControlCommand;
use super::hazard::{self, HazardMetrics};
use super::hysteresis::HysteresisTracker;
use super::state::FsmState;
use crate::config::{DrivingMode, DrivingProfile};
use crate::error::ConfigError;
use crate::sensors::SensorReading;

/// Predictive braking only fires above this speed (m/s).
pub const TTC_OVERRIDE_MIN_SPEED: f32 = 0.5;
/// Active states remembered by [`DecisionEngine::history`].
pub const HISTORY_LEN: usize = 100;

/// Observability snapshot of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionMetrics {
    pub state: FsmState,
    pub hazard_score: f32,
    #[serde(with = "crate::sim::telemetry::ttc_serde")]
    pub ttc: f32,
    pub mode: DrivingMode,
    /// Ticks the current candidate has been held
    pub state_stability: u32,
}

#[derive(Debug, Clone)]
pub struct DecisionEngine {
    mode: DrivingMode,
    profile: DrivingProfile,
    active: FsmState,
    tracker: HysteresisTracker,
    metrics: HazardMetrics,
    ttc_override: bool,
    history: VecDeque<FsmState>,
}

impl DecisionEngine {
    pub fn new(mode: DrivingMode) -> Self {
        Self {
            mode,
            profile: mode.profile(),
            active: FsmState::Cruise,
            tracker: HysteresisTracker::new(FsmState::Cruise),
            metrics: HazardMetrics::default(),
            ttc_override: false,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    /// Engine with a custom profile, labelled as `mode`.
    pub fn with_profile(mode: DrivingMode, profile: DrivingProfile) -> Result<Self, ConfigError> {
        profile.validate()?;
        Ok(Self { profile, ..Self::new(mode) })
    }

    pub fn mode(&self) -> DrivingMode {
        self.mode
    }

    pub fn profile(&self) -> &DrivingProfile {
        &self.profile
    }

    pub fn state(&self) -> FsmState {
        self.active
    }

    pub fn hold_count(&self) -> u32 {
        self.tracker.hold_count()
    }

    pub fn candidate(&self) -> FsmState {
        self.tracker.candidate()
    }

    /// Hazard score and TTC from the most recent `update`.
    pub fn last_metrics(&self) -> HazardMetrics {
        self.metrics
    }

    /// Whether the most recent `update` proposal came from the TTC override.
    pub fn ttc_override_fired(&self) -> bool {
        self.ttc_override
    }

    /// Swap in another mode's profile.
    ///
    /// The active state is kept. Any in-flight candidate is discarded so a
    /// proposal counted under the old threshold cannot commit under the new one.
    pub fn set_mode(&mut self, mode: DrivingMode) {
        if mode == self.mode {
            return;
        }
        log::debug!("decision mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.profile = mode.profile();
        self.tracker.reset(self.active);
    }

    pub fn set_mode_str(&mut self, mode: &str) -> Result<(), ConfigError> {
        self.set_mode(mode.parse()?);
        Ok(())
    }

    pub fn hazard_score(&self, reading: &SensorReading) -> f32 {
        hazard::hazard_score(reading, &self.profile)
    }

    pub fn time_to_collision(&self, front_distance: f32, speed: f32) -> f32 {
        hazard::time_to_collision(front_distance, speed)
    }

    /// Undebounced proposal for this tick.
    pub fn next_state(&self, reading: &SensorReading, speed: f32) -> FsmState {
        if self.predictive_brake(reading, speed) {
            FsmState::EmergencyBrake
        } else {
            self.reactive_state(reading, speed)
        }
    }

    /// The transition table alone, with the TTC override left out.
    pub fn reactive_state(&self, reading: &SensorReading, speed: f32) -> FsmState {
        self.active.transition(reading, speed, self.profile.danger_threshold)
    }

    fn predictive_brake(&self, reading: &SensorReading, speed: f32) -> bool {
        let ttc = self.time_to_collision(reading.front(), speed);
        ttc < self.profile.ttc_threshold && speed > TTC_OVERRIDE_MIN_SPEED
    }

    /// Run one decision cycle and return the active state.
    pub fn update(&mut self, reading: &SensorReading, speed: f32) -> FsmState {
        self.metrics = HazardMetrics {
            hazard_score: self.hazard_score(reading),
            ttc: self.time_to_collision(reading.front(), speed),
        };
        self.ttc_override = self.predictive_brake(reading, speed);

        let proposed = self.next_state(reading, speed);
        if self.tracker.observe(proposed, self.profile.hysteresis_cycles) && proposed != self.active {
            log::debug!(
                "state {} -> {} (hazard {:.2}, ttc {:.2}, held {})",
                self.active,
                proposed,
                self.metrics.hazard_score,
                self.metrics.ttc,
                self.tracker.hold_count()
            );
            self.active = proposed;
        }

        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(self.active);
        self.active
    }

    pub fn control_command(&self, state: FsmState) -> ControlCommand {
        ControlCommand::for_state(state)
    }

    /// Command for the current active state.
    pub fn current_command(&self) -> ControlCommand {
        self.control_command(self.active)
    }

    pub fn metrics(&self) -> DecisionMetrics {
        DecisionMetrics {
            state: self.active,
            hazard_score: self.metrics.hazard_score,
            ttc: self.metrics.ttc,
            mode: self.mode,
            state_stability: self.tracker.hold_count(),
        }
    }

    /// Active state after each of the last [`HISTORY_LEN`] updates, oldest first.
    pub fn history(&self) -> impl Iterator<Item = FsmState> + '_ {
        self.history.iter().copied()
    }

    /// Back to Cruise with no history; the profile is kept.
    pub fn reset(&mut self) {
        self.active = FsmState::Cruise;
        self.tracker.reset(FsmState::Cruise);
        self.metrics = HazardMetrics::default();
        self.ttc_override = false;
        self.history.clear();
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(DrivingMode::default())
    }
}
