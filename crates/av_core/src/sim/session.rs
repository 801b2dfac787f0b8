//! # Simulation Session
//!
//! Owns one vehicle's sensors, decision engine and kinematics and drives them
//! through fixed ticks:
//!
//! ```text
//! obstacles (copied) → scan → update → command → integrate → collision → record
//! ```
//!
//! A session is single-threaded and shares no state with other sessions, so
//! several can run side by side (see [`crate::api::compare_modes`]).

use serde::{Deserialize, Serialize};

use super::metrics::SessionMetrics;
use super::telemetry::{NullSink, TelemetryRecord, TelemetrySink};
use super::timestep::elapsed_secs;
use crate::config::{DrivingMode, SimConfig};
use crate::decision::{ControlCommand, DecisionEngine, DecisionMetrics, FsmState};
use crate::error::ConfigError;
use crate::sensors::{SensorArray, SensorRay, SensorReading};
use crate::vehicle::{CollisionTracker, Vehicle, VehicleKinematicState};
use crate::world::{validate_obstacles, Environment, EnvironmentProvider, ObstacleView};

/// Everything a dashboard needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tick: u64,
    pub vehicle: VehicleKinematicState,
    pub obstacles: Vec<ObstacleView>,
    pub rays: Vec<SensorRay>,
    pub decision: DecisionMetrics,
    pub metrics: SessionMetrics,
}

pub struct SimulationSession<E: EnvironmentProvider = Environment> {
    config: SimConfig,
    env: E,
    sensors: SensorArray,
    engine: DecisionEngine,
    vehicle: Vehicle,
    collisions: CollisionTracker,
    metrics: SessionMetrics,
    last_obstacles: Vec<ObstacleView>,
    last_command: ControlCommand,
    tick: u64,
}

impl SimulationSession<Environment> {
    /// Session over the world generated from `config.scenario` and `config.seed`.
    pub fn from_config(config: SimConfig) -> Result<Self, ConfigError> {
        let env = Environment::from_scenario(
            config.scenario,
            config.seed,
            config.physics.world_width,
            config.physics.world_height,
            (config.start.x, config.start.y),
        );
        Self::new(config, env)
    }
}

impl<E: EnvironmentProvider> SimulationSession<E> {
    pub fn new(config: SimConfig, env: E) -> Result<Self, ConfigError> {
        config.validate()?;
        let obstacles = env.obstacles();
        validate_obstacles(&obstacles)?;

        let sensors = SensorArray::new(config.sensors.clone(), config.seed)?;
        let vehicle = Vehicle::new(VehicleKinematicState::at(config.start), config.physics.clone());
        log::info!(
            "session start: mode={} scenario={} seed={} obstacles={}",
            config.mode,
            config.scenario,
            config.seed,
            obstacles.len()
        );

        Ok(Self {
            engine: DecisionEngine::new(config.mode),
            config,
            env,
            sensors,
            vehicle,
            collisions: CollisionTracker::new(),
            metrics: SessionMetrics::default(),
            last_obstacles: obstacles,
            last_command: ControlCommand::default(),
            tick: 0,
        })
    }

    // ============================================================
    // Tick
    // ============================================================

    /// Run one control cycle and hand its record to `sink`.
    ///
    /// Fails only if the environment hands over an obstacle with a negative
    /// radius; nothing is mutated in that case.
    pub fn tick<S: TelemetrySink>(&mut self, sink: &mut S) -> Result<TelemetryRecord, ConfigError> {
        let obstacles = self.env.obstacles();
        validate_obstacles(&obstacles)?;
        let dt = self.config.control.dt();

        let state = *self.vehicle.state();
        let reading = self.sensors.scan(state.position(), state.heading, &obstacles);

        let previous = self.engine.state();
        let active = self.engine.update(&reading, state.speed);
        let command = self.engine.control_command(active);

        let bounce = self.vehicle.integrate(command, dt, self.engine.profile().max_speed);
        let collision =
            self.collisions.check(self.vehicle.position(), self.vehicle.radius(), &obstacles);

        let record = self.build_record(active, &reading, collision);
        sink.emit(&record);

        self.metrics.record_tick(
            previous,
            active,
            record.hazard_score,
            record.ttc < self.engine.profile().ttc_threshold,
            bounce.any(),
            self.collisions.count(),
        );
        log::trace!(
            "tick {} {} pos=({:.2}, {:.2}) v={:.2} hazard={:.2}",
            record.tick,
            record.state,
            record.x,
            record.y,
            record.speed,
            record.hazard_score
        );

        self.last_obstacles = obstacles;
        self.last_command = command;
        self.env.advance(dt);
        self.tick += 1;
        Ok(record)
    }

    /// [`tick`](Self::tick) without a sink.
    pub fn step(&mut self) -> Result<TelemetryRecord, ConfigError> {
        self.tick(&mut NullSink)
    }

    /// Run `ticks` cycles back to back.
    pub fn run<S: TelemetrySink>(&mut self, ticks: u64, sink: &mut S) -> Result<SessionMetrics, ConfigError> {
        for _ in 0..ticks {
            self.tick(sink)?;
        }
        log::info!(
            "session ran {} ticks ({:.1}s simulated): collisions={} transitions={} avg_hazard={:.3}",
            ticks,
            self.elapsed_secs(),
            self.metrics.total_collisions,
            self.metrics.state_transitions,
            self.metrics.avg_hazard_score
        );
        Ok(self.metrics)
    }

    /// Run for `config.control.duration_s` simulated seconds.
    pub fn run_to_completion<S: TelemetrySink>(&mut self, sink: &mut S) -> Result<SessionMetrics, ConfigError> {
        let ticks = self.config.control.total_ticks();
        self.run(ticks, sink)
    }

    fn build_record(&self, state: FsmState, reading: &SensorReading, collision: bool) -> TelemetryRecord {
        let pose = self.vehicle.state();
        let hazard = self.engine.last_metrics();
        let mut record = TelemetryRecord {
            tick: self.tick,
            mode: self.engine.mode(),
            state,
            x: pose.x,
            y: pose.y,
            heading: pose.heading,
            speed: pose.speed,
            fl: 0.0,
            fr: 0.0,
            bl: 0.0,
            br: 0.0,
            hazard_score: hazard.hazard_score,
            ttc: hazard.ttc,
            collision,
            total_collisions: self.collisions.count(),
        };
        record.set_sensors(reading);
        record
    }

    // ============================================================
    // Control surface
    // ============================================================

    /// Switch driving mode between ticks.
    pub fn set_mode(&mut self, mode: DrivingMode) {
        self.config.mode = mode;
        self.engine.set_mode(mode);
    }

    pub fn set_mode_str(&mut self, mode: &str) -> Result<(), ConfigError> {
        self.set_mode(mode.parse()?);
        Ok(())
    }

    pub fn set_noise_enabled(&mut self, enabled: bool) {
        self.config.sensors.noise_enabled = enabled;
        self.sensors.set_noise_enabled(enabled);
    }

    pub fn set_filter_enabled(&mut self, enabled: bool) {
        self.config.sensors.filter_enabled = enabled;
        self.sensors.set_filter_enabled(enabled);
    }

    /// Rewind the vehicle to its start pose and clear all counters.
    /// The environment is left as it is.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.sensors = SensorArray::new(self.config.sensors.clone(), self.config.seed)?;
        self.vehicle = Vehicle::new(VehicleKinematicState::at(self.config.start), self.config.physics.clone());
        self.engine = DecisionEngine::new(self.config.mode);
        self.collisions.reset();
        self.metrics = SessionMetrics::default();
        self.last_obstacles = self.env.obstacles();
        self.last_command = ControlCommand::default();
        self.tick = 0;
        Ok(())
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn snapshot(&self) -> SessionSnapshot {
        let pose = self.vehicle.state();
        SessionSnapshot {
            tick: self.tick,
            vehicle: *pose,
            obstacles: self.last_obstacles.clone(),
            rays: self.sensors.rays(pose.position(), pose.heading),
            decision: self.engine.metrics(),
            metrics: self.metrics,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn mode(&self) -> DrivingMode {
        self.engine.mode()
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn metrics(&self) -> SessionMetrics {
        self.metrics
    }

    pub fn last_command(&self) -> ControlCommand {
        self.last_command
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_secs(&self) -> f64 {
        elapsed_secs(self.tick, self.config.control.dt())
    }
}
