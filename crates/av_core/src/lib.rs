//! # av_core - Deterministic Autonomous Vehicle Simulation Core
//!
//! Closed-loop simulation of a single ground vehicle among circular obstacles:
//! a four-ray proximity sensor, a hazard/TTC-aware driving FSM with
//! hysteresis, and a kinematic integrator with wall bounce.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same result)
//! - Three driving profiles: cautious, normal, aggressive
//! - Pluggable obstacle providers and telemetry sinks
//! - JSON API for batch runs and mode comparison
//!
//! ## Quick start
//! ```rust
//! use av_core::{SimConfig, SimulationSession, TelemetryRecord};
//!
//! let mut session = SimulationSession::from_config(SimConfig::default()).unwrap();
//! let mut telemetry: Vec<TelemetryRecord> = Vec::new();
//! let metrics = session.run(100, &mut telemetry).unwrap();
//! assert_eq!(metrics.ticks, 100);
//! assert_eq!(telemetry.len(), 100);
//! ```

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod config;
pub mod decision;
pub mod error;
pub mod geometry;
pub mod sensors;
pub mod sim;
pub mod vehicle;
pub mod world;

// Re-export main API
pub use api::{compare_modes, simulate_json, SimRequest, SimResponse, SCHEMA_VERSION};
pub use config::{DrivingMode, DrivingProfile, SimConfig};
pub use decision::{ControlCommand, DecisionEngine, FsmState, HazardMetrics};
pub use error::{ConfigError, Result, SimError};
pub use sensors::{SensorArray, SensorId, SensorReading};
pub use sim::{SessionMetrics, SimulationSession, TelemetryRecord, TelemetrySink};
pub use vehicle::{Vehicle, VehicleKinematicState};
pub use world::{Environment, EnvironmentProvider, ObstacleView, Scenario};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
