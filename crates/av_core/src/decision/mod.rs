//! Hazard assessment, the driving FSM and command mapping.

mod command;
mod engine;
pub mod hazard;
mod hysteresis;
mod state;

pub use command::ControlCommand;
pub use engine::{DecisionEngine, DecisionMetrics, HISTORY_LEN, TTC_OVERRIDE_MIN_SPEED};
pub use hazard::{danger_value, hazard_score, time_to_collision, HazardMetrics};
pub use hysteresis::HysteresisTracker;
pub use state::FsmState;
