//! Driving FSM states and the reactive transition table.
//!
//! ## Transition rules
//! ```text
//! Cruise         → EmergencyBrake  front < D and both front sensors < D
//!                → AvoidRight      front < D and FL < FR
//!                → AvoidLeft       front < D otherwise
//! AvoidLeft      → Cruise          FL > 1.5D and FR > 1.5D
//!                → AvoidRight      FR < D
//! AvoidRight     → Cruise          FL > 1.5D and FR > 1.5D
//!                → AvoidLeft       FL < D
//! EmergencyBrake → Cruise          front > 1.5D
//!                → Reversing       speed < 0.1
//! Reversing      → EmergencyBrake  rear < D
//!                → Cruise          front > 2D
//! ```
//! `D` is the profile's danger threshold. Anything not listed stays put.
//! The predictive TTC override is applied by the engine before this table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sensors::{SensorId, SensorReading};

/// Speed below which a braking vehicle counts as stopped.
pub const STOPPED_SPEED: f32 = 0.1;
/// Clearance factor (× danger) for leaving EmergencyBrake or an avoid state.
pub const CLEAR_FACTOR: f32 = 1.5;
/// Clearance factor (× danger) for leaving Reversing.
pub const REVERSE_CLEAR_FACTOR: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum FsmState {
    #[default]
    Cruise,
    AvoidLeft,
    AvoidRight,
    EmergencyBrake,
    Reversing,
}

impl FsmState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FsmState::Cruise => "CRUISE",
            FsmState::AvoidLeft => "AVOID_LEFT",
            FsmState::AvoidRight => "AVOID_RIGHT",
            FsmState::EmergencyBrake => "EMERGENCY_BRAKE",
            FsmState::Reversing => "REVERSING",
        }
    }

    /// Reactive rule for the current state, ignoring the TTC override.
    pub fn transition(self, reading: &SensorReading, speed: f32, danger: f32) -> FsmState {
        let fl = reading.distance(SensorId::FrontLeft);
        let fr = reading.distance(SensorId::FrontRight);
        let front = reading.front();

        match self {
            FsmState::EmergencyBrake => {
                if front > danger * CLEAR_FACTOR {
                    FsmState::Cruise
                } else if speed < STOPPED_SPEED {
                    FsmState::Reversing
                } else {
                    FsmState::EmergencyBrake
                }
            }
            FsmState::Reversing => {
                if reading.rear() < danger {
                    FsmState::EmergencyBrake
                } else if front > danger * REVERSE_CLEAR_FACTOR {
                    FsmState::Cruise
                } else {
                    FsmState::Reversing
                }
            }
            FsmState::AvoidLeft => {
                if fl > danger * CLEAR_FACTOR && fr > danger * CLEAR_FACTOR {
                    FsmState::Cruise
                } else if fr < danger {
                    FsmState::AvoidRight
                } else {
                    FsmState::AvoidLeft
                }
            }
            FsmState::AvoidRight => {
                if fl > danger * CLEAR_FACTOR && fr > danger * CLEAR_FACTOR {
                    FsmState::Cruise
                } else if fl < danger {
                    FsmState::AvoidLeft
                } else {
                    FsmState::AvoidRight
                }
            }
            FsmState::Cruise => {
                if front >= danger {
                    FsmState::Cruise
                } else if fl < danger && fr < danger {
                    FsmState::EmergencyBrake
                } else if fl < fr {
                    // Obstacle on the left: steer right
                    FsmState::AvoidRight
                } else {
                    FsmState::AvoidLeft
                }
            }
        }
    }
}

impl fmt::Display for FsmState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
