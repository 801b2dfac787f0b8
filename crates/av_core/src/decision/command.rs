use serde::{Deserialize, Serialize};

use super::state::FsmState;

/// Actuation request for one tick.
///
/// `throttle` and `steering` lie in `[-1, 1]`, `brake` in `[0, 1]`.
/// Positive steering increases heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlCommand {
    pub throttle: f32,
    pub steering: f32,
    pub brake: f32,
}

impl ControlCommand {
    pub const FULL_BRAKE: ControlCommand = ControlCommand { throttle: 0.0, steering: 0.0, brake: 1.0 };

    pub const fn new(throttle: f32, steering: f32, brake: f32) -> Self {
        Self { throttle, steering, brake }
    }

    /// Fixed lookup from FSM state to actuation.
    pub fn for_state(state: FsmState) -> Self {
        match state {
            FsmState::Cruise => Self::new(1.0, 0.0, 0.0),
            FsmState::AvoidLeft => Self::new(0.6, -0.8, 0.0),
            FsmState::AvoidRight => Self::new(0.6, 0.8, 0.0),
            FsmState::EmergencyBrake => Self::FULL_BRAKE,
            FsmState::Reversing => Self::new(-0.5, 0.0, 0.0),
        }
    }

    /// Same command with every channel forced into range. NaN becomes 0.
    pub fn clamped(self) -> Self {
        let fix = |v: f32, lo: f32, hi: f32| if v.is_nan() { 0.0 } else { v.clamp(lo, hi) };
        Self {
            throttle: fix(self.throttle, -1.0, 1.0),
            steering: fix(self.steering, -1.0, 1.0),
            brake: fix(self.brake, 0.0, 1.0),
        }
    }
}

/// Full brake. Anything that cannot produce a command falls back to this.
impl Default for ControlCommand {
    fn default() -> Self {
        Self::FULL_BRAKE
    }
}

impl From<FsmState> for ControlCommand {
    fn from(state: FsmState) -> Self {
        Self::for_state(state)
    }
}
