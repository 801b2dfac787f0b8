use serde::{Deserialize, Serialize};

use super::state::FsmState;

/// Debounces FSM output: a candidate must be seen on consecutive ticks
/// before it may become the active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HysteresisTracker {
    candidate: FsmState,
    hold_count: u32,
}

impl HysteresisTracker {
    pub fn new(candidate: FsmState) -> Self {
        Self { candidate, hold_count: 0 }
    }

    /// Record this tick's proposal. Returns `true` once the candidate has
    /// been held for at least `threshold` consecutive ticks.
    pub fn observe(&mut self, proposed: FsmState, threshold: u32) -> bool {
        if proposed == self.candidate {
            self.hold_count = self.hold_count.saturating_add(1);
        } else {
            self.candidate = proposed;
            self.hold_count = 1;
        }
        self.hold_count >= threshold
    }

    pub fn candidate(&self) -> FsmState {
        self.candidate
    }

    pub fn hold_count(&self) -> u32 {
        self.hold_count
    }

    /// Forget any in-flight candidate, anchoring on `state`.
    pub fn reset(&mut self, state: FsmState) {
        self.candidate = state;
        self.hold_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commits_on_nth_tick() {
        let mut tracker = HysteresisTracker::default();
        assert!(!tracker.observe(FsmState::EmergencyBrake, 3));
        assert!(!tracker.observe(FsmState::EmergencyBrake, 3));
        assert!(tracker.observe(FsmState::EmergencyBrake, 3));
        assert_eq!(tracker.hold_count(), 3);
    }

    #[test]
    fn test_change_restarts_count_at_one() {
        let mut tracker = HysteresisTracker::default();
        tracker.observe(FsmState::AvoidLeft, 5);
        tracker.observe(FsmState::AvoidLeft, 5);
        tracker.observe(FsmState::AvoidRight, 5);
        assert_eq!(tracker.candidate(), FsmState::AvoidRight);
        assert_eq!(tracker.hold_count(), 1);
    }

    #[test]
    fn test_threshold_one_commits_immediately() {
        let mut tracker = HysteresisTracker::default();
        assert!(tracker.observe(FsmState::Reversing, 1));
    }

    #[test]
    fn test_reset() {
        let mut tracker = HysteresisTracker::default();
        tracker.observe(FsmState::AvoidLeft, 3);
        tracker.reset(FsmState::Cruise);
        assert_eq!(tracker, HysteresisTracker::new(FsmState::Cruise));
    }
}
