//! Discrete-time vehicle integrator.
//!
//! One call to [`Vehicle::integrate`] advances the pose by `dt`:
//! speed (throttle/brake/friction) → heading (steering) → position → bounds.

use serde::{Deserialize, Serialize};

use crate::config::{PhysicsConfig, StartPose};
use crate::decision::ControlCommand;
use crate::geometry::{normalize_heading, reflect_horizontal, reflect_vertical};

/// Fraction of speed kept, with sign flipped, after hitting a wall.
pub const BOUNCE_RESTITUTION: f32 = -0.5;
/// Reverse speed cap as a fraction of forward max.
pub const REVERSE_SPEED_RATIO: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleKinematicState {
    pub x: f32,
    pub y: f32,
    /// Radians in `[0, 2π)`
    pub heading: f32,
    /// Signed; negative is reverse (m/s)
    pub speed: f32,
}

impl VehicleKinematicState {
    pub fn at(pose: StartPose) -> Self {
        Self { x: pose.x, y: pose.y, heading: normalize_heading(pose.heading), speed: 0.0 }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl Default for VehicleKinematicState {
    fn default() -> Self {
        Self::at(StartPose::default())
    }
}

/// World edges touched during one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounce {
    /// Left or right edge
    pub vertical: bool,
    /// Bottom or top edge
    pub horizontal: bool,
}

impl Bounce {
    pub fn any(&self) -> bool {
        self.vertical || self.horizontal
    }
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    state: VehicleKinematicState,
    physics: PhysicsConfig,
}

impl Vehicle {
    pub fn new(state: VehicleKinematicState, physics: PhysicsConfig) -> Self {
        Self { state: VehicleKinematicState { heading: normalize_heading(state.heading), ..state }, physics }
    }

    pub fn state(&self) -> &VehicleKinematicState {
        &self.state
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn radius(&self) -> f32 {
        self.physics.vehicle_radius
    }

    pub fn position(&self) -> (f32, f32) {
        self.state.position()
    }

    pub fn speed(&self) -> f32 {
        self.state.speed
    }

    pub fn heading(&self) -> f32 {
        self.state.heading
    }

    /// Teleport, e.g. for scenario setup. Speed is kept.
    pub fn set_pose(&mut self, x: f32, y: f32, heading: f32) {
        self.state.x = x;
        self.state.y = y;
        self.state.heading = normalize_heading(heading);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.state.speed = speed;
    }

    /// Advance one step of `dt` seconds under `cmd`, capping forward speed at
    /// `max_speed`. Returns which world edges were hit.
    pub fn integrate(&mut self, cmd: ControlCommand, dt: f32, max_speed: f32) -> Bounce {
        if !dt.is_finite() || dt <= 0.0 {
            return Bounce::default();
        }
        let cmd = cmd.clamped();

        self.update_speed(&cmd, dt, max_speed);

        if self.state.speed.abs() > self.physics.steering_min_speed {
            self.state.heading =
                normalize_heading(self.state.heading + cmd.steering * self.physics.turn_rate * dt);
        }

        self.state.x += self.state.speed * self.state.heading.cos() * dt;
        self.state.y += self.state.speed * self.state.heading.sin() * dt;

        self.enforce_bounds()
    }

    // ============================================================
    // Speed
    // ============================================================

    fn update_speed(&mut self, cmd: &ControlCommand, dt: f32, max_speed: f32) {
        let speed = self.state.speed;
        let moving = speed.abs() > self.physics.rest_speed;
        let sign = speed.signum();

        // Brake is a plain negative acceleration: from rest or while
        // reversing it drives the vehicle backwards
        let mut accel = if cmd.brake > 0.0 {
            -self.physics.max_brake * cmd.brake
        } else {
            self.physics.max_accel * cmd.throttle
        };

        let friction = if moving {
            -self.physics.friction * sign
        } else {
            if accel.abs() < self.physics.friction {
                accel = 0.0;
            }
            0.0
        };

        let next = speed + (accel + friction) * dt;
        // Friction alone never reverses motion
        let next = if accel == 0.0 && moving && next.signum() != sign { 0.0 } else { next };

        let max_speed = max_speed.max(0.0);
        self.state.speed = next.clamp(-max_speed * REVERSE_SPEED_RATIO, max_speed);
    }

    // ============================================================
    // World bounds
    // ============================================================

    fn enforce_bounds(&mut self) -> Bounce {
        let r = self.physics.vehicle_radius;
        let (w, h) = (self.physics.world_width, self.physics.world_height);
        let mut bounce = Bounce::default();

        if self.state.x - r < 0.0 || self.state.x + r > w {
            self.state.x = self.state.x.clamp(r, w - r);
            self.state.speed *= BOUNCE_RESTITUTION;
            self.state.heading = reflect_vertical(self.state.heading);
            bounce.vertical = true;
        }
        if self.state.y - r < 0.0 || self.state.y + r > h {
            self.state.y = self.state.y.clamp(r, h - r);
            self.state.speed *= BOUNCE_RESTITUTION;
            self.state.heading = reflect_horizontal(self.state.heading);
            bounce.horizontal = true;
        }
        if bounce.any() {
            log::trace!(
                "boundary bounce at ({:.2}, {:.2}) heading {:.3}",
                self.state.x,
                self.state.y,
                self.state.heading
            );
        }
        bounce
    }
}
