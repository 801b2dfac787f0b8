use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{normalize_heading, reflect_horizontal, reflect_vertical};

/// Read-only obstacle snapshot handed to the core each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl ObstacleView {
    pub const fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Reject snapshots containing a negative (or NaN) radius.
pub fn validate_obstacles(obstacles: &[ObstacleView]) -> Result<(), ConfigError> {
    match obstacles.iter().position(|o| o.radius.is_nan() || o.radius < 0.0) {
        Some(index) => Err(ConfigError::NegativeRadius { index, radius: obstacles[index].radius }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    #[default]
    Static,
    /// Moves in a straight line, passing through world edges
    Linear,
    /// Moves in a straight line and reflects off world edges
    Bounce,
}

/// Environment-owned obstacle with optional motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleObstacle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    #[serde(default)]
    pub kind: ObstacleKind,
    /// Speed along `direction` (m/s)
    #[serde(default)]
    pub velocity: f32,
    /// Direction of travel (rad)
    #[serde(default)]
    pub direction: f32,
}

impl CircleObstacle {
    pub fn fixed(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius, kind: ObstacleKind::Static, velocity: 0.0, direction: 0.0 }
    }

    pub fn moving(x: f32, y: f32, radius: f32, kind: ObstacleKind, velocity: f32, direction: f32) -> Self {
        Self { x, y, radius, kind, velocity, direction: normalize_heading(direction) }
    }

    pub fn view(&self) -> ObstacleView {
        ObstacleView::new(self.x, self.y, self.radius)
    }

    pub fn is_moving(&self) -> bool {
        self.kind != ObstacleKind::Static && self.velocity != 0.0
    }

    /// Advance by `dt` inside a `width` × `height` world.
    pub fn step(&mut self, dt: f32, width: f32, height: f32) {
        if !self.is_moving() {
            return;
        }

        self.x += self.velocity * self.direction.cos() * dt;
        self.y += self.velocity * self.direction.sin() * dt;

        if self.kind != ObstacleKind::Bounce {
            return;
        }

        if self.x - self.radius < 0.0 {
            self.x = self.radius;
            self.direction = reflect_vertical(self.direction);
        } else if self.x + self.radius > width {
            self.x = width - self.radius;
            self.direction = reflect_vertical(self.direction);
        }

        if self.y - self.radius < 0.0 {
            self.y = self.radius;
            self.direction = reflect_horizontal(self.direction);
        } else if self.y + self.radius > height {
            self.y = height - self.radius;
            self.direction = reflect_horizontal(self.direction);
        }
    }
}
