use serde::{Deserialize, Serialize};

use crate::geometry::distance;
use crate::world::ObstacleView;

/// Strict overlap test: touching circles do not collide.
#[inline]
pub fn circles_overlap(a: (f32, f32), ra: f32, b: (f32, f32), rb: f32) -> bool {
    distance(a, b) < ra + rb
}

/// Counts collision *entries*, not ticks spent overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionTracker {
    in_collision: bool,
    count: u32,
}

impl CollisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update against this tick's obstacles. Returns whether the vehicle overlaps any.
    pub fn check(&mut self, position: (f32, f32), radius: f32, obstacles: &[ObstacleView]) -> bool {
        let hit = obstacles.iter().any(|o| circles_overlap(position, radius, o.center(), o.radius));
        if hit && !self.in_collision {
            self.count += 1;
            log::warn!(
                "collision #{} at ({:.2}, {:.2})",
                self.count,
                position.0,
                position.1
            );
        }
        self.in_collision = hit;
        hit
    }

    pub fn in_collision(&self) -> bool {
        self.in_collision
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
