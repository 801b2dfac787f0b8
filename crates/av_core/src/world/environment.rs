use super::obstacle::{validate_obstacles, CircleObstacle, ObstacleView};
use super::scenario::Scenario;
use crate::error::ConfigError;

/// Source of obstacle snapshots for the control loop.
///
/// `obstacles` returns an owned copy; the core never holds a reference into
/// provider state across a tick.
pub trait EnvironmentProvider {
    fn obstacles(&self) -> Vec<ObstacleView>;

    /// Advance any moving obstacles. Static providers ignore this.
    fn advance(&mut self, _dt: f32) {}
}

/// A fixed scene.
impl EnvironmentProvider for Vec<ObstacleView> {
    fn obstacles(&self) -> Vec<ObstacleView> {
        self.clone()
    }
}

/// Bounded world holding static and moving obstacles.
#[derive(Debug, Clone)]
pub struct Environment {
    obstacles: Vec<CircleObstacle>,
    width: f32,
    height: f32,
}

impl Environment {
    pub fn new(width: f32, height: f32) -> Self {
        Self { obstacles: Vec::new(), width, height }
    }

    /// World populated with `scenario`'s layout, scaled to the bounds and
    /// kept clear of the vehicle's `start` position.
    pub fn from_scenario(scenario: Scenario, seed: u64, width: f32, height: f32, start: (f32, f32)) -> Self {
        Self { obstacles: scenario.generate_in(seed, width, height, start), width, height }
    }

    pub fn add_obstacle(&mut self, obstacle: CircleObstacle) -> Result<(), ConfigError> {
        if obstacle.radius.is_nan() || obstacle.radius < 0.0 {
            return Err(ConfigError::NegativeRadius {
                index: self.obstacles.len(),
                radius: obstacle.radius,
            });
        }
        self.obstacles.push(obstacle);
        Ok(())
    }

    pub fn add_obstacles(
        &mut self,
        obstacles: impl IntoIterator<Item = CircleObstacle>,
    ) -> Result<(), ConfigError> {
        obstacles.into_iter().try_for_each(|o| self.add_obstacle(o))
    }

    pub fn remove_obstacle(&mut self, index: usize) -> Option<CircleObstacle> {
        (index < self.obstacles.len()).then(|| self.obstacles.remove(index))
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn all(&self) -> &[CircleObstacle] {
        &self.obstacles
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_obstacles(&self.obstacles())
    }
}

impl EnvironmentProvider for Environment {
    fn obstacles(&self) -> Vec<ObstacleView> {
        self.obstacles.iter().map(CircleObstacle::view).collect()
    }

    fn advance(&mut self, dt: f32) {
        let (width, height) = (self.width, self.height);
        for obstacle in &mut self.obstacles {
            obstacle.step(dt, width, height);
        }
    }
}
