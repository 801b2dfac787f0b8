//! Obstacles and the environment that supplies them to the control loop.

mod environment;
mod obstacle;
mod scenario;

pub use environment::{Environment, EnvironmentProvider};
pub use obstacle::{validate_obstacles, CircleObstacle, ObstacleKind, ObstacleView};
pub use scenario::Scenario;
