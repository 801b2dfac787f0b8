//! Vehicle kinematics and collision bookkeeping.

mod collision;
mod kinematics;

pub use collision::{circles_overlap, CollisionTracker};
pub use kinematics::{Bounce, Vehicle, VehicleKinematicState, BOUNCE_RESTITUTION, REVERSE_SPEED_RATIO};
