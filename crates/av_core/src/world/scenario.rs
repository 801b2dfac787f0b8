//! Preset obstacle layouts.
//!
//! Layouts are authored for a 20 m × 20 m world and scaled to the actual
//! bounds. Random layouts are drawn from a seeded `ChaCha8Rng`, so the same
//! seed always produces the same world.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::obstacle::CircleObstacle;
use crate::error::ConfigError;
use crate::geometry::distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Empty,
    /// 8 sparse obstacles
    #[default]
    Random,
    /// Two rows of posts along y = 5 and y = 15
    Corridor,
    /// Grid of posts outlining crossing roads
    Intersection,
    /// 20 small obstacles
    Dense,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Empty,
        Scenario::Random,
        Scenario::Corridor,
        Scenario::Intersection,
        Scenario::Dense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Empty => "empty",
            Scenario::Random => "random",
            Scenario::Corridor => "corridor",
            Scenario::Intersection => "intersection",
            Scenario::Dense => "dense",
        }
    }

    /// Layout for the default 20 m world with the vehicle starting at its centre.
    pub fn generate(&self, seed: u64) -> Vec<CircleObstacle> {
        self.generate_in(seed, REFERENCE_SIZE, REFERENCE_SIZE, (10.0, 10.0))
    }

    /// Layout scaled to a `width` × `height` world, kept clear of `start`.
    pub fn generate_in(&self, seed: u64, width: f32, height: f32, start: (f32, f32)) -> Vec<CircleObstacle> {
        let (sx, sy) = (width / REFERENCE_SIZE, height / REFERENCE_SIZE);
        let post = |x: f32, y: f32, r: f32| CircleObstacle::fixed(x * sx, y * sy, r);

        let fixed: Vec<CircleObstacle> = match self {
            Scenario::Empty => Vec::new(),
            Scenario::Corridor => (0..5)
                .flat_map(|i| {
                    let x = 5.0 + i as f32 * 2.0;
                    [post(x, 5.0, 0.8), post(x, 15.0, 0.8)]
                })
                .collect(),
            Scenario::Intersection => {
                let mut obstacles = Vec::with_capacity(24);
                for v in (5..=15).step_by(2) {
                    let v = v as f32;
                    obstacles.push(post(8.0, v, 0.7));
                    obstacles.push(post(12.0, v, 0.7));
                }
                for h in (5..=15).step_by(2) {
                    let h = h as f32;
                    obstacles.push(post(h, 8.0, 0.7));
                    obstacles.push(post(h, 12.0, 0.7));
                }
                obstacles
            }
            Scenario::Dense | Scenario::Random => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let (count, radius) = if *self == Scenario::Dense { (20, 0.3..0.8) } else { (8, 0.4..1.0) };
                return scatter(&mut rng, count, radius, (width, height), start);
            }
        };

        // Posts landing on the start pose are dropped
        fixed
            .into_iter()
            .filter(|o| distance((o.x, o.y), start) >= o.radius + START_FOOTPRINT)
            .collect()
    }
}

/// Side length the preset layouts are authored for.
const REFERENCE_SIZE: f32 = 20.0;
/// Scattered obstacles keep this much free space around the start pose.
const SPAWN_CLEARANCE: f32 = 2.5;
/// Fixed posts closer than this (plus their radius) to the start are removed.
const START_FOOTPRINT: f32 = 1.0;
/// Margin, as a fraction of each side, kept free of scattered obstacles.
const SCATTER_MARGIN: f32 = 0.15;
const MAX_ATTEMPTS_PER_OBSTACLE: usize = 64;

fn scatter(
    rng: &mut ChaCha8Rng,
    count: usize,
    radius: std::ops::Range<f32>,
    (width, height): (f32, f32),
    start: (f32, f32),
) -> Vec<CircleObstacle> {
    let mut obstacles = Vec::with_capacity(count);
    for _ in 0..count * MAX_ATTEMPTS_PER_OBSTACLE {
        if obstacles.len() == count {
            break;
        }
        let r = rng.gen_range(radius.clone());
        let (x0, x1) = ((width * SCATTER_MARGIN).max(r), (width * (1.0 - SCATTER_MARGIN)).min(width - r));
        let (y0, y1) = ((height * SCATTER_MARGIN).max(r), (height * (1.0 - SCATTER_MARGIN)).min(height - r));
        if x0 >= x1 || y0 >= y1 {
            continue;
        }
        let x = rng.gen_range(x0..x1);
        let y = rng.gen_range(y0..y1);
        if distance((x, y), start) < SPAWN_CLEARANCE + r {
            continue;
        }
        obstacles.push(CircleObstacle::fixed(x, y, r));
    }
    if obstacles.len() < count {
        log::warn!(
            "placed {} of {} obstacles in a {}x{} world",
            obstacles.len(),
            count,
            width,
            height
        );
    }
    obstacles
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownScenario(s.to_string()))
    }
}
