//! # Proximity Sensor Array
//!
//! Four fixed rays around the vehicle:
//!
//! ```text
//!        FL (+45°)   FR (-45°)
//!              \     /
//!               [car] ──► heading
//!              /     \
//!       BL (+135°)   BR (-135°)
//! ```
//!
//! Each ray reports the distance to the nearest obstacle boundary it crosses,
//! or `max_range` when nothing is hit.

mod array;
mod filter;
mod noise;
pub mod raycast;

pub use array::{SensorArray, SensorRay};
pub use filter::MovingAverage;
pub use noise::GaussianNoise;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum SensorId {
    #[serde(rename = "FL")]
    FrontLeft,
    #[serde(rename = "FR")]
    FrontRight,
    #[serde(rename = "BL")]
    BackLeft,
    #[serde(rename = "BR")]
    BackRight,
}

impl SensorId {
    pub const ALL: [SensorId; 4] =
        [SensorId::FrontLeft, SensorId::FrontRight, SensorId::BackLeft, SensorId::BackRight];

    /// Position in `SensorConfig::offsets_deg` and other per-channel arrays.
    pub fn index(&self) -> usize {
        match self {
            SensorId::FrontLeft => 0,
            SensorId::FrontRight => 1,
            SensorId::BackLeft => 2,
            SensorId::BackRight => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SensorId::FrontLeft => "FL",
            SensorId::FrontRight => "FR",
            SensorId::BackLeft => "BL",
            SensorId::BackRight => "BR",
        }
    }

    pub fn is_front(&self) -> bool {
        matches!(self, SensorId::FrontLeft | SensorId::FrontRight)
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One tick's worth of sensor distances.
///
/// A channel with no entry (sensor dropout) reads as `max_range`, i.e.
/// "nothing detected".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    distances: BTreeMap<SensorId, f32>,
    max_range: f32,
}

impl SensorReading {
    /// Reading with every channel missing.
    pub fn empty(max_range: f32) -> Self {
        Self { distances: BTreeMap::new(), max_range }
    }

    /// All four channels at `max_range`.
    pub fn clear(max_range: f32) -> Self {
        Self::from_distances(max_range, [max_range; 4])
    }

    /// Distances ordered FL, FR, BL, BR.
    pub fn from_distances(max_range: f32, distances: [f32; 4]) -> Self {
        let distances = SensorId::ALL.into_iter().zip(distances).collect();
        Self { distances, max_range }
    }

    pub fn with(mut self, id: SensorId, distance: f32) -> Self {
        self.insert(id, distance);
        self
    }

    pub fn insert(&mut self, id: SensorId, distance: f32) {
        self.distances.insert(id, distance);
    }

    pub fn remove(&mut self, id: SensorId) -> Option<f32> {
        self.distances.remove(&id)
    }

    /// Raw channel value, `None` on dropout.
    pub fn get(&self, id: SensorId) -> Option<f32> {
        self.distances.get(&id).copied()
    }

    /// Effective channel value; dropout and NaN read as `max_range`.
    pub fn distance(&self, id: SensorId) -> f32 {
        match self.get(id) {
            Some(d) if !d.is_nan() => d,
            _ => self.max_range,
        }
    }

    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Closest of the two forward-facing channels.
    pub fn front(&self) -> f32 {
        self.distance(SensorId::FrontLeft).min(self.distance(SensorId::FrontRight))
    }

    /// Closest of the two rear-facing channels.
    pub fn rear(&self) -> f32 {
        self.distance(SensorId::BackLeft).min(self.distance(SensorId::BackRight))
    }

    /// Effective distances for all four channels.
    pub fn iter(&self) -> impl Iterator<Item = (SensorId, f32)> + '_ {
        SensorId::ALL.into_iter().map(move |id| (id, self.distance(id)))
    }

    pub fn as_array(&self) -> [f32; 4] {
        SensorId::ALL.map(|id| self.distance(id))
    }

    /// Complete id → distance map, dropouts filled in.
    pub fn to_map(&self) -> BTreeMap<SensorId, f32> {
        self.iter().collect()
    }
}
