//! Per-tick telemetry records and sinks.
//!
//! The core emits one flat [`TelemetryRecord`] per tick and knows nothing
//! about where it goes. Persistence (JSON lines, CSV, a socket) is up to the
//! sink.

use serde::{Deserialize, Serialize};

use crate::config::DrivingMode;
use crate::decision::FsmState;
use crate::sensors::{SensorId, SensorReading};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub tick: u64,
    pub mode: DrivingMode,
    pub state: FsmState,
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub speed: f32,
    /// Front-left distance (m)
    pub fl: f32,
    pub fr: f32,
    pub bl: f32,
    pub br: f32,
    pub hazard_score: f32,
    /// `null` in JSON when the vehicle is not closing on anything
    #[serde(with = "ttc_serde")]
    pub ttc: f32,
    pub collision: bool,
    pub total_collisions: u32,
}

impl TelemetryRecord {
    pub fn sensor(&self, id: SensorId) -> f32 {
        match id {
            SensorId::FrontLeft => self.fl,
            SensorId::FrontRight => self.fr,
            SensorId::BackLeft => self.bl,
            SensorId::BackRight => self.br,
        }
    }

    pub(crate) fn set_sensors(&mut self, reading: &SensorReading) {
        [self.fl, self.fr, self.bl, self.br] = reading.as_array();
    }
}

/// Receives one record per tick.
pub trait TelemetrySink {
    fn emit(&mut self, record: &TelemetryRecord);
}

/// Collect everything in memory.
impl TelemetrySink for Vec<TelemetryRecord> {
    fn emit(&mut self, record: &TelemetryRecord) {
        self.push(record.clone());
    }
}

/// Discards records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn emit(&mut self, _record: &TelemetryRecord) {}
}

/// Adapts a closure into a sink.
pub struct CallbackSink<F: FnMut(&TelemetryRecord)>(pub F);

impl<F: FnMut(&TelemetryRecord)> TelemetrySink for CallbackSink<F> {
    fn emit(&mut self, record: &TelemetryRecord) {
        (self.0)(record)
    }
}

impl<S: TelemetrySink + ?Sized> TelemetrySink for &mut S {
    fn emit(&mut self, record: &TelemetryRecord) {
        (**self).emit(record)
    }
}

/// TTC as `Option<f32>` on the wire: infinity ↔ `null`.
pub(crate) mod ttc_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ttc: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if ttc.is_finite() {
            serializer.serialize_some(ttc)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::INFINITY))
    }
}
