//! The control loop and what it emits.

mod metrics;
mod session;
pub mod telemetry;
pub mod timestep;

pub use metrics::SessionMetrics;
pub use session::{SessionSnapshot, SimulationSession};
pub use telemetry::{CallbackSink, NullSink, TelemetryRecord, TelemetrySink};
pub use timestep::{CONTROL_DT, CONTROL_DT_MS, TICK_HZ};
