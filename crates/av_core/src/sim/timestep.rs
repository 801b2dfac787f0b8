/// timestep.rs
/// Control loop timing constants
///
/// The loop is purely timestep-based: one tick advances simulated time by
/// exactly `CONTROL_DT`. Pacing against wall-clock time is the caller's job.

/// Control period (100ms)
pub const CONTROL_DT_MS: u32 = 100;

/// Control period in seconds
pub const CONTROL_DT: f32 = 0.1;

/// Nominal tick rate
pub const TICK_HZ: u32 = 10;

// Compile-time validation
const _: () = assert!(CONTROL_DT_MS * TICK_HZ == 1000);

/// Simulated seconds elapsed after `ticks` control cycles.
#[inline]
pub fn elapsed_secs(ticks: u64, dt: f32) -> f64 {
    ticks as f64 * dt as f64
}
