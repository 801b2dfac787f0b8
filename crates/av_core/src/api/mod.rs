//! JSON batch entry point and mode comparison.

mod compare;
mod json_api;

pub use compare::{compare_modes, ModeComparison};
pub use json_api::{
    simulate, simulate_json, SimRequest, SimResponse, CUSTOM_SCENARIO, MAX_REQUEST_TICKS, SCHEMA_VERSION,
};
