//! Whole-session behaviour through the public API.

use av_core::config::StartPose;
use av_core::sim::{CallbackSink, NullSink};
use av_core::world::{CircleObstacle, ObstacleKind};
use av_core::{
    compare_modes, simulate_json, DrivingMode, Environment, FsmState, ObstacleView, Scenario,
    SensorId, SimConfig, SimulationSession, TelemetryRecord,
};

fn run(config: SimConfig, obstacles: Vec<ObstacleView>, ticks: u64) -> Vec<TelemetryRecord> {
    let mut session = SimulationSession::new(config, obstacles).unwrap();
    let mut records = Vec::new();
    session.run(ticks, &mut records).unwrap();
    records
}

#[test]
fn empty_world_cruises_without_collision() {
    let records = run(SimConfig::deterministic(), Vec::new(), 300);
    assert!(records.iter().all(|r| !r.collision));
    assert!(records.iter().all(|r| r.hazard_score == 0.0));
    assert!(records.iter().all(|r| r.state == FsmState::Cruise));
    assert!(records.iter().all(|r| r.speed <= DrivingMode::Normal.profile().max_speed));
}

#[test]
fn vehicle_never_leaves_the_world() {
    for heading in [0.0f32, 0.7, 1.6, 2.4, 3.3, 4.0, 5.5] {
        let config = SimConfig {
            start: StartPose { x: 10.0, y: 10.0, heading },
            ..SimConfig::deterministic()
        };
        for r in run(config, Vec::new(), 400) {
            assert!((0.5..=19.5).contains(&r.x), "x={} heading0={heading}", r.x);
            assert!((0.5..=19.5).contains(&r.y), "y={} heading0={heading}", r.y);
            assert!((0.0..std::f32::consts::TAU).contains(&r.heading));
        }
    }
}

#[test]
fn obstacle_ahead_leaves_cruise() {
    let config = SimConfig {
        start: StartPose { x: 4.0, y: 10.0, heading: 0.0 },
        ..SimConfig::deterministic()
    };
    let records = run(config, vec![ObstacleView::new(10.0, 10.0, 2.5)], 80);
    let first_alert = records
        .iter()
        .position(|r| r.state != FsmState::Cruise)
        .expect("vehicle never reacted to the obstacle");
    assert!(matches!(
        records[first_alert].state,
        FsmState::EmergencyBrake | FsmState::AvoidLeft | FsmState::AvoidRight
    ));
    assert!(records[first_alert].hazard_score > 0.0);
}

#[test]
fn same_seed_same_run() {
    let config = SimConfig {
        scenario: Scenario::Dense,
        seed: 1234,
        sensors: av_core::config::SensorConfig { noise_enabled: true, filter_enabled: true, ..Default::default() },
        ..SimConfig::default()
    };
    let mut a = SimulationSession::from_config(config.clone()).unwrap();
    let mut b = SimulationSession::from_config(config).unwrap();
    let mut ra: Vec<TelemetryRecord> = Vec::new();
    let mut rb: Vec<TelemetryRecord> = Vec::new();
    a.run(200, &mut ra).unwrap();
    b.run(200, &mut rb).unwrap();
    assert_eq!(ra, rb);
}

#[test]
fn missing_sensor_degrades_to_clear() {
    let engine = av_core::DecisionEngine::new(DrivingMode::Normal);
    let reading = av_core::SensorReading::empty(10.0).with(SensorId::BackLeft, 10.0);
    assert_eq!(engine.next_state(&reading, 2.0), FsmState::Cruise);
    assert_eq!(engine.hazard_score(&reading), 0.0);
}

#[test]
fn mode_switch_changes_speed_cap() {
    // Start near the left wall so neither phase reaches the right one
    let config = SimConfig {
        start: StartPose { x: 2.0, y: 10.0, heading: 0.0 },
        ..SimConfig::deterministic()
    };
    let mut session = SimulationSession::new(config, Vec::<ObstacleView>::new()).unwrap();
    session.set_mode(DrivingMode::Cautious);
    session.run(80, &mut NullSink).unwrap();
    assert!(session.vehicle().speed() <= 2.0 + 1e-6);

    session.set_mode(DrivingMode::Aggressive);
    let mut top = 0.0f32;
    session.run(40, &mut CallbackSink(|r: &TelemetryRecord| top = top.max(r.speed))).unwrap();
    assert!(top > 2.0);
}

#[test]
fn moving_obstacles_advance_between_ticks() {
    let mut env = Environment::new(20.0, 20.0);
    env.add_obstacle(CircleObstacle::moving(3.0, 3.0, 0.5, ObstacleKind::Bounce, 1.0, 0.0)).unwrap();
    let mut session = SimulationSession::new(SimConfig::deterministic(), env).unwrap();
    session.run(10, &mut NullSink).unwrap();
    let moved = &session.env().all()[0];
    assert!((moved.x - 4.0).abs() < 1e-3);
    assert_eq!(session.snapshot().obstacles.len(), 1);
}

#[test]
fn json_round_trip() {
    let out = simulate_json(
        r#"{"schema_version": 1, "seed": 3, "mode": "aggressive", "scenario": "intersection", "ticks": 50, "include_telemetry": true}"#,
    )
    .unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["mode"], "aggressive");
    assert_eq!(v["telemetry"].as_array().map(Vec::len), Some(50));
    assert_eq!(v["final_state"]["tick"], 50);
}

#[test]
fn compare_modes_runs_every_mode() {
    let results = compare_modes(42, Scenario::Corridor, 120).unwrap();
    assert_eq!(results.len(), 3);
    let cautious = &results[0];
    let aggressive = &results[2];
    assert_eq!(cautious.mode, DrivingMode::Cautious);
    assert_eq!(aggressive.mode, DrivingMode::Aggressive);
}
