//! Control loop end-to-end: transports → inbox → ControlLoop → actuators.

use std::sync::Arc;

use smartwindow::adapters::bus::BusBridge;
use smartwindow::adapters::http::{handle_control, handle_data, StatusBody};
use smartwindow::app::context::{PumpActivity, WindowPosition};
use smartwindow::app::service::ControllerService;
use smartwindow::app::status::StatusBoard;
use smartwindow::config::{ControllerConfig, DegradedPolicy};
use smartwindow::events::Inbox;
use smartwindow::runtime::ControlLoop;

use crate::mock_hw::{ActuatorCall, MockHardware, RecordingSink, ScriptedClimate};

type Loop = ControlLoop<MockHardware, RecordingSink, ScriptedClimate>;

fn build(config: &ControllerConfig, climate: ScriptedClimate) -> (Loop, Arc<Inbox>, Arc<StatusBoard>) {
    let inbox = Arc::new(Inbox::new());
    let board = Arc::new(StatusBoard::new());
    let mut svc = ControllerService::new(config, MockHardware::new(), RecordingSink::default())
        .with_status_board(Arc::clone(&board));
    svc.start();
    let lp = ControlLoop::new(config, svc, climate, Arc::clone(&inbox));
    (lp, inbox, board)
}

fn window(lp: &Loop) -> WindowPosition {
    lp.service().read_actuator_state().window
}

#[test]
fn dirty_air_from_bus_closes_on_next_sample() {
    let config = ControllerConfig::default();
    let (mut lp, inbox, _board) = build(&config, ScriptedClimate::new(30.0, 60.0));
    let bus = BusBridge::new(config.topic_prefix.as_str(), &inbox);

    lp.run_once(0);
    assert_eq!(window(&lp), WindowPosition::Open);

    assert!(bus.on_message("s_window/pm10", "95", 300));
    // Particulates are only folded in when the next sample is due.
    lp.run_once(400);
    assert_eq!(window(&lp), WindowPosition::Open);
    lp.run_once(1000);
    assert_eq!(window(&lp), WindowPosition::Closed);

    assert!(bus.on_message("s_window/pm10", "20", 1100));
    lp.run_once(2000);
    assert_eq!(window(&lp), WindowPosition::Open);
}

#[test]
fn pest_cycle_over_the_bus() {
    let config = ControllerConfig::default();
    let (mut lp, inbox, _board) = build(&config, ScriptedClimate::new(30.0, 60.0));
    let bus = BusBridge::new(config.topic_prefix.as_str(), &inbox);

    lp.run_once(0);
    assert!(bus.on_message("s_window/pump", "ON", 100));
    lp.run_once(100);
    assert_eq!(window(&lp), WindowPosition::Closed);
    assert_eq!(
        lp.service().read_actuator_state().pump,
        PumpActivity::Active { since_ms: 100 }
    );

    // Samples that say "open" are ignored while pest mode holds.
    lp.run_once(1000);
    lp.run_once(2000);
    assert_eq!(window(&lp), WindowPosition::Closed);

    let report = lp.run_once(3100);
    assert!(report.pump_expired);
    assert_eq!(lp.service().sink().pump_stops(), 1);

    assert!(bus.on_message("s_window/pump", "OFF", 5000));
    lp.run_once(5000);
    assert!(!lp.service().pest_mode());
    assert_eq!(window(&lp), WindowPosition::Open);

    let calls = &lp.service().actuators().calls;
    assert_eq!(
        calls.iter().filter(|c| **c == ActuatorCall::PumpOn).count(),
        1
    );
}

#[test]
fn manual_http_command_overrides_pest_closure() {
    let config = ControllerConfig::default();
    let (mut lp, inbox, _board) = build(&config, ScriptedClimate::new(30.0, 60.0));

    assert_eq!(handle_control(Some(r#"{"command":"bug_on"}"#), 0, &inbox).status, 200);
    lp.run_once(0);
    assert_eq!(window(&lp), WindowPosition::Closed);

    assert_eq!(
        handle_control(Some(r#"{"command":"window_open"}"#), 10, &inbox).status,
        200
    );
    lp.run_once(10);
    assert_eq!(window(&lp), WindowPosition::Open);
    assert!(lp.service().pest_mode(), "manual command does not clear pest mode");

    // The next sample still makes no decision.
    lp.run_once(1000);
    assert_eq!(window(&lp), WindowPosition::Open);
}

#[test]
fn command_and_due_sample_move_the_window_once_per_pass() {
    let config = ControllerConfig {
        initial_window: WindowPosition::Closed,
        ..ControllerConfig::default()
    };
    // A comfortable room: the Decision Rule wants Closed.
    let (mut lp, inbox, board) = build(&config, ScriptedClimate::new(22.0, 50.0));
    let moves_before = lp.service().sink().window_moves();

    handle_control(Some(r#"{"command":"window_open"}"#), 0, &inbox);
    let report = lp.run_once(0);
    assert!(report.sample.is_some(), "sample was due in this pass");
    assert_eq!(lp.service().sink().window_moves(), moves_before + 1);
    assert_eq!(window(&lp), WindowPosition::Open);
    assert_eq!(board.read().window, WindowPosition::Open);
    assert!(lp.service().latest_sample().is_some());

    // The next due sample decides as usual.
    lp.run_once(1000);
    assert_eq!(lp.service().sink().window_moves(), moves_before + 2);
    assert_eq!(window(&lp), WindowPosition::Closed);
}

#[test]
fn failed_sensor_follows_degraded_policy() {
    let config = ControllerConfig::default();
    let (mut lp, _inbox, _board) = build(&config, ScriptedClimate::failed());
    lp.run_once(0);
    assert_eq!(window(&lp), WindowPosition::Open);

    let config = ControllerConfig {
        degraded_policy: DegradedPolicy::HoldClosed,
        ..ControllerConfig::default()
    };
    let (mut lp, _inbox, _board) = build(&config, ScriptedClimate::failed());
    lp.run_once(0);
    assert_eq!(window(&lp), WindowPosition::Closed);
}

#[test]
fn data_endpoint_tracks_the_loop() {
    let config = ControllerConfig::default();
    let (mut lp, inbox, board) = build(&config, ScriptedClimate::new(22.0, 50.0));

    lp.run_once(0);
    let body: StatusBody = serde_json::from_str(&handle_data(&board).body).unwrap();
    assert!(!body.window, "comfortable room closes the window");
    assert_eq!(body.temperature, Some(22.0));
    assert!(body.di.is_some());

    handle_control(Some(r#"{"command":"PUMP_ON"}"#), 500, &inbox);
    lp.run_once(500);
    let body: StatusBody = serde_json::from_str(&handle_data(&board).body).unwrap();
    assert!(body.pump);
    assert_eq!(body.timestamp, 500);
}
