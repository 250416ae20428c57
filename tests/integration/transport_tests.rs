//! Transport translation: every channel's vocabulary lands on the same
//! controller semantics, and bad payloads never reach the core.

use smartwindow::adapters::bus::translate;
use smartwindow::adapters::http::{decode_control, decode_pull, handle_control};
use smartwindow::app::commands::{Channel, CommandKind};
use smartwindow::app::context::WindowPosition;
use smartwindow::app::service::{ControllerService, Disposition};
use smartwindow::config::ControllerConfig;
use smartwindow::error::CommandError;
use smartwindow::events::{INBOX_DEPTH, Inbound, Inbox};

use crate::mock_hw::{MockHardware, RecordingSink};

fn service() -> ControllerService<MockHardware, RecordingSink> {
    ControllerService::new(
        &ControllerConfig::default(),
        MockHardware::new(),
        RecordingSink::default(),
    )
}

#[test]
fn shared_vocabulary_on_every_channel() {
    for name in [
        "window_open",
        "window_close",
        "window_toggle",
        "bug_on",
        "bug_off",
        "PUMP_ON",
        "PUMP_OFF",
    ] {
        let body = format!(r#"{{"command":"{name}"}}"#);
        let http = decode_control(Some(&body), 0).unwrap();
        let poll = decode_pull(200, &body, 0).unwrap().unwrap();
        let Ok(Some(Inbound::Command(bus))) = translate("s_window", "s_window/pump", name, 0)
        else {
            panic!("bus rejected {name}");
        };
        assert_eq!(http.kind, poll.kind, "{name}");
        assert_eq!(http.kind, bus.kind, "{name}");
        assert_eq!(http.kind.name(), name);
    }
}

#[test]
fn on_off_mean_different_things_per_channel() {
    assert_eq!(
        decode_control(Some(r#"{"command":"ON"}"#), 0).unwrap().kind,
        CommandKind::WindowClose
    );
    let Ok(Some(Inbound::Command(bus))) = translate("s_window", "s_window/pump", "ON", 0) else {
        panic!("bus rejected ON");
    };
    assert_eq!(bus.kind, CommandKind::PestDetected);
    assert_eq!(
        decode_pull(200, r#"{"command":"ON"}"#, 0),
        Err(CommandError::UnknownKind)
    );
}

#[test]
fn same_command_on_two_channels_applies_twice() {
    let mut svc = service();
    let http = decode_control(Some(r#"{"command":"window_toggle"}"#), 0).unwrap();
    let poll = decode_pull(200, r#"{"command":"window_toggle"}"#, 1)
        .unwrap()
        .unwrap();
    assert_eq!(http.channel, Channel::Http);
    assert_eq!(poll.channel, Channel::Poll);

    assert_eq!(svc.submit_command(http.clone()), Disposition::Applied);
    assert_eq!(svc.submit_command(poll), Disposition::Applied);
    assert_eq!(svc.read_actuator_state().window, WindowPosition::Open);

    // A repeat on the same channel is suppressed.
    assert_eq!(svc.submit_command(http), Disposition::Duplicate);
    assert_eq!(svc.sink().window_moves(), 2);
}

#[test]
fn full_inbox_answers_busy() {
    let inbox = Inbox::new();
    for i in 0..INBOX_DEPTH as u64 {
        assert_eq!(
            handle_control(Some(r#"{"command":"window_toggle"}"#), i, &inbox).status,
            200
        );
    }
    let reply = handle_control(Some(r#"{"command":"window_toggle"}"#), 99, &inbox);
    assert_eq!(reply.status, 503);
    assert!(reply.body.contains("busy"));
    assert_eq!(inbox.dropped_count(), 1);
}

#[test]
fn malformed_payloads_never_reach_the_inbox() {
    let inbox = Inbox::new();
    for body in [None, Some(""), Some("not json"), Some(r#"{"x":1}"#), Some(r#"{"command":"fly"}"#)] {
        assert_eq!(handle_control(body, 0, &inbox).status, 400);
    }
    assert!(inbox.is_empty());
    assert!(translate("s_window", "s_window/pm25", "high", 0).is_err());
}
