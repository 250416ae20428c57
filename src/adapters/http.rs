//! HTTP boundary — payload translation only.
//!
//! Server side:
//! - `POST /control` with `{"command": "<name>"}` → [`handle_control`]
//! - `GET /data` → [`handle_data`]
//!
//! Client side:
//! - backend command pull (`GET .../esp/command`) → [`decode_pull`]
//! - air-quality uplink (`POST .../air-quality`) → [`AirQualityReport`]
//!
//! Socket handling belongs to whichever server/client drives these
//! functions; nothing here blocks or touches the network.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::app::commands::{Channel, Command};
use crate::app::context::{Millis, WindowPosition};
use crate::app::status::{StatusBoard, StatusSnapshot};
use crate::error::{CommandError, QueueError};
use crate::events::{Inbound, Inbox};

/// Status code + JSON body for the server to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    fn ok() -> Self {
        Self {
            status: 200,
            body: json!({ "ok": true }).to_string(),
        }
    }

    fn error(status: u16, error: &str) -> Self {
        Self {
            status,
            body: json!({ "ok": false, "error": error }).to_string(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Control endpoint
// ───────────────────────────────────────────────────────────────

fn command_name(body: &str) -> Result<Option<String>, CommandError> {
    let doc: Value =
        serde_json::from_str(body).map_err(|_| CommandError::Malformed("bad json"))?;
    Ok(doc.get("command").and_then(Value::as_str).map(str::to_owned))
}

/// Decode a `/control` request body into a command.
pub fn decode_control(body: Option<&str>, at_ms: Millis) -> Result<Command, CommandError> {
    let body = body
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or(CommandError::Malformed("no body"))?;
    let name = command_name(body)?.ok_or(CommandError::Malformed("no command"))?;
    Command::from_wire(Channel::Http, &name, at_ms)
}

/// Decode and enqueue a `/control` request.
pub fn handle_control(body: Option<&str>, at_ms: Millis, inbox: &Inbox) -> HttpReply {
    match decode_control(body, at_ms) {
        Ok(cmd) => match inbox.push(Inbound::Command(cmd)) {
            Ok(()) => HttpReply::ok(),
            Err(QueueError::Full) => HttpReply::error(503, "busy"),
        },
        Err(CommandError::Malformed(why)) => {
            warn!("HTTP control rejected: {}", why);
            HttpReply::error(400, why)
        }
        Err(CommandError::UnknownKind) => {
            warn!("HTTP control rejected: unknown command");
            HttpReply::error(400, "unknown command")
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Status endpoint
// ───────────────────────────────────────────────────────────────

/// `/data` response body. Unknown readings serialise as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusBody {
    pub pm25: f32,
    pub pm10: f32,
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub di: Option<f32>,
    pub aqi: Option<u16>,
    pub bug: bool,
    /// `true` = open.
    pub window: bool,
    pub pump: bool,
    pub timestamp: Millis,
}

impl From<&StatusSnapshot> for StatusBody {
    fn from(s: &StatusSnapshot) -> Self {
        let sample = s.sample;
        Self {
            pm25: sample.map_or(0.0, |x| x.pm25()),
            pm10: sample.map_or(0.0, |x| x.pm10()),
            temperature: sample.and_then(|x| x.temperature_c()),
            humidity: sample.and_then(|x| x.humidity_pct()),
            di: sample.and_then(|x| x.discomfort_index()),
            aqi: sample.and_then(|x| x.aqi()),
            bug: s.pest_mode,
            window: s.window == WindowPosition::Open,
            pump: s.pump.is_active(),
            timestamp: s.updated_at_ms,
        }
    }
}

/// Serve `/data` from the published status board.
pub fn handle_data(board: &StatusBoard) -> HttpReply {
    let body = StatusBody::from(&board.read());
    match serde_json::to_string(&body) {
        Ok(body) => HttpReply { status: 200, body },
        Err(_) => HttpReply::error(500, "encode failed"),
    }
}

// ───────────────────────────────────────────────────────────────
// Backend client payloads
// ───────────────────────────────────────────────────────────────

/// Decode a command-pull response. `Ok(None)` means "nothing to do".
pub fn decode_pull(status: u16, body: &str, at_ms: Millis) -> Result<Option<Command>, CommandError> {
    if status == 204 {
        return Ok(None);
    }
    if !(200..300).contains(&status) {
        return Err(CommandError::Malformed("unexpected status"));
    }
    if body.trim().is_empty() {
        return Ok(None);
    }
    let Some(name) = command_name(body)? else {
        warn!("Pull response has no 'command' field");
        return Ok(None);
    };
    Command::from_wire(Channel::Poll, &name, at_ms).map(Some)
}

/// Uplink report posted to the backend after each sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReport {
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
    pub pm25: f32,
    pub pm10: f32,
    pub bug: bool,
}

impl AirQualityReport {
    /// `None` until the controller has seen a sample.
    pub fn from_status(s: &StatusSnapshot) -> Option<Self> {
        let sample = s.sample?;
        Some(Self {
            temperature: sample.temperature_c(),
            humidity: sample.humidity_pct(),
            pm25: sample.pm25(),
            pm10: sample.pm10(),
            bug: s.pest_mode,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::CommandKind;
    use crate::app::context::PumpActivity;
    use crate::sensors::EnvironmentalSample;

    #[test]
    fn control_body_decodes() {
        let cmd = decode_control(Some(r#"{"command":"window_toggle"}"#), 7).unwrap();
        assert_eq!(cmd.kind, CommandKind::WindowToggle);
        assert_eq!(cmd.channel, Channel::Http);
        assert_eq!(cmd.received_at_ms, 7);
    }

    #[test]
    fn legacy_aliases_on_control() {
        let cmd = decode_control(Some(r#"{"command":"ON"}"#), 0).unwrap();
        assert_eq!(cmd.kind, CommandKind::WindowClose);
        let cmd = decode_control(Some(r#"{"command":"OFF"}"#), 0).unwrap();
        assert_eq!(cmd.kind, CommandKind::WindowOpen);
    }

    #[test]
    fn control_errors() {
        assert_eq!(decode_control(None, 0), Err(CommandError::Malformed("no body")));
        assert_eq!(decode_control(Some("  "), 0), Err(CommandError::Malformed("no body")));
        assert_eq!(
            decode_control(Some("{command"), 0),
            Err(CommandError::Malformed("bad json"))
        );
        assert_eq!(
            decode_control(Some(r#"{"cmd":"window_open"}"#), 0),
            Err(CommandError::Malformed("no command"))
        );
        assert_eq!(
            decode_control(Some(r#"{"command":"fly"}"#), 0),
            Err(CommandError::UnknownKind)
        );
    }

    #[test]
    fn handle_control_replies() {
        let inbox = Inbox::new();
        let r = handle_control(Some(r#"{"command":"bug_on"}"#), 0, &inbox);
        assert_eq!(r.status, 200);
        assert_eq!(r.body, r#"{"ok":true}"#);
        assert_eq!(inbox.len(), 1);

        let r = handle_control(Some(r#"{"command":"nope"}"#), 0, &inbox);
        assert_eq!(r.status, 400);
        assert!(r.body.contains("unknown command"));
        assert_eq!(inbox.len(), 1, "rejected commands are not queued");

        let r = handle_control(None, 0, &inbox);
        assert_eq!(r.status, 400);
        assert!(r.body.contains("no body"));
    }

    #[test]
    fn status_body_nulls_unknown_readings() {
        let snap = StatusSnapshot {
            window: WindowPosition::Closed,
            pump: PumpActivity::Active { since_ms: 5 },
            pest_mode: true,
            sample: Some(EnvironmentalSample::from_values(None, Some(50.0), 12.0, 30.0)),
            updated_at_ms: 99,
        };
        let body: Value = serde_json::to_value(StatusBody::from(&snap)).unwrap();
        assert!(body["temperature"].is_null());
        assert!(body["di"].is_null());
        assert_eq!(body["humidity"], json!(50.0));
        assert_eq!(body["window"], json!(false));
        assert_eq!(body["pump"], json!(true));
        assert_eq!(body["bug"], json!(true));
        assert_eq!(body["timestamp"], json!(99));
    }

    #[test]
    fn data_endpoint_reads_board() {
        let board = StatusBoard::new();
        let r = handle_data(&board);
        assert_eq!(r.status, 200);
        let body: StatusBody = serde_json::from_str(&r.body).unwrap();
        assert!(body.window);
        assert!(!body.pump);
    }

    #[test]
    fn pull_decoding() {
        assert_eq!(decode_pull(204, "", 0), Ok(None));
        assert_eq!(decode_pull(200, r#"{"status":"idle"}"#, 0), Ok(None));
        let cmd = decode_pull(200, r#"{"command":"WINDOW_OPEN"}"#, 3).unwrap().unwrap();
        assert_eq!(cmd.kind, CommandKind::WindowOpen);
        assert_eq!(cmd.channel, Channel::Poll);
        assert!(decode_pull(500, "", 0).is_err());
        assert_eq!(
            decode_pull(200, r#"{"command":"SPRAY"}"#, 0),
            Err(CommandError::UnknownKind)
        );
    }

    #[test]
    fn uplink_report() {
        assert!(AirQualityReport::from_status(&StatusSnapshot::INITIAL).is_none());
        let snap = StatusSnapshot {
            sample: Some(EnvironmentalSample::from_values(Some(23.0), Some(40.0), 8.0, 15.0)),
            ..StatusSnapshot::INITIAL
        };
        let report = AirQualityReport::from_status(&snap).unwrap();
        let v: Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(v["temperature"], json!(23.0));
        assert_eq!(v["pm10"], json!(15.0));
        assert_eq!(v["bug"], json!(false));
    }
}
