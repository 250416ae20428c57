//! Line-oriented console transport for running the controller on a host.
//!
//! Each stdin line stands in for one delivery on a real transport:
//!
//! ```text
//! http {"command":"window_toggle"}   POST /control
//! http                               POST /control without a body
//! bus s_window/pm25 41.5             bus message
//! poll 200 {"command":"WINDOW_OPEN"} backend pull response
//! poll 204                           backend pull, nothing pending
//! climate 24.5 60                    set the simulated SHT31 reading
//! climate off                        make the sensor fail
//! status                             GET /data
//! quit
//! ```

use std::sync::Arc;

use log::warn;

use crate::adapters::bus::BusBridge;
use crate::adapters::http::{decode_pull, handle_control, handle_data};
use crate::adapters::time::MonotonicClock;
use crate::app::status::StatusBoard;
use crate::events::{Inbound, Inbox};
use crate::sensors::climate::ClimateInjector;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleLine<'a> {
    Http(Option<&'a str>),
    Bus { topic: &'a str, payload: &'a str },
    Poll { status: u16, body: &'a str },
    Climate(Option<(f32, f32)>),
    Status,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleLine<'_>>, &'static str> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let parsed = match verb {
        "http" => ConsoleLine::Http((!rest.is_empty()).then_some(rest)),
        "bus" => {
            let (topic, payload) = rest
                .split_once(char::is_whitespace)
                .ok_or("usage: bus <topic> <payload>")?;
            ConsoleLine::Bus {
                topic,
                payload: payload.trim(),
            }
        }
        "poll" => {
            let (status, body) = match rest.split_once(char::is_whitespace) {
                Some((status, body)) => (status, body.trim()),
                None => (rest, ""),
            };
            let status = status.parse().map_err(|_| "usage: poll <status> [body]")?;
            ConsoleLine::Poll { status, body }
        }
        "climate" if rest == "off" => ConsoleLine::Climate(None),
        "climate" => {
            let mut parts = rest.split_whitespace().map(str::parse::<f32>);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(Ok(t)), Some(Ok(h)), None) => ConsoleLine::Climate(Some((t, h))),
                _ => return Err("usage: climate <temp_c> <humidity_pct> | climate off"),
            }
        }
        "status" => ConsoleLine::Status,
        "quit" | "exit" => ConsoleLine::Quit,
        _ => return Err("unknown verb"),
    };
    Ok(Some(parsed))
}

/// Result of executing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Reply(String),
    Quit,
}

/// Routes console lines to the same boundary functions real transports use.
pub struct Console {
    inbox: Arc<Inbox>,
    board: Arc<StatusBoard>,
    climate: ClimateInjector,
    topic_prefix: String,
    clock: MonotonicClock,
}

impl Console {
    pub fn new(
        inbox: Arc<Inbox>,
        board: Arc<StatusBoard>,
        climate: ClimateInjector,
        topic_prefix: impl Into<String>,
        clock: MonotonicClock,
    ) -> Self {
        Self {
            inbox,
            board,
            climate,
            topic_prefix: topic_prefix.into(),
            clock,
        }
    }

    pub fn execute(&self, line: ConsoleLine<'_>) -> Outcome {
        let now = self.clock.uptime_ms();
        let reply = match line {
            ConsoleLine::Http(body) => {
                let r = handle_control(body, now, &self.inbox);
                format!("{} {}", r.status, r.body)
            }
            ConsoleLine::Bus { topic, payload } => {
                let bridge = BusBridge::new(self.topic_prefix.as_str(), &self.inbox);
                if bridge.on_message(topic, payload, now) {
                    String::from("queued")
                } else {
                    String::from("ignored")
                }
            }
            ConsoleLine::Poll { status, body } => match decode_pull(status, body, now) {
                Ok(Some(cmd)) => match self.inbox.push(Inbound::Command(cmd)) {
                    Ok(()) => String::from("queued"),
                    Err(e) => format!("dropped: {e}"),
                },
                Ok(None) => String::from("nothing pending"),
                Err(e) => {
                    warn!("Poll response rejected: {}", e);
                    format!("rejected: {e}")
                }
            },
            ConsoleLine::Climate(Some((t, h))) => {
                self.climate.set(t, h);
                format!("climate {t} C {h} %")
            }
            ConsoleLine::Climate(None) => {
                self.climate.set_unavailable();
                String::from("climate unavailable")
            }
            ConsoleLine::Status => handle_data(&self.board).body,
            ConsoleLine::Quit => return Outcome::Quit,
        };
        Outcome::Reply(reply)
    }
}
