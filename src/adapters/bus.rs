//! Message-bus boundary.
//!
//! The bus client subscribes to four topics under a configurable prefix:
//!
//! | Topic             | Payload            | Becomes                        |
//! |-------------------|--------------------|--------------------------------|
//! | `<prefix>/pump`   | `ON` / `OFF` / cmd | [`Inbound::Command`] (Bus)     |
//! | `<prefix>/pm25`   | decimal number     | [`ParticulateUpdate::Pm25`]    |
//! | `<prefix>/pm10`   | decimal number     | [`ParticulateUpdate::Pm10`]    |
//! | `<prefix>/aqi`    | integer            | [`ParticulateUpdate::Aqi`]     |
//!
//! The client callback calls [`BusBridge::on_message`], which translates
//! and enqueues without blocking.

use log::{debug, warn};

use crate::app::commands::{Channel, Command};
use crate::app::context::Millis;
use crate::error::{CommandError, QueueError};
use crate::events::{Inbound, Inbox};
use crate::sensors::ParticulateUpdate;

const TOPICS: [&str; 4] = ["pump", "pm25", "pm10", "aqi"];

/// Full topic names to subscribe to.
pub fn subscriptions(prefix: &str) -> Vec<String> {
    TOPICS.iter().map(|t| format!("{prefix}/{t}")).collect()
}

/// Translate one bus delivery. `Ok(None)` means the topic is not ours.
pub fn translate(
    prefix: &str,
    topic: &str,
    payload: &str,
    at_ms: Millis,
) -> Result<Option<Inbound>, CommandError> {
    let Some(leaf) = topic
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
    else {
        return Ok(None);
    };
    let payload = payload.trim();
    let inbound = match leaf {
        "pump" => Inbound::Command(Command::from_wire(Channel::Bus, payload, at_ms)?),
        "pm25" => Inbound::Particulate(ParticulateUpdate::Pm25(parse_level(payload)?)),
        "pm10" => Inbound::Particulate(ParticulateUpdate::Pm10(parse_level(payload)?)),
        "aqi" => Inbound::Particulate(ParticulateUpdate::Aqi(
            payload
                .parse()
                .map_err(|_| CommandError::Malformed("bad aqi"))?,
        )),
        other => {
            debug!("Ignoring bus topic {}/{}", prefix, other);
            return Ok(None);
        }
    };
    Ok(Some(inbound))
}

fn parse_level(payload: &str) -> Result<f32, CommandError> {
    payload
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(CommandError::Malformed("bad number"))
}

/// Binds the topic prefix to the inbox for the client callback.
pub struct BusBridge<'a> {
    prefix: String,
    inbox: &'a Inbox,
}

impl<'a> BusBridge<'a> {
    pub fn new(prefix: impl Into<String>, inbox: &'a Inbox) -> Self {
        Self {
            prefix: prefix.into(),
            inbox,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Handle one delivery. Returns `true` if something was enqueued.
    pub fn on_message(&self, topic: &str, payload: &str, at_ms: Millis) -> bool {
        match translate(&self.prefix, topic, payload, at_ms) {
            Ok(Some(item)) => match self.inbox.push(item) {
                Ok(()) => true,
                Err(QueueError::Full) => false,
            },
            Ok(None) => false,
            Err(e) => {
                warn!("Bus {} rejected: {}", topic, e);
                false
            }
        }
    }
}
