//! Inbound commands to the controller service.
//!
//! Every transport (HTTP control endpoint, message bus, backend command
//! pull) translates its wire payload into the one [`Command`] type below
//! and hands it to the
//! [`ControllerService`](super::service::ControllerService). Each
//! transport has its own vocabulary; all of them map onto [`CommandKind`].

use core::fmt;

use crate::app::context::Millis;
use crate::error::CommandError;

/// Longest raw payload kept for dedup comparison.
pub const RAW_PAYLOAD_CAP: usize = 32;

/// Raw payload text as received (truncated to [`RAW_PAYLOAD_CAP`]).
pub type RawPayload = heapless::String<RAW_PAYLOAD_CAP>;

/// Where a command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Local HTTP `/control` endpoint.
    Http,
    /// Publish/subscribe message feed.
    Bus,
    /// Backend command-pull response.
    Poll,
    /// Generated inside the controller (the decision that follows
    /// PestCleared).
    Internal,
}

impl Channel {
    pub const COUNT: usize = 4;
    pub const ALL: [Channel; Self::COUNT] = [Self::Http, Self::Bus, Self::Poll, Self::Internal];

    /// Dense index for per-channel tables.
    pub const fn index(self) -> usize {
        match self {
            Self::Http => 0,
            Self::Bus => 1,
            Self::Poll => 2,
            Self::Internal => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Bus => "bus",
            Self::Poll => "poll",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    WindowOpen,
    WindowClose,
    WindowToggle,
    /// Pest detected: close, spray, suspend automatic decisions.
    PestDetected,
    /// Pest cleared: resume automatic decisions.
    PestCleared,
    PumpOn,
    PumpOff,
}

impl CommandKind {
    /// The shared vocabulary every channel accepts (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "window_open" => Some(Self::WindowOpen),
            "window_close" => Some(Self::WindowClose),
            "window_toggle" => Some(Self::WindowToggle),
            "bug_on" => Some(Self::PestDetected),
            "bug_off" => Some(Self::PestCleared),
            "PUMP_ON" => Some(Self::PumpOn),
            "PUMP_OFF" => Some(Self::PumpOff),
            _ => None,
        }
    }

    /// Channel-specific names layered over the shared vocabulary.
    pub fn from_channel_name(channel: Channel, name: &str) -> Option<Self> {
        if let Some(kind) = Self::from_name(name) {
            return Some(kind);
        }
        match (channel, name) {
            // Legacy relay-style names on the control endpoint.
            (Channel::Http, "ON") => Some(Self::WindowClose),
            (Channel::Http, "OFF") => Some(Self::WindowOpen),
            // The pump topic carries the pest detector's verdict.
            (Channel::Bus, "ON") => Some(Self::PestDetected),
            (Channel::Bus, "OFF") => Some(Self::PestCleared),
            // Backend pull uses upper-case names.
            (Channel::Poll, "WINDOW_OPEN") => Some(Self::WindowOpen),
            (Channel::Poll, "WINDOW_CLOSE") => Some(Self::WindowClose),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::WindowOpen => "window_open",
            Self::WindowClose => "window_close",
            Self::WindowToggle => "window_toggle",
            Self::PestDetected => "bug_on",
            Self::PestCleared => "bug_off",
            Self::PumpOn => "PUMP_ON",
            Self::PumpOff => "PUMP_OFF",
        }
    }

    /// Manual window commands, honoured even in pest mode.
    pub fn is_window(self) -> bool {
        matches!(self, Self::WindowOpen | Self::WindowClose | Self::WindowToggle)
    }
}

/// A command tagged with its origin and arrival time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub channel: Channel,
    pub raw: RawPayload,
    pub received_at_ms: Millis,
}

impl Command {
    pub fn new(kind: CommandKind, channel: Channel, received_at_ms: Millis) -> Self {
        Self {
            kind,
            channel,
            raw: truncate_raw(kind.name()),
            received_at_ms,
        }
    }

    /// Decode a command name received on `channel`.
    pub fn from_wire(
        channel: Channel,
        name: &str,
        received_at_ms: Millis,
    ) -> Result<Self, CommandError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CommandError::Malformed("empty command"));
        }
        let kind =
            CommandKind::from_channel_name(channel, name).ok_or(CommandError::UnknownKind)?;
        Ok(Self {
            kind,
            channel,
            raw: truncate_raw(name),
            received_at_ms,
        })
    }
}

fn truncate_raw(s: &str) -> RawPayload {
    let mut raw = RawPayload::new();
    for c in s.chars() {
        if raw.push(c).is_err() {
            break;
        }
    }
    raw
}
