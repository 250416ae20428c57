//! Per-channel duplicate suppression.
//!
//! Remembers the last accepted command identity (kind + raw payload) for
//! each channel. A command identical to the one immediately before it on
//! the same channel is dropped; the same command on a different channel
//! is unaffected.

use crate::app::commands::{Channel, Command, CommandKind, RawPayload};
use crate::app::context::Millis;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Seen {
    kind: CommandKind,
    raw: RawPayload,
    at_ms: Millis,
}

#[derive(Debug, Clone)]
pub struct DedupWindow {
    last: [Option<Seen>; Channel::COUNT],
    /// Optional hold time; `None` suppresses repeats indefinitely.
    hold_ms: Option<Millis>,
}

impl DedupWindow {
    pub fn new(hold_ms: Option<Millis>) -> Self {
        Self {
            last: [None, None, None, None],
            hold_ms,
        }
    }

    /// Returns `true` if `cmd` repeats the previous accepted command on its
    /// channel.
    pub fn is_duplicate(&self, cmd: &Command) -> bool {
        let Some(prev) = &self.last[cmd.channel.index()] else {
            return false;
        };
        if prev.kind != cmd.kind || prev.raw != cmd.raw {
            return false;
        }
        match self.hold_ms {
            None => true,
            Some(hold) => cmd.received_at_ms.saturating_sub(prev.at_ms) < hold,
        }
    }

    /// Record `cmd` as the latest accepted command on its channel.
    pub fn accept(&mut self, cmd: &Command) {
        self.last[cmd.channel.index()] = Some(Seen {
            kind: cmd.kind,
            raw: cmd.raw.clone(),
            at_ms: cmd.received_at_ms,
        });
    }

    /// Check and record in one step. Returns `true` if `cmd` was new.
    pub fn admit(&mut self, cmd: &Command) -> bool {
        if self.is_duplicate(cmd) {
            return false;
        }
        self.accept(cmd);
        true
    }
}
