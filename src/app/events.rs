//! Outbound side effects.
//!
//! The [`ControllerService`](super::service::ControllerService) reports
//! every observable change through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them: log to the console, publish
//! telemetry, and so on. Nothing the sink does feeds back into the core.

use crate::app::commands::{Channel, CommandKind};
use crate::app::context::{Millis, WindowPosition};
use crate::control::pump_cycle::StopReason;

/// What caused a window or pump change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    /// An external or internal command.
    Command { channel: Channel, kind: CommandKind },
    /// The ventilation Decision Rule on a fresh sample.
    DecisionRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The window actuator was driven to a new position.
    WindowMoved {
        from: WindowPosition,
        to: WindowPosition,
        cause: Cause,
    },

    /// The pump cycle started.
    PumpStarted { at_ms: Millis, cause: Cause },

    /// The pump cycle ended.
    PumpStopped { reason: StopReason, ran_ms: Millis },

    /// Pest mode was entered or left.
    PestModeChanged { active: bool },

    /// The controller has started (carries the initial window position).
    Started(WindowPosition),
}
