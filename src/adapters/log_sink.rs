//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every controller [`Effect`] to the
//! `log` facade (stderr via `env_logger` in the binary). A telemetry
//! publisher would implement the same trait.

use log::info;

use crate::app::events::{Cause, Effect};
use crate::app::ports::EventSink;

/// Adapter that logs every [`Effect`] as one line.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn cause_label(cause: &Cause) -> String {
    match cause {
        Cause::Command { channel, kind } => format!("{}:{}", channel, kind.name()),
        Cause::DecisionRule => String::from("decision"),
    }
}

impl EventSink for LogEventSink {
    fn on_side_effect(&mut self, effect: &Effect) {
        match effect {
            Effect::WindowMoved { from, to, cause } => {
                info!("WINDOW | {:?} -> {:?} | cause={}", from, to, cause_label(cause));
            }
            Effect::PumpStarted { at_ms, cause } => {
                info!("PUMP | on at {}ms | cause={}", at_ms, cause_label(cause));
            }
            Effect::PumpStopped { reason, ran_ms } => {
                info!("PUMP | off after {}ms | reason={:?}", ran_ms, reason);
            }
            Effect::PestModeChanged { active } => {
                info!("PEST | mode={}", if *active { "ON" } else { "OFF" });
            }
            Effect::Started(window) => {
                info!("START | window={:?}", window);
            }
        }
    }
}
