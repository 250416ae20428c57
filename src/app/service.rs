//! Controller service — the hexagonal core.
//!
//! [`ControllerService`] owns the [`ControllerContext`] and the injected
//! ports. It arbitrates commands from every channel into one window/pump
//! state, applies pest-mode precedence over the Decision Rule and drives
//! the non-blocking pump cycle. Every operation is total: bad or
//! redundant input resolves to a logged no-op, never a panic.
//!
//! ```text
//!  Commands ───▶ ┌──────────────────────────────┐ ──▶ EventSink
//!  Samples  ───▶ │       ControllerService      │
//!  tick(now) ──▶ │ Dedup · Pest mode · Decision │ ──▶ ActuatorPort
//!                │          · Pump cycle        │ ──▶ StatusBoard
//!                └──────────────────────────────┘
//! ```

use std::sync::Arc;

use log::{debug, info};

use crate::config::ControllerConfig;
use crate::control::decision::decide_with;
use crate::control::pump_cycle::PumpStop;
use crate::sensors::EnvironmentalSample;

use super::commands::{Channel, Command, CommandKind};
use super::context::{ActuatorState, ControllerContext, Millis, WindowPosition};
use super::events::{Cause, Effect};
use super::ports::{ActuatorPort, EventSink};
use super::status::{StatusBoard, StatusSnapshot};

/// How an input was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// At least one observable change was made.
    Applied,
    /// Valid input, but state already matched; nothing was driven.
    NoChange,
    /// Identical to the previous command on the same channel; dropped.
    Duplicate,
}

// ───────────────────────────────────────────────────────────────
// ControllerService
// ───────────────────────────────────────────────────────────────

pub struct ControllerService<A: ActuatorPort, E: EventSink> {
    ctx: ControllerContext,
    actuators: A,
    sink: E,
    board: Option<Arc<StatusBoard>>,
}

impl<A: ActuatorPort, E: EventSink> ControllerService<A, E> {
    /// Construct the service with its injected ports.
    ///
    /// Does **not** drive any actuator; call [`start`](Self::start) next.
    pub fn new(config: &ControllerConfig, actuators: A, sink: E) -> Self {
        Self {
            ctx: ControllerContext::new(config),
            actuators,
            sink,
            board: None,
        }
    }

    /// Publish every completed apply/tick to `board`, starting with the
    /// configured initial state.
    #[must_use]
    pub fn with_status_board(mut self, board: Arc<StatusBoard>) -> Self {
        board.publish(self.status());
        self.board = Some(board);
        self
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the actuators to the initial state and publish it.
    pub fn start(&mut self) {
        self.actuators.move_window(self.ctx.window);
        self.actuators.pump_off();
        self.sink.on_side_effect(&Effect::Started(self.ctx.window));
        info!("Controller started, window {:?}", self.ctx.window);
        self.publish();
    }

    // ── Inputs ────────────────────────────────────────────────

    /// Apply one command. Commands are applied strictly in call order.
    pub fn submit_command(&mut self, cmd: Command) -> Disposition {
        let now = self.ctx.observe_time(cmd.received_at_ms);

        if !self.ctx.dedup.admit(&cmd) {
            debug!(
                "Duplicate {} on {} suppressed",
                cmd.raw.as_str(),
                cmd.channel
            );
            return Disposition::Duplicate;
        }

        info!("CMD {} ({:?}) via {}", cmd.raw.as_str(), cmd.kind, cmd.channel);
        let cause = Cause::Command {
            channel: cmd.channel,
            kind: cmd.kind,
        };

        let changed = match cmd.kind {
            CommandKind::WindowOpen => self.drive_window(WindowPosition::Open, cause),
            CommandKind::WindowClose => self.drive_window(WindowPosition::Closed, cause),
            // Resolved against the state at application time.
            CommandKind::WindowToggle => self.drive_window(self.ctx.window.toggled(), cause),
            CommandKind::PestDetected => {
                let mut changed = self.set_pest_mode(true);
                changed |= self.drive_window(WindowPosition::Closed, cause);
                changed |= self.start_pump(now, cause);
                changed
            }
            CommandKind::PestCleared => {
                let mut changed = self.set_pest_mode(false);
                // The follow-up decision is the next step in the same
                // sequence, applied before any later input.
                changed |= self.run_decision(Cause::Command {
                    channel: Channel::Internal,
                    kind: CommandKind::PestCleared,
                });
                changed
            }
            CommandKind::PumpOn => self.start_pump(now, cause),
            CommandKind::PumpOff => self.stop_pump(now),
        };

        self.publish();
        disposition(changed)
    }

    /// Replace the environmental sample and, outside pest mode, run the
    /// Decision Rule on it.
    pub fn submit_sensor_sample(&mut self, sample: EnvironmentalSample) -> Disposition {
        self.ctx.sample = Some(sample);
        let changed = if self.ctx.pest_mode {
            debug!("Pest mode active, sample stored without decision");
            false
        } else {
            self.run_decision(Cause::DecisionRule)
        };
        self.publish();
        disposition(changed)
    }

    /// Replace the environmental sample without deciding on it.
    ///
    /// Used when a command already moved the window in the same control
    /// pass; the next sample decides as usual.
    pub fn record_sensor_sample(&mut self, sample: EnvironmentalSample) -> Disposition {
        self.ctx.sample = Some(sample);
        debug!("Sample stored, decision deferred");
        self.publish();
        Disposition::NoChange
    }

    /// Advance the control clock and expire the pump cycle if due.
    pub fn tick(&mut self, now_ms: Millis) -> Disposition {
        let now = self.ctx.observe_time(now_ms);
        let changed = match self.ctx.pump.tick(now) {
            Some(stop) => {
                self.pump_stopped(stop);
                true
            }
            None => false,
        };
        self.publish();
        disposition(changed)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn read_actuator_state(&self) -> ActuatorState {
        self.ctx.actuator_state()
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            window: self.ctx.window,
            pump: self.ctx.pump.activity(),
            pest_mode: self.ctx.pest_mode,
            sample: self.ctx.sample,
            updated_at_ms: self.ctx.now_ms,
        }
    }

    pub fn pest_mode(&self) -> bool {
        self.ctx.pest_mode
    }

    pub fn latest_sample(&self) -> Option<EnvironmentalSample> {
        self.ctx.sample
    }

    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    // ── Internal ──────────────────────────────────────────────

    fn drive_window(&mut self, target: WindowPosition, cause: Cause) -> bool {
        let from = self.ctx.window;
        if from == target {
            debug!("Window already {:?}, skipping", target);
            return false;
        }
        self.actuators.move_window(target);
        self.ctx.window = target;
        info!("Window {:?} -> {:?} ({:?})", from, target, cause);
        self.sink.on_side_effect(&Effect::WindowMoved {
            from,
            to: target,
            cause,
        });
        true
    }

    fn run_decision(&mut self, cause: Cause) -> bool {
        if self.ctx.pest_mode {
            return false;
        }
        let Some(sample) = self.ctx.sample else {
            debug!("No sample yet, decision skipped");
            return false;
        };
        let target = decide_with(&self.ctx.thresholds, &sample);
        self.drive_window(target, cause)
    }

    fn set_pest_mode(&mut self, active: bool) -> bool {
        if self.ctx.pest_mode == active {
            return false;
        }
        self.ctx.pest_mode = active;
        info!("Pest mode {}", if active { "ON" } else { "OFF" });
        self.sink.on_side_effect(&Effect::PestModeChanged { active });
        true
    }

    fn start_pump(&mut self, now: Millis, cause: Cause) -> bool {
        if !self.ctx.pump.start(now) {
            debug!("Pump already active, start ignored");
            return false;
        }
        self.actuators.pump_on();
        info!("Pump ON for {} ms", self.ctx.pump.duration_ms());
        self.sink
            .on_side_effect(&Effect::PumpStarted { at_ms: now, cause });
        true
    }

    fn stop_pump(&mut self, now: Millis) -> bool {
        match self.ctx.pump.stop(now) {
            Some(stop) => {
                self.pump_stopped(stop);
                true
            }
            None => {
                debug!("Pump already idle, stop ignored");
                false
            }
        }
    }

    fn pump_stopped(&mut self, stop: PumpStop) {
        self.actuators.pump_off();
        info!("Pump OFF after {} ms ({:?})", stop.ran_ms, stop.reason);
        self.sink.on_side_effect(&Effect::PumpStopped {
            reason: stop.reason,
            ran_ms: stop.ran_ms,
        });
    }

    fn publish(&self) {
        if let Some(board) = &self.board {
            board.publish(self.status());
        }
    }
}

fn disposition(changed: bool) -> Disposition {
    if changed {
        Disposition::Applied
    } else {
        Disposition::NoChange
    }
}
