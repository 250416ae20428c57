//! Mock adapters for integration tests.
//!
//! Records every actuator call and every side effect so tests can assert
//! on the full history without touching real GPIO/PWM.

use smartwindow::app::context::WindowPosition;
use smartwindow::app::events::Effect;
use smartwindow::app::ports::{ActuatorPort, ClimatePort, EventSink};
use smartwindow::sensors::ClimateReading;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    MoveWindow(WindowPosition),
    PumpOn,
    PumpOff,
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_moves(&self) -> Vec<WindowPosition> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::MoveWindow(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn pump_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::PumpOn => Some(true),
                ActuatorCall::PumpOff => Some(false),
                ActuatorCall::MoveWindow(_) => None,
            })
            .unwrap_or(false)
    }
}

impl ActuatorPort for MockHardware {
    fn move_window(&mut self, position: WindowPosition) {
        self.calls.push(ActuatorCall::MoveWindow(position));
    }

    fn pump_on(&mut self) {
        self.calls.push(ActuatorCall::PumpOn);
    }

    fn pump_off(&mut self) {
        self.calls.push(ActuatorCall::PumpOff);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub effects: Vec<Effect>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn window_moves(&self) -> usize {
        self.effects
            .iter()
            .filter(|e| matches!(e, Effect::WindowMoved { .. }))
            .count()
    }

    pub fn pump_stops(&self) -> usize {
        self.effects
            .iter()
            .filter(|e| matches!(e, Effect::PumpStopped { .. }))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn on_side_effect(&mut self, effect: &Effect) {
        self.effects.push(*effect);
    }
}

// ── ScriptedClimate ───────────────────────────────────────────

/// Returns the same reading every time until changed.
pub struct ScriptedClimate {
    pub reading: ClimateReading,
}

#[allow(dead_code)]
impl ScriptedClimate {
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            reading: ClimateReading::from_raw(temperature_c, humidity_pct),
        }
    }

    pub fn failed() -> Self {
        Self {
            reading: ClimateReading::unavailable(),
        }
    }
}

impl ClimatePort for ScriptedClimate {
    fn read_climate(&mut self) -> ClimateReading {
        self.reading
    }
}
