//! Explicitly owned controller state.
//!
//! `ControllerContext` holds everything the control loop mutates: the
//! actuator record, the pest-mode override flag, the per-channel dedup
//! memory, the pump cycle and the most recent environmental sample. It is
//! owned by [`ControllerService`](super::service::ControllerService) and
//! never shared, so none of it needs a lock.

use serde::{Deserialize, Serialize};

use crate::config::ControllerConfig;
use crate::control::decision::DecisionThresholds;
use crate::control::dedup::DedupWindow;
use crate::control::pump_cycle::PumpCycle;
use crate::sensors::EnvironmentalSample;

/// Milliseconds on the controller's monotonic clock.
pub type Millis = u64;

// ---------------------------------------------------------------------------
// Actuator state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPosition {
    Open,
    Closed,
}

impl WindowPosition {
    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpActivity {
    Idle,
    Active { since_ms: Millis },
}

impl PumpActivity {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// The authoritative window + pump record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorState {
    pub window: WindowPosition,
    pub pump: PumpActivity,
}

// ---------------------------------------------------------------------------
// ControllerContext
// ---------------------------------------------------------------------------

pub struct ControllerContext {
    // -- Actuators --
    /// Current window position.
    pub window: WindowPosition,
    /// Timed pump activation; owns the pump half of the actuator state.
    pub pump: PumpCycle,

    // -- Arbitration --
    /// Pest-detected mode. While set the Decision Rule is not consulted.
    pub pest_mode: bool,
    /// Last accepted command per channel.
    pub dedup: DedupWindow,

    // -- Sensor data --
    /// Latest environmental sample, replaced wholesale.
    pub sample: Option<EnvironmentalSample>,

    // -- Decision --
    pub thresholds: DecisionThresholds,

    // -- Timing --
    /// Latest time seen by the control loop (ticks and command stamps).
    pub now_ms: Millis,
}

impl ControllerContext {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            window: config.initial_window,
            pump: PumpCycle::new(config.pump_duration_ms),
            pest_mode: false,
            dedup: DedupWindow::new(config.dedup_hold_ms),
            sample: None,
            thresholds: DecisionThresholds::from_config(config),
            now_ms: 0,
        }
    }

    /// Consistent window + pump pair.
    pub fn actuator_state(&self) -> ActuatorState {
        ActuatorState {
            window: self.window,
            pump: self.pump.activity(),
        }
    }

    /// Advance the control clock; it never moves backwards.
    pub fn observe_time(&mut self, at_ms: Millis) -> Millis {
        self.now_ms = self.now_ms.max(at_ms);
        self.now_ms
    }
}
