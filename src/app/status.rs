//! Published status snapshot for the query side (`/data` endpoint).
//!
//! The control loop publishes a complete [`StatusSnapshot`] after every
//! apply/tick; readers on other threads copy it out under a short
//! critical section. A reader therefore always sees one consistent
//! window + pump pair and never blocks the control loop for longer than
//! a copy.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::app::context::{ActuatorState, Millis, PumpActivity, WindowPosition};
use crate::sensors::EnvironmentalSample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    pub window: WindowPosition,
    pub pump: PumpActivity,
    pub pest_mode: bool,
    /// Latest sample seen by the controller, if any.
    pub sample: Option<EnvironmentalSample>,
    /// Control-clock time of the last completed apply/tick.
    pub updated_at_ms: Millis,
}

impl StatusSnapshot {
    pub const INITIAL: Self = Self {
        window: WindowPosition::Open,
        pump: PumpActivity::Idle,
        pest_mode: false,
        sample: None,
        updated_at_ms: 0,
    };

    pub fn actuators(&self) -> ActuatorState {
        ActuatorState {
            window: self.window,
            pump: self.pump,
        }
    }
}

pub struct StatusBoard {
    inner: Mutex<CriticalSectionRawMutex, Cell<StatusSnapshot>>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(StatusSnapshot::INITIAL)),
        }
    }

    pub fn publish(&self, snapshot: StatusSnapshot) {
        self.inner.lock(|cell| cell.set(snapshot));
    }

    pub fn read(&self) -> StatusSnapshot {
        self.inner.lock(Cell::get)
    }

    pub fn read_actuator_state(&self) -> ActuatorState {
        self.read().actuators()
    }
}
