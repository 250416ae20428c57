//! Non-blocking timed pump activation.
//!
//! `start` stamps the activation time; `tick` compares elapsed time
//! against the fixed duration each control cycle and reports the stop
//! exactly once. Nothing here sleeps, so the control loop keeps draining
//! commands while the pump runs.

use crate::app::context::{Millis, PumpActivity};

/// Why the pump stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The activation ran its full duration.
    Expired,
    /// An explicit pump-off command arrived.
    Commanded,
}

/// Emitted when an active pump transitions to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpStop {
    pub reason: StopReason,
    /// How long the pump actually ran.
    pub ran_ms: Millis,
}

#[derive(Debug, Clone)]
pub struct PumpCycle {
    duration_ms: Millis,
    activity: PumpActivity,
}

impl PumpCycle {
    pub fn new(duration_ms: Millis) -> Self {
        Self {
            duration_ms,
            activity: PumpActivity::Idle,
        }
    }

    /// Begin an activation. Returns `false` (and changes nothing) if the
    /// pump is already running: the timer is neither restarted nor extended.
    pub fn start(&mut self, now_ms: Millis) -> bool {
        if self.activity.is_active() {
            return false;
        }
        self.activity = PumpActivity::Active { since_ms: now_ms };
        true
    }

    /// Expire the activation once its duration has elapsed.
    pub fn tick(&mut self, now_ms: Millis) -> Option<PumpStop> {
        let PumpActivity::Active { since_ms } = self.activity else {
            return None;
        };
        let ran_ms = now_ms.saturating_sub(since_ms);
        if ran_ms < self.duration_ms {
            return None;
        }
        self.activity = PumpActivity::Idle;
        Some(PumpStop {
            reason: StopReason::Expired,
            ran_ms,
        })
    }

    /// Immediate stop. `None` if the pump was already idle.
    pub fn stop(&mut self, now_ms: Millis) -> Option<PumpStop> {
        let PumpActivity::Active { since_ms } = self.activity else {
            return None;
        };
        self.activity = PumpActivity::Idle;
        Some(PumpStop {
            reason: StopReason::Commanded,
            ran_ms: now_ms.saturating_sub(since_ms),
        })
    }

    pub fn activity(&self) -> PumpActivity {
        self.activity
    }

    pub fn is_active(&self) -> bool {
        self.activity.is_active()
    }

    pub fn duration_ms(&self) -> Millis {
        self.duration_ms
    }
}
