//! Port traits — the hexagonal boundary between the controller core and
//! the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControllerService (domain)
//! ```
//!
//! Driven adapters (window servo, pump output, climate sensor, event
//! sinks) implement these traits. Exactly one implementation of each is
//! injected into the service at startup; the core never touches hardware
//! directly.

use crate::app::context::WindowPosition;
use crate::app::events::Effect;
use crate::sensors::ClimateReading;

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the core calls this only when a position or pump
/// state actually changes.
pub trait ActuatorPort {
    /// Drive the window to `position`.
    fn move_window(&mut self, position: WindowPosition);

    /// Energise the pump output.
    fn pump_on(&mut self);

    /// De-energise the pump output.
    fn pump_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Climate port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the local temperature/humidity sensor.
pub trait ClimatePort {
    /// Take one reading. Values the sensor could not produce are `None`.
    fn read_climate(&mut self) -> ClimateReading;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget notification hook for every [`Effect`].
pub trait EventSink {
    fn on_side_effect(&mut self, effect: &Effect);
}

/// Fan one effect out to two sinks.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn on_side_effect(&mut self, effect: &Effect) {
        self.0.on_side_effect(effect);
        self.1.on_side_effect(effect);
    }
}
