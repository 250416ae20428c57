//! Hardware adapter — bridges the actuator drivers to the domain port.
//!
//! Owns the window servo and the pump output and exposes them through
//! [`ActuatorPort`]. This is the only module in the system that touches
//! the actuator drivers.

use crate::app::context::WindowPosition;
use crate::app::ports::ActuatorPort;
use crate::drivers::pump::PumpDriver;
use crate::drivers::window::WindowServo;

/// Concrete adapter that combines all actuator hardware behind the port.
pub struct HardwareAdapter {
    servo: WindowServo,
    pump: PumpDriver,
}

impl HardwareAdapter {
    pub fn new(servo: WindowServo, pump: PumpDriver) -> Self {
        Self { servo, pump }
    }

    pub fn servo(&self) -> &WindowServo {
        &self.servo
    }

    pub fn pump(&self) -> &PumpDriver {
        &self.pump
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn move_window(&mut self, position: WindowPosition) {
        self.servo.set_position(position);
    }

    fn pump_on(&mut self) {
        self.pump.run();
    }

    fn pump_off(&mut self) {
        self.pump.stop();
    }
}
