//! Actuator drivers and pin assignments.

pub mod pump;
pub mod window;

/// Window servo PWM pin.
pub const WINDOW_SERVO_PIN: i32 = 25;
/// Water pump MOSFET gate.
pub const WATER_PUMP_GPIO: i32 = 33;
