//! Window servo driver.
//!
//! A hobby servo on a 50 Hz PWM output swings the window latch between
//! two fixed angles. The servo is only written when the target angle
//! differs from the last one written, so repeated requests never twitch
//! the mechanism.
//!
//! ## Host design
//!
//! The angle and the number of writes are tracked in memory.

use crate::app::context::WindowPosition;

/// Servo angle (degrees) for an open window.
pub const OPEN_ANGLE: u8 = 0;
/// Servo angle (degrees) for a closed window.
pub const CLOSED_ANGLE: u8 = 90;

pub const fn angle_for(position: WindowPosition) -> u8 {
    match position {
        WindowPosition::Open => OPEN_ANGLE,
        WindowPosition::Closed => CLOSED_ANGLE,
    }
}

pub struct WindowServo {
    angle: Option<u8>,
    writes: u32,
    pin: i32,
}

impl WindowServo {
    pub fn new(pin: i32) -> Self {
        Self {
            angle: None,
            writes: 0,
            pin,
        }
    }

    pub fn set_position(&mut self, position: WindowPosition) {
        self.write_angle(angle_for(position));
    }

    /// Write `angle` unless the servo already sits there.
    pub fn write_angle(&mut self, angle: u8) {
        if self.angle == Some(angle) {
            return;
        }
        log::debug!("Servo pin {} -> {} deg", self.pin, angle);
        self.angle = Some(angle);
        self.writes += 1;
    }

    /// Last angle written, `None` before the first write.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }

    pub fn position(&self) -> Option<WindowPosition> {
        match self.angle? {
            OPEN_ANGLE => Some(WindowPosition::Open),
            CLOSED_ANGLE => Some(WindowPosition::Closed),
            _ => None,
        }
    }

    pub fn write_count(&self) -> u32 {
        self.writes
    }
}
