//! Water pump output driver (single GPIO, active high).
//!
//! The pump is a plain on/off load switched through a MOSFET; timing of
//! the spray cycle lives in the control core, this driver only switches
//! the output.
//!
//! ## Host design
//!
//! The output level is tracked in memory; every edge is counted so tests
//! and the console can see how often the load was switched.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running,
}

pub struct PumpDriver {
    state: PumpState,
    gpio: i32,
    switch_count: u32,
}

impl PumpDriver {
    pub fn new(gpio: i32) -> Self {
        Self {
            state: PumpState::Stopped,
            gpio,
            switch_count: 0,
        }
    }

    pub fn run(&mut self) {
        self.write_level(true);
        self.state = PumpState::Running;
    }

    pub fn stop(&mut self) {
        self.write_level(false);
        self.state = PumpState::Stopped;
    }

    fn write_level(&mut self, high: bool) {
        let was_high = matches!(self.state, PumpState::Running);
        if was_high != high {
            self.switch_count += 1;
            log::debug!("GPIO{} -> {}", self.gpio, if high { "HIGH" } else { "LOW" });
        }
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PumpState::Running)
    }

    /// Output edges since construction.
    pub fn switch_count(&self) -> u32 {
        self.switch_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_and_stop_count_edges() {
        let mut pump = PumpDriver::new(33);
        pump.stop();
        assert_eq!(pump.switch_count(), 0);
        pump.run();
        pump.run();
        assert!(pump.is_running());
        pump.stop();
        assert_eq!(pump.state(), PumpState::Stopped);
        assert_eq!(pump.switch_count(), 2);
    }
}
