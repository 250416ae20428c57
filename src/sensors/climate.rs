//! SHT31 temperature / humidity sensor.
//!
//! ## Host design
//!
//! Readings come from a [`ClimateInjector`] shared with whoever simulates
//! the room (tests, the console transport). A NaN stored there reads as
//! an unavailable value, exactly like a failed I2C transaction.

use core::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::app::ports::ClimatePort;

use super::ClimateReading;

#[derive(Debug)]
struct Cells {
    temperature_bits: AtomicU32,
    humidity_bits: AtomicU32,
    reads: AtomicU32,
}

/// Cloneable handle for injecting simulated readings.
#[derive(Debug, Clone)]
pub struct ClimateInjector {
    cells: Arc<Cells>,
}

impl ClimateInjector {
    /// Store raw values; NaN means "sensor failed".
    pub fn set(&self, temperature_c: f32, humidity_pct: f32) {
        self.cells
            .temperature_bits
            .store(temperature_c.to_bits(), Ordering::Relaxed);
        self.cells
            .humidity_bits
            .store(humidity_pct.to_bits(), Ordering::Relaxed);
    }

    pub fn set_unavailable(&self) {
        self.set(f32::NAN, f32::NAN);
    }

    /// Number of reads taken by the sensor so far.
    pub fn read_count(&self) -> u32 {
        self.cells.reads.load(Ordering::Relaxed)
    }
}

pub struct ClimateSensor {
    cells: Arc<Cells>,
    i2c_addr: u8,
}

impl ClimateSensor {
    /// Default SHT31 address with ADDR pulled low.
    pub const DEFAULT_ADDR: u8 = 0x44;

    /// New sensor that reads as unavailable until a value is injected.
    pub fn new(i2c_addr: u8) -> Self {
        Self {
            cells: Arc::new(Cells {
                temperature_bits: AtomicU32::new(f32::NAN.to_bits()),
                humidity_bits: AtomicU32::new(f32::NAN.to_bits()),
                reads: AtomicU32::new(0),
            }),
            i2c_addr,
        }
    }

    pub fn injector(&self) -> ClimateInjector {
        ClimateInjector {
            cells: Arc::clone(&self.cells),
        }
    }

    pub fn address(&self) -> u8 {
        self.i2c_addr
    }

    pub fn read(&self) -> ClimateReading {
        self.cells.reads.fetch_add(1, Ordering::Relaxed);
        let t = f32::from_bits(self.cells.temperature_bits.load(Ordering::Relaxed));
        let h = f32::from_bits(self.cells.humidity_bits.load(Ordering::Relaxed));
        ClimateReading::from_raw(t, h)
    }
}

impl ClimatePort for ClimateSensor {
    fn read_climate(&mut self) -> ClimateReading {
        self.read()
    }
}
