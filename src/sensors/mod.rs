//! Sensor subsystem — the sample type and the aggregating [`SampleAssembler`].
//!
//! Temperature and humidity are read locally each sampling period;
//! particulate values arrive asynchronously over the message bus. The
//! assembler keeps the latest particulates and combines them with a fresh
//! climate reading into one wholesale [`EnvironmentalSample`].

pub mod climate;
pub mod sample;

use log::debug;

pub use sample::{ClimateReading, EnvironmentalSample, Particulates, discomfort_index};

/// A single particulate value delivered by the bus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticulateUpdate {
    Pm25(f32),
    Pm10(f32),
    Aqi(u16),
}

/// Aggregates bus-delivered particulates with local climate readings.
#[derive(Debug, Default)]
pub struct SampleAssembler {
    particulates: Particulates,
}

impl SampleAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a particulate value. Non-finite values are ignored so a bad
    /// delivery never clobbers the last good one.
    pub fn apply(&mut self, update: ParticulateUpdate) {
        match update {
            ParticulateUpdate::Pm25(v) if v.is_finite() => self.particulates.pm25 = v,
            ParticulateUpdate::Pm10(v) if v.is_finite() => self.particulates.pm10 = v,
            ParticulateUpdate::Aqi(v) => self.particulates.aqi = Some(v),
            other => debug!("Ignoring non-finite particulate update {:?}", other),
        }
    }

    /// Build this period's sample. The climate reading is taken as-is:
    /// an unreadable value stays unknown rather than reusing an old one.
    pub fn assemble(&self, climate: ClimateReading) -> EnvironmentalSample {
        EnvironmentalSample::new(climate, self.particulates)
    }

    pub fn particulates(&self) -> Particulates {
        self.particulates
    }
}
