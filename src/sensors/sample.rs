//! Environmental sample — the immutable reading set the Decision Rule
//! consumes.
//!
//! Temperature and humidity come from the local climate sensor and may be
//! unknown; particulates arrive over the message bus. The discomfort index
//! is derived here and only here, so it can never be computed from a
//! partial reading.

use serde::{Deserialize, Serialize};

use crate::error::SensorError;

/// Temperature / humidity pair from the local climate sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateReading {
    /// Air temperature (°C), `None` if the sensor could not be read.
    pub temperature_c: Option<f32>,
    /// Relative humidity (%), `None` if the sensor could not be read.
    pub humidity_pct: Option<f32>,
}

impl ClimateReading {
    pub fn new(temperature_c: Option<f32>, humidity_pct: Option<f32>) -> Self {
        Self {
            temperature_c: temperature_c.filter(|t| t.is_finite()),
            humidity_pct: humidity_pct.filter(|h| h.is_finite()),
        }
    }

    /// Build from raw driver output where a failed read is NaN.
    pub fn from_raw(temperature_c: f32, humidity_pct: f32) -> Self {
        Self::new(Some(temperature_c), Some(humidity_pct))
    }

    /// Neither value could be read.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Both values, or `Unavailable` if either is missing.
    pub fn complete(&self) -> Result<(f32, f32), SensorError> {
        match (self.temperature_c, self.humidity_pct) {
            (Some(t), Some(h)) => Ok((t, h)),
            _ => Err(SensorError::Unavailable),
        }
    }
}

/// Latest particulate readings (µg/m³) and air-quality index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Particulates {
    pub pm25: f32,
    pub pm10: f32,
    pub aqi: Option<u16>,
}

/// Discomfort index from temperature (°C) and relative humidity (%).
pub fn discomfort_index(temperature_c: f32, humidity_pct: f32) -> f32 {
    0.81 * temperature_c + 0.01 * humidity_pct * (0.99 * temperature_c - 14.3) + 46.3
}

/// One wholesale environmental snapshot.
///
/// Fields are private: a sample is built once from a climate reading and
/// the particulate values and never edited afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentalSample {
    temperature_c: Option<f32>,
    humidity_pct: Option<f32>,
    pm25: f32,
    pm10: f32,
    aqi: Option<u16>,
    discomfort_index: Option<f32>,
}

impl EnvironmentalSample {
    pub fn new(climate: ClimateReading, particulates: Particulates) -> Self {
        let climate = ClimateReading::new(climate.temperature_c, climate.humidity_pct);
        let discomfort_index = climate
            .complete()
            .ok()
            .map(|(t, h)| discomfort_index(t, h));
        Self {
            temperature_c: climate.temperature_c,
            humidity_pct: climate.humidity_pct,
            pm25: particulates.pm25,
            pm10: particulates.pm10,
            aqi: particulates.aqi,
            discomfort_index,
        }
    }

    /// Shorthand used heavily by tests and the console transport.
    pub fn from_values(
        temperature_c: Option<f32>,
        humidity_pct: Option<f32>,
        pm25: f32,
        pm10: f32,
    ) -> Self {
        Self::new(
            ClimateReading::new(temperature_c, humidity_pct),
            Particulates {
                pm25,
                pm10,
                aqi: None,
            },
        )
    }

    pub fn temperature_c(&self) -> Option<f32> {
        self.temperature_c
    }

    pub fn humidity_pct(&self) -> Option<f32> {
        self.humidity_pct
    }

    pub fn pm25(&self) -> f32 {
        self.pm25
    }

    pub fn pm10(&self) -> f32 {
        self.pm10
    }

    pub fn aqi(&self) -> Option<u16> {
        self.aqi
    }

    /// Defined iff both temperature and humidity are known.
    pub fn discomfort_index(&self) -> Option<f32> {
        self.discomfort_index
    }
}
