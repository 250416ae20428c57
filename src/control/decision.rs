//! Ventilation Decision Rule.
//!
//! Maps an [`EnvironmentalSample`] to the window position the room wants.
//! First match wins:
//!
//! 1. PM2.5 or PM10 above its limit, or not a number → `Closed` (air
//!    outside is worse, or cannot be trusted).
//! 2. Discomfort index known and below the comfort limit → `Closed`.
//! 3. Otherwise → `Open`.
//!
//! With an unknown temperature or humidity, rule 2 is skipped; the
//! configured [`DegradedPolicy`] decides whether that still ventilates.

use crate::app::context::WindowPosition;
use crate::config::{ControllerConfig, DegradedPolicy};
use crate::sensors::EnvironmentalSample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionThresholds {
    pub pm25_limit: f32,
    pub pm10_limit: f32,
    pub comfort_di_limit: f32,
    pub degraded: DegradedPolicy,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            pm25_limit: 35.0,
            pm10_limit: 80.0,
            comfort_di_limit: 76.0,
            degraded: DegradedPolicy::Ventilate,
        }
    }
}

impl DecisionThresholds {
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            pm25_limit: config.pm25_limit,
            pm10_limit: config.pm10_limit,
            comfort_di_limit: config.comfort_di_limit,
            degraded: config.degraded_policy,
        }
    }
}

/// Decide with the stock thresholds.
pub fn decide(sample: &EnvironmentalSample) -> WindowPosition {
    decide_with(&DecisionThresholds::default(), sample)
}

/// Decide with explicit thresholds.
pub fn decide_with(th: &DecisionThresholds, sample: &EnvironmentalSample) -> WindowPosition {
    if exceeds(sample.pm25(), th.pm25_limit) || exceeds(sample.pm10(), th.pm10_limit) {
        return WindowPosition::Closed;
    }
    match sample.discomfort_index() {
        Some(di) if di < th.comfort_di_limit => WindowPosition::Closed,
        Some(_) => WindowPosition::Open,
        None => match th.degraded {
            DegradedPolicy::Ventilate => WindowPosition::Open,
            DegradedPolicy::HoldClosed => WindowPosition::Closed,
        },
    }
}

// NaN compares false against everything; count it as over the limit.
fn exceeds(level: f32, limit: f32) -> bool {
    level.is_nan() || level > limit
}
