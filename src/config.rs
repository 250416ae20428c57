//! Controller configuration parameters
//!
//! All tunable parameters for the SmartWindow controller. The binary
//! loads an optional JSON file over these defaults; any field left out
//! keeps its default value.

use serde::{Deserialize, Serialize};

use crate::app::context::WindowPosition;
use crate::error::{Error, Result};

/// What the Decision Rule does when temperature or humidity is unknown
/// and particulates are within limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedPolicy {
    /// Fall through to Open, as the device always has.
    Ventilate,
    /// Keep the window closed until comfort can be judged again.
    HoldClosed,
}

/// Core controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // --- Decision thresholds ---
    /// PM2.5 above this (µg/m³) closes the window.
    pub pm25_limit: f32,
    /// PM10 above this (µg/m³) closes the window.
    pub pm10_limit: f32,
    /// Discomfort index below this means the room is comfortable.
    pub comfort_di_limit: f32,
    /// Behaviour when the discomfort index cannot be computed.
    pub degraded_policy: DegradedPolicy,

    // --- Pump ---
    /// Fixed pump activation length (milliseconds).
    pub pump_duration_ms: u64,

    // --- Window ---
    /// Position assumed and driven at startup.
    pub initial_window: WindowPosition,

    // --- Dedup ---
    /// If set, an identical repeat on the same channel is only suppressed
    /// when it arrives within this many milliseconds of the previous one.
    pub dedup_hold_ms: Option<u64>,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u64,
    /// Environmental sampling period (milliseconds).
    pub sample_period_ms: u64,

    // --- Transport ---
    /// Message-bus topic prefix (`<prefix>/pump`, `<prefix>/pm25`, ...).
    pub topic_prefix: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            pm25_limit: 35.0,
            pm10_limit: 80.0,
            comfort_di_limit: 76.0,
            degraded_policy: DegradedPolicy::Ventilate,

            // Pump
            pump_duration_ms: 3000,

            // Window
            initial_window: WindowPosition::Open,

            // Dedup
            dedup_hold_ms: None,

            // Timing
            control_loop_interval_ms: 200, // 5 Hz
            sample_period_ms: 1000,        // 1 Hz

            // Transport
            topic_prefix: String::from("s_window"),
        }
    }
}

impl ControllerConfig {
    /// Reject values the control loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.pm25_limit.is_finite() && self.pm25_limit >= 0.0) {
            return Err(Error::Config("pm25_limit must be a non-negative number"));
        }
        if !(self.pm10_limit.is_finite() && self.pm10_limit >= 0.0) {
            return Err(Error::Config("pm10_limit must be a non-negative number"));
        }
        if !self.comfort_di_limit.is_finite() {
            return Err(Error::Config("comfort_di_limit must be a number"));
        }
        if self.pump_duration_ms == 0 {
            return Err(Error::Config("pump_duration_ms must be > 0"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be > 0"));
        }
        if self.sample_period_ms == 0 {
            return Err(Error::Config("sample_period_ms must be > 0"));
        }
        if self.topic_prefix.is_empty() {
            return Err(Error::Config("topic_prefix must not be empty"));
        }
        Ok(())
    }
}
