//! Application core — command arbitration and ventilation decisions, zero I/O.
//!
//! This module contains the business rules for the SmartWindow
//! controller: per-channel dedup, pest-mode precedence, the Decision Rule
//! and the timed pump cycle. All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod context;
pub mod events;
pub mod ports;
pub mod service;
pub mod status;
