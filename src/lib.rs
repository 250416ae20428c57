//! SmartWindow controller library.
//!
//! Arbitrates window and pump commands arriving over HTTP, a message bus
//! and a backend pull into one consistent actuator state, with pest-mode
//! precedence over the automatic air-quality Decision Rule. The binary
//! wires these modules to a console transport; everything is exposed
//! here for integration testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod events;
pub mod runtime;
pub mod sensors;
