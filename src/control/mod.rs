//! Control primitives used by the controller service: the ventilation
//! Decision Rule, per-channel duplicate suppression and the timed pump
//! cycle.

pub mod decision;
pub mod dedup;
pub mod pump_cycle;
