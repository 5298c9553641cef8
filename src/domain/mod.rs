//! Domain models with validation
//!
//! Core value types for bolus monitoring: records, the rolling window,
//! and insulin-on-board readings.

pub mod bolus;
pub mod iob;

pub use bolus::{BolusRecord, BolusWindow, WINDOW_CAP};
pub use iob::Iob;
