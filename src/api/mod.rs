//! Upstream API abstraction layer
//!
//! Wraps the loopback uploader's HTTP endpoints behind a trait so the
//! monitor can be tested against mock sources.

pub mod client;
pub mod traits;

pub use client::HttpSource;
pub use traits::TreatmentSource;
