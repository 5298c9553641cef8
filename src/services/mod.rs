//! Business logic services
//!
//! The monitor service runs one full check cycle; commands drive it once
//! or in a loop.

pub mod monitor_service;

pub use monitor_service::MonitorService;
