//! Bolus change detection and alerting
//!
//! The detector compares serialized bolus windows; the notifier renders
//! qualifying new boluses on the single reusable alert channel.

pub mod detector;
pub mod notifier;
pub mod types;

pub use detector::detect;
pub use notifier::{AlertChannel, Notifier, TerminalNotifier};
pub use types::{BolusAlert, CheckOutcome, Detection, RetryReason};
