//! Monitor domain types
//!
//! Outcomes of a check cycle, the change-detection verdict, and the
//! alert payload handed to notifiers.

use serde::Serialize;
use std::fmt;

use crate::domain::{BolusRecord, Iob};

/// Terminal outcome of one check cycle
///
/// There is no fatal outcome: every failure path resolves to `Retry` or
/// to a degraded `Success`. Rescheduling and backoff policy belong to
/// whoever drives the cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckOutcome {
    /// Cycle completed; state and alerts are up to date
    Success,
    /// Response was unusable this cycle; try again later
    Retry(RetryReason),
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Retry(reason) => write!(f, "RETRY ({})", reason),
        }
    }
}

/// Reason code attached to a Retry outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RetryReason {
    /// Treatments fetch failed (timeout, connection error, non-200)
    FetchFailed,
    /// Treatments fetch returned an empty body
    EmptyBody,
    /// Body was non-empty but zero records could be extracted
    NoRecords,
}

impl fmt::Display for RetryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed => write!(f, "fetch_failed"),
            Self::EmptyBody => write!(f, "empty_body"),
            Self::NoRecords => write!(f, "no_records"),
        }
    }
}

/// Verdict of comparing a fresh window against the stored one
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    /// The fresh window holds no records; nothing can be decided
    Unusable,
    /// Windows are identical; no new bolus
    Unchanged,
    /// Windows differ but the most recent entry is the same (or missing)
    TailChanged,
    /// The most recent entry changed but could not be parsed
    Malformed,
    /// A new most-recent bolus was found
    NewBolus(BolusRecord),
}

/// Payload for a fired alert
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BolusAlert {
    /// The newly detected bolus
    pub record: BolusRecord,
    /// Insulin on board at alert time (zero if unavailable)
    pub iob: Iob,
}

impl BolusAlert {
    /// Create an alert payload
    pub fn new(record: BolusRecord, iob: Iob) -> Self {
        Self { record, iob }
    }

    /// Alert title carrying the dose
    pub fn title(&self) -> String {
        format!("NEW BOLUS: {:.1}U", self.record.units)
    }

    /// Alert body carrying administration time and IOB
    pub fn body(&self) -> String {
        format!("Time: {}, IOB: {}", self.record.local_time(), self.iob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_display() {
        assert_eq!(CheckOutcome::Success.to_string(), "SUCCESS");
        assert_eq!(
            CheckOutcome::Retry(RetryReason::NoRecords).to_string(),
            "RETRY (no_records)"
        );
    }

    #[test]
    fn test_alert_title_one_decimal() {
        let alert = BolusAlert::new(
            BolusRecord {
                timestamp_ms: 1000,
                units: 3.5,
            },
            Iob::new(2.25),
        );
        assert_eq!(alert.title(), "NEW BOLUS: 3.5U");
        assert!(alert.body().contains("IOB: 2.2U"));
    }

    #[test]
    fn test_alert_title_rounds_dose() {
        let alert = BolusAlert::new(
            BolusRecord {
                timestamp_ms: 1000,
                units: 2.0,
            },
            Iob::ZERO,
        );
        assert_eq!(alert.title(), "NEW BOLUS: 2.0U");
    }
}
