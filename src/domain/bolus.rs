//! Bolus domain types
//!
//! A bolus is a discrete insulin dose event with a timestamp and a unit
//! amount. The monitor keeps a rolling window of the most recent boluses,
//! canonically represented as a delimited string so that two windows can
//! be compared with a single string comparison.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of records kept in a [`BolusWindow`]
pub const WINDOW_CAP: usize = 5;

/// Delimiter between records in a serialized window
const RECORD_SEP: char = '|';

/// Delimiter between the fields of a record
const FIELD_SEP: char = ',';

/// A single insulin bolus event
///
/// Immutable once parsed. `units` is never negative: entries are only
/// produced from unsigned numeric text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BolusRecord {
    /// Administration time, milliseconds since the Unix epoch
    pub timestamp_ms: u64,
    /// Dose in insulin units
    pub units: f64,
}

impl BolusRecord {
    /// Parse a serialized window entry of the form `timestamp,units`.
    ///
    /// Entries need at least two comma-separated fields; extra fields are
    /// ignored. Returns `None` on any malformed field, matching the
    /// swallow-and-continue contract of the change detector.
    pub fn parse_entry(entry: &str) -> Option<Self> {
        let mut parts = entry.split(FIELD_SEP);
        let timestamp_ms: u64 = parts.next()?.parse().ok()?;
        let units: f64 = parts.next()?.parse().ok()?;
        if units < 0.0 {
            return None;
        }
        Some(Self {
            timestamp_ms,
            units,
        })
    }

    /// Format the administration time as local wall-clock time (HH:MM:SS)
    pub fn local_time(&self) -> String {
        match Local.timestamp_millis_opt(self.timestamp_ms as i64) {
            chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S").to_string(),
            _ => "??:??:??".to_string(),
        }
    }

    /// Format the administration time as a full local date and time
    pub fn local_datetime(&self) -> String {
        match Local.timestamp_millis_opt(self.timestamp_ms as i64) {
            chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            _ => "unknown".to_string(),
        }
    }
}

impl fmt::Display for BolusRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}U at {}", self.units, self.local_time())
    }
}

/// A rolling window of up to [`WINDOW_CAP`] bolus records, newest first
///
/// The canonical form is the serialized string `ts,units|ts,units|...`.
/// Entries keep the exact numeric text captured from the upstream
/// response; window equality is defined as equality of the serialized
/// form, so no numeric round-trip is ever applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BolusWindow(String);

impl BolusWindow {
    /// Create an empty window
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Wrap an already-serialized window string
    pub fn from_serialized(serialized: impl Into<String>) -> Self {
        Self(serialized.into())
    }

    /// Append a record from its raw captured fields.
    ///
    /// Returns `false` (and leaves the window unchanged) once the window
    /// holds [`WINDOW_CAP`] entries.
    pub fn push_raw(&mut self, timestamp: &str, units: &str) -> bool {
        if self.len() >= WINDOW_CAP {
            return false;
        }
        if !self.0.is_empty() {
            self.0.push(RECORD_SEP);
        }
        self.0.push_str(timestamp);
        self.0.push(FIELD_SEP);
        self.0.push_str(units);
        true
    }

    /// The serialized window string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the window holds no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the window is full
    pub fn is_full(&self) -> bool {
        self.len() >= WINDOW_CAP
    }

    /// Number of serialized entries
    pub fn len(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.split(RECORD_SEP).count()
        }
    }

    /// Iterate over the serialized entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.0.split(RECORD_SEP).filter(|e| !e.is_empty())
    }

    /// The most recent serialized entry, or `""` if there is none
    pub fn first_entry(&self) -> &str {
        self.0.split(RECORD_SEP).next().unwrap_or("")
    }

    /// Parse the most recent entry into a [`BolusRecord`]
    pub fn first_record(&self) -> Option<BolusRecord> {
        BolusRecord::parse_entry(self.first_entry())
    }
}

impl fmt::Display for BolusWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
