//! Tolerant response scanning
//!
//! The upstream uploader's JSON is only loosely guaranteed, so these
//! scanners never parse the full document. They split on recognizable
//! object boundaries and search each chunk for named numeric fields,
//! skipping anything that does not match. Unexpected extra fields or
//! partially malformed payloads therefore degrade to fewer records, not
//! to a hard failure.

use regex::Regex;

use crate::domain::{BolusWindow, Iob};

/// Token separating adjacent objects in a JSON array body
const OBJECT_SEP: &str = "},{";

/// Searches a text blob for the first numeric value following a named field.
///
/// Matches `"<field>"` followed by optional colon/whitespace and a numeric
/// run, anywhere in the blob. This is deliberately not a JSON parser.
#[derive(Debug)]
pub struct FieldScanner {
    pattern: Regex,
}

impl FieldScanner {
    /// Scanner for an integer field (a run of digits)
    pub fn integer(field: &str) -> Self {
        let pattern = format!("\"{}\"[:\\s]*(\\d+)", regex::escape(field));
        Self {
            pattern: Regex::new(&pattern).expect("hard-coded field pattern is valid"),
        }
    }

    /// Scanner for a decimal field (digits and dots)
    ///
    /// The numeric run is captured as text; whether it parses as a number
    /// is the caller's concern. `1.2.3` is captured whole and will fail a
    /// later `f64` parse, which is how malformed values are rejected.
    pub fn decimal(field: &str) -> Self {
        let pattern = format!("\"{}\"[:\\s]*([0-9.]+)", regex::escape(field));
        Self {
            pattern: Regex::new(&pattern).expect("hard-coded field pattern is valid"),
        }
    }

    /// Return the first captured numeric text, if the field is present
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Extracts the bolus window from a treatments response body
#[derive(Debug)]
pub struct TreatmentScanner {
    created_at: FieldScanner,
    insulin: FieldScanner,
}

impl TreatmentScanner {
    /// Create a scanner for the upstream treatment record fields
    pub fn new() -> Self {
        Self {
            created_at: FieldScanner::integer("created_at"),
            insulin: FieldScanner::decimal("insulin"),
        }
    }

    /// Scan a treatments body into a serialized bolus window.
    ///
    /// Chunks are visited in input order. A chunk contributes a record
    /// only when both fields are found; incomplete chunks are skipped and
    /// do not count toward the window cap. The result may be empty, which
    /// signals an unusable response for this cycle.
    pub fn extract_window(&self, body: &str) -> BolusWindow {
        let mut window = BolusWindow::new();

        for chunk in body.split(OBJECT_SEP) {
            if window.is_full() {
                break;
            }

            if let (Some(timestamp), Some(units)) =
                (self.created_at.capture(chunk), self.insulin.capture(chunk))
            {
                window.push_raw(timestamp, units);
            }
        }

        window
    }
}

impl Default for TreatmentScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the insulin-on-board value from an IOB summary body
#[derive(Debug)]
pub struct IobScanner {
    pattern: Regex,
}

impl IobScanner {
    /// Create a scanner for the nested `iob.iob` field
    pub fn new() -> Self {
        Self {
            pattern: Regex::new("\"iob\"[:\\s]*\\{[^}]*\"iob\"[:\\s]*([0-9.]+)")
                .expect("hard-coded IOB pattern is valid"),
        }
    }

    /// Scan an IOB summary body.
    ///
    /// Returns exactly zero when the body is empty, the nested field is
    /// absent, or the captured text is not a valid number. Callers never
    /// see an extraction failure distinctly from an IOB of zero.
    pub fn extract(&self, body: &str) -> Iob {
        self.pattern
            .captures(body)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(Iob::new)
            .unwrap_or(Iob::ZERO)
    }
}

impl Default for IobScanner {
    fn default() -> Self {
        Self::new()
    }
}
