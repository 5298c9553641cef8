//! Bolus change detection
//!
//! Compares the freshly extracted window against the previously stored
//! one. The common case (no new entries since the last poll) is resolved
//! with a single string comparison, so nothing gets parsed unless the
//! windows actually differ.

use crate::domain::{BolusRecord, BolusWindow};
use crate::monitor::types::Detection;

/// Compare a fresh window against the stored one.
///
/// Only the most recent entry decides whether a bolus is "new": a window
/// that differs deeper in the list (entries aging out of the cap) is a
/// tail change, not a new dose. A malformed first entry is reported as
/// such and swallowed by the caller.
pub fn detect(new: &BolusWindow, old: &BolusWindow) -> Detection {
    if new.is_empty() {
        return Detection::Unusable;
    }

    if new == old {
        return Detection::Unchanged;
    }

    let first_new = new.first_entry();
    let first_old = old.first_entry();

    if first_new == first_old || first_new.is_empty() {
        return Detection::TailChanged;
    }

    match BolusRecord::parse_entry(first_new) {
        Some(record) => Detection::NewBolus(record),
        None => Detection::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(s: &str) -> BolusWindow {
        BolusWindow::from_serialized(s)
    }

    #[test]
    fn test_empty_new_window_is_unusable() {
        assert_eq!(
            detect(&window(""), &window("1000,3.5")),
            Detection::Unusable
        );
        assert_eq!(detect(&window(""), &window("")), Detection::Unusable);
    }

    #[test]
    fn test_identical_windows_unchanged() {
        // detect(W, W) is "no new bolus" for any well-formed W.
        for w in ["1000,3.5", "1000,3.5|900,1.0", "5,0.1|4,0.2|3,0.3|2,0.4|1,0.5"] {
            assert_eq!(detect(&window(w), &window(w)), Detection::Unchanged);
        }
    }

    #[test]
    fn test_empty_old_window_first_entry_is_new() {
        let result = detect(&window("1000,3.5|900,1.0"), &window(""));
        match result {
            Detection::NewBolus(record) => {
                assert_eq!(record.timestamp_ms, 1000);
                assert_eq!(record.units, 3.5);
            }
            other => panic!("expected NewBolus, got {:?}", other),
        }
    }

    #[test]
    fn test_new_first_entry_detected() {
        let result = detect(
            &window("1100,2.0|1000,3.5|900,1.0"),
            &window("1000,3.5|900,1.0"),
        );
        assert_eq!(
            result,
            Detection::NewBolus(BolusRecord {
                timestamp_ms: 1100,
                units: 2.0,
            })
        );
    }

    #[test]
    fn test_tail_change_is_not_a_new_bolus() {
        // Same newest entry; an old record aged out of the cap.
        let result = detect(
            &window("1000,3.5|900,1.0"),
            &window("1000,3.5|900,1.0|800,0.5"),
        );
        assert_eq!(result, Detection::TailChanged);
    }

    #[test]
    fn test_leading_separator_treated_as_tail_change() {
        // Serialized form starting with the record separator has an empty
        // first element.
        let result = detect(&window("|900,1.0"), &window("1000,3.5"));
        assert_eq!(result, Detection::TailChanged);
    }

    #[test]
    fn test_malformed_first_entry() {
        let result = detect(&window("abc,xyz|900,1.0"), &window("1000,3.5"));
        assert_eq!(result, Detection::Malformed);
    }

    #[test]
    fn test_malformed_missing_units_field() {
        let result = detect(&window("1100|1000,3.5"), &window("1000,3.5"));
        assert_eq!(result, Detection::Malformed);
    }

    #[test]
    fn test_numerically_equal_text_still_differs() {
        // "3.50" vs "3.5": string inequality wins, and the entry parses,
        // so this reads as a new bolus. The upstream serializer is stable
        // in practice, so this only happens when the dose truly changed.
        let result = detect(&window("1000,3.50"), &window("1000,3.5"));
        assert!(matches!(result, Detection::NewBolus(_)));
    }
}
