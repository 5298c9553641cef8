//! Insulin-on-board reading
//!
//! IOB is informational only: a missing or unreadable value degrades to
//! zero rather than failing the check cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An insulin-on-board estimate reported by the upstream system
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Iob(f64);

impl Iob {
    /// The safe default used when the value cannot be determined
    pub const ZERO: Iob = Iob(0.0);

    /// Create a new IOB reading
    pub const fn new(units: f64) -> Self {
        Self(units)
    }

    /// IOB in insulin units
    #[inline]
    pub const fn as_units(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Iob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}U", self.0)
    }
}

impl From<f64> for Iob {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iob_default_is_zero() {
        assert_eq!(Iob::default(), Iob::ZERO);
        assert_eq!(Iob::default().as_units(), 0.0);
    }

    #[test]
    fn test_iob_display_one_decimal() {
        assert_eq!(Iob::new(2.5).to_string(), "2.5U");
        assert_eq!(Iob::new(2.0).to_string(), "2.0U");
        assert_eq!(Iob::new(1.25).to_string(), "1.2U");
    }
}
