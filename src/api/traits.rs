//! Trait definitions for upstream API access
//!
//! These traits abstract over the uploader's HTTP endpoints to enable
//! testing with mocks.

use crate::error::ApiError;

/// Trait for fetching raw response bodies from the uploader
///
/// Implementations return the body text on HTTP 200 and an error for
/// anything else. No retrying happens at this level; the check cycle maps
/// failures to its own Retry outcome and leaves rescheduling to the
/// caller.
pub trait TreatmentSource: Send + Sync {
    /// Fetch the recent-treatments list body
    fn fetch_treatments(&self) -> Result<String, ApiError>;

    /// Fetch the IOB summary body
    fn fetch_iob(&self) -> Result<String, ApiError>;
}
