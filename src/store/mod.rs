//! Persisted monitor state
//!
//! The monitor's state lives in a small external key/value store with
//! plain get/put semantics and no schema versioning. State is never
//! destroyed, only overwritten. The file-backed implementation keeps the
//! original key names on disk.

pub mod file;

pub use file::FileStore;

use serde::{Deserialize, Serialize};

use crate::domain::BolusWindow;
use crate::error::StoreError;

/// The full persisted state record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorState {
    /// Serialized window of the most recently observed boluses
    #[serde(rename = "last_5_boluses")]
    pub window: BolusWindow,
    /// Wall-clock time of the last completed fetch, milliseconds since epoch
    #[serde(rename = "last_check")]
    pub last_check_ms: u64,
    /// Whether monitoring was active at last shutdown
    pub is_running: bool,
}

/// Trait for reading and writing persisted monitor state
///
/// Modeled as typed accessors over the three well-known keys. Every
/// setter is durable on return. The periodic runner is the only writer;
/// single-instance execution is guaranteed externally, so no locking is
/// layered on top.
pub trait StateStore: Send {
    /// Read the stored bolus window (empty if none was stored yet)
    fn window(&self) -> Result<BolusWindow, StoreError>;

    /// Persist the bolus window
    fn set_window(&mut self, window: &BolusWindow) -> Result<(), StoreError>;

    /// Read the last check time (0 if never checked)
    fn last_check_ms(&self) -> Result<u64, StoreError>;

    /// Persist the last check time
    fn set_last_check_ms(&mut self, ms: u64) -> Result<(), StoreError>;

    /// Read the run flag
    fn is_running(&self) -> Result<bool, StoreError>;

    /// Persist the run flag
    fn set_running(&mut self, running: bool) -> Result<(), StoreError>;

    /// Read the full state record
    fn state(&self) -> Result<MonitorState, StoreError>;

    /// Reset all keys to their defaults
    fn clear(&mut self) -> Result<(), StoreError>;
}
