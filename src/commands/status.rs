//! Status command implementation
//!
//! Shows the persisted monitor state: run flag, most recent stored
//! bolus, and last check time.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, StatusReport};
use crate::config::Config;
use crate::error::Result;
use crate::store::{FileStore, StateStore};

/// Execute the status command
pub fn run_status(config: &Config, format: OutputFormat) -> Result<()> {
    let store = FileStore::open_default(config.store.path.as_deref())?;
    let state = store.state()?;

    let report = StatusReport::from_state(&state);
    print_output(&report, format)?;
    Ok(())
}
