//! Reset command implementation
//!
//! Clears all persisted monitor state: stored window, last check time,
//! and run flag.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::error::Result;
use crate::store::{FileStore, StateStore};

/// Execute the reset command
pub fn run_reset(config: &Config, format: OutputFormat) -> Result<()> {
    let mut store = FileStore::open_default(config.store.path.as_deref())?;
    store.clear()?;

    let msg = Message {
        message: "stored monitor state cleared".to_string(),
        success: true,
    };
    print_output(&msg, format)?;
    Ok(())
}
