//! Stop command implementation
//!
//! Clears the persisted run flag. A foreground watch loop notices the
//! cleared flag at its next tick and exits; a boot-time `watch --resume`
//! will not restart monitoring either.

use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::error::Result;
use crate::store::{FileStore, StateStore};

/// Execute the stop command
pub fn run_stop(config: &Config, format: OutputFormat) -> Result<()> {
    let mut store = FileStore::open_default(config.store.path.as_deref())?;

    let was_running = store.is_running()?;
    store.set_running(false)?;

    let msg = Message {
        message: if was_running {
            "monitoring stopped; a running watch loop will exit at its next tick".to_string()
        } else {
            "monitoring was not running".to_string()
        },
        success: true,
    };
    print_output(&msg, format)?;
    Ok(())
}
