//! Check command implementation
//!
//! Runs a single check cycle and reports its outcome.

use crate::api::HttpSource;
use crate::cli::args::OutputFormat;
use crate::cli::output::{print_output, CheckReport};
use crate::config::Config;
use crate::error::Result;
use crate::monitor::AlertChannel;
use crate::services::MonitorService;
use crate::store::{FileStore, StateStore};

/// Execute the check command
pub fn run_check(config: &Config, format: OutputFormat) -> Result<()> {
    let api = HttpSource::new(&config.api)?;
    let store = FileStore::open_default(config.store.path.as_deref())?;

    let mut service = MonitorService::new(
        api,
        store,
        AlertChannel::default(),
        config.monitor.threshold_units,
    );

    let outcome = service.run_cycle()?;

    let report = CheckReport {
        outcome,
        window: service.store().window()?.to_string(),
        alert: service.channel().current().copied(),
    };

    print_output(&report, format)?;
    Ok(())
}
