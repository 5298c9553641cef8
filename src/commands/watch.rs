//! Watch command implementation
//!
//! Runs the periodic monitoring loop in the foreground. The loop owns
//! the persisted run flag: it is raised when the loop starts and checked
//! again before every cycle, so `boluswatch stop` from another terminal
//! makes the loop exit at its next tick.

use std::thread;
use std::time::Duration;

use crate::api::HttpSource;
use crate::cli::args::{OutputFormat, WatchArgs};
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::error::Result;
use crate::monitor::{AlertChannel, CheckOutcome};
use crate::services::MonitorService;
use crate::store::{FileStore, StateStore};

/// Execute the watch command
pub fn run_watch(args: &WatchArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let api = HttpSource::new(&config.api)?;
    let mut store = FileStore::open_default(config.store.path.as_deref())?;

    if args.resume && !store.is_running()? {
        let msg = Message {
            message: "monitoring was not running, nothing to resume".to_string(),
            success: true,
        };
        print_output(&msg, format)?;
        return Ok(());
    }

    store.set_running(true)?;

    let interval = Duration::from_secs(args.interval.unwrap_or(config.monitor.interval_seconds));
    let retry_interval = Duration::from_secs(
        args.retry_interval
            .unwrap_or(config.monitor.retry_interval_seconds),
    );

    log::info!("starting watch loop");
    log::info!("  interval: {:?}", interval);
    log::info!("  retry interval: {:?}", retry_interval);
    log::info!("  threshold: {}U", config.monitor.threshold_units);
    log::info!("  endpoint: {}", config.api.base_url);

    let mut service = MonitorService::new(
        api,
        store,
        AlertChannel::default(),
        config.monitor.threshold_units,
    );

    loop {
        let outcome = service.run_cycle()?;
        log::info!("check cycle finished: {}", outcome);

        if args.once {
            let msg = Message {
                message: format!("check cycle completed: {}", outcome),
                success: true,
            };
            print_output(&msg, format)?;
            break;
        }

        let sleep = match outcome {
            CheckOutcome::Success => interval,
            CheckOutcome::Retry(_) => retry_interval,
        };
        thread::sleep(sleep);

        if !service.store().is_running()? {
            log::info!("run flag cleared, stopping watch loop");
            let msg = Message {
                message: "monitoring stopped".to_string(),
                success: true,
            };
            print_output(&msg, format)?;
            break;
        }
    }

    Ok(())
}
