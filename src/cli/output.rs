//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use chrono::{Local, TimeZone};
use serde::Serialize;
use std::io::{self, Write};

use crate::cli::args::OutputFormat;
use crate::monitor::types::{BolusAlert, CheckOutcome};
use crate::store::MonitorState;

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Simple status message
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        self.message.clone()
    }
}

/// Persisted monitor state for display
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub running: bool,
    pub last_bolus: Option<LastBolus>,
    pub saved_records: usize,
    pub last_check_ms: u64,
}

/// Most recent stored bolus, for display
#[derive(Debug, Clone, Serialize)]
pub struct LastBolus {
    pub timestamp_ms: u64,
    pub datetime: String,
    pub units: String,
}

impl StatusReport {
    /// Build a report from the persisted state
    pub fn from_state(state: &MonitorState) -> Self {
        let last_bolus = state.window.first_record().map(|record| {
            // Display keeps the stored numeric text for the dose.
            let units = state
                .window
                .first_entry()
                .split(',')
                .nth(1)
                .unwrap_or("?")
                .to_string();
            LastBolus {
                timestamp_ms: record.timestamp_ms,
                datetime: record.local_datetime(),
                units,
            }
        });

        Self {
            running: state.is_running,
            last_bolus,
            saved_records: state.window.len(),
            last_check_ms: state.last_check_ms,
        }
    }
}

impl TableDisplay for StatusReport {
    fn to_table(&self) -> String {
        let mut output = String::new();

        if self.running {
            output.push_str("Status: Running\n");
        } else {
            output.push_str("Status: Stopped\n");
        }

        match &self.last_bolus {
            Some(bolus) => {
                output.push_str(&format!(
                    "Last Bolus: {} ({}U)\n",
                    bolus.datetime, bolus.units
                ));
                output.push_str(&format!("Saved Records: {}\n", self.saved_records));
            }
            None => output.push_str("Last Bolus: None\n"),
        }

        if self.last_check_ms > 0 {
            output.push_str(&format!(
                "Last Check: {}",
                format_check_time(self.last_check_ms)
            ));
        } else {
            output.push_str("Last Check: Never");
        }

        output
    }
}

/// Result of a single check cycle, for display
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub outcome: CheckOutcome,
    pub window: String,
    pub alert: Option<BolusAlert>,
}

impl TableDisplay for CheckReport {
    fn to_table(&self) -> String {
        let mut output = format!("Outcome: {}\n", self.outcome);

        if self.window.is_empty() {
            output.push_str("Stored Window: (empty)\n");
        } else {
            output.push_str(&format!("Stored Window: {}\n", self.window));
        }

        match &self.alert {
            Some(alert) => output.push_str(&format!("Alert: {} - {}", alert.title(), alert.body())),
            None => output.push_str("Alert: none"),
        }

        output
    }

    fn to_compact(&self) -> String {
        format!("{}", self.outcome)
    }
}

/// Format an epoch-milliseconds timestamp as local HH:MM:SS
pub fn format_check_time(ms: u64) -> String {
    match Local.timestamp_millis_opt(ms as i64) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S").to_string(),
        _ => "??:??:??".to_string(),
    }
}
