//! Alert notification channel
//!
//! One channel is reused across the whole process lifetime: a new
//! qualifying bolus replaces any prior unacknowledged alert instead of
//! stacking. The terminal notifier renders alerts to stderr with an
//! audible bell.

use std::io::{self, Write};

use crate::error::Result;
use crate::monitor::types::BolusAlert;

/// Notification sink trait
pub trait Notifier: Send {
    /// Deliver an alert as a side effect
    fn notify(&self, alert: &BolusAlert) -> Result<()>;

    /// Sink name for identification
    fn name(&self) -> &str;
}

/// Terminal/console notifier
///
/// Outputs alerts to stderr with colored formatting and a terminal bell
/// as the audible cue.
pub struct TerminalNotifier {
    /// Use stderr instead of stdout
    use_stderr: bool,
    /// Use colors (ANSI escape codes)
    use_colors: bool,
    /// Emit a terminal bell with each alert
    use_bell: bool,
}

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self {
            use_stderr: true,
            use_colors: Self::supports_color(),
            use_bell: true,
        }
    }

    /// Create a notifier that uses stdout
    pub fn stdout() -> Self {
        Self {
            use_stderr: false,
            use_colors: Self::supports_color(),
            use_bell: true,
        }
    }

    /// Create a silent, colorless notifier
    pub fn plain() -> Self {
        Self {
            use_stderr: true,
            use_colors: false,
            use_bell: false,
        }
    }

    /// Check if the terminal supports colors
    fn supports_color() -> bool {
        std::env::var("TERM")
            .map(|term| term != "dumb")
            .unwrap_or(false)
    }

    /// Format an alert line
    fn format_alert(&self, alert: &BolusAlert) -> String {
        let tag = if self.use_colors {
            // Bold red, urgent
            "\x1b[31m\x1b[1mURGENT\x1b[0m"
        } else {
            "URGENT"
        };

        let bell = if self.use_bell { "\x07" } else { "" };

        format!("{}[{}] {} - {}", bell, tag, alert.title(), alert.body())
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, alert: &BolusAlert) -> Result<()> {
        let message = self.format_alert(alert);

        if self.use_stderr {
            let stderr = io::stderr();
            let mut handle = stderr.lock();
            writeln!(handle, "{}", message)?;
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", message)?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

/// The single reusable alert channel
///
/// Dispatches each alert to every attached sink and keeps only the most
/// recent alert: publishing replaces whatever was current before.
pub struct AlertChannel {
    notifiers: Vec<Box<dyn Notifier>>,
    current: Option<BolusAlert>,
}

impl AlertChannel {
    /// Create an empty channel with no sinks
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
            current: None,
        }
    }

    /// Attach a notification sink
    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Publish an alert, replacing any prior one
    pub fn publish(&mut self, alert: BolusAlert) {
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(&alert) {
                log::warn!("failed to notify via {}: {}", notifier.name(), e);
            }
        }
        self.current = Some(alert);
    }

    /// The alert currently occupying the channel, if any
    pub fn current(&self) -> Option<&BolusAlert> {
        self.current.as_ref()
    }

    /// Number of attached sinks
    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }
}

impl Default for AlertChannel {
    fn default() -> Self {
        let mut channel = Self::new();
        channel.add_notifier(Box::new(TerminalNotifier::new()));
        channel
    }
}
