//! Mock implementations for testing
//!
//! Provides a scripted API source, an in-memory state store, and a
//! recording notifier for unit testing without a live uploader.

use std::sync::{Arc, Mutex};

use crate::api::TreatmentSource;
use crate::domain::BolusWindow;
use crate::error::{ApiError, StoreError};
use crate::monitor::types::BolusAlert;
use crate::monitor::Notifier;
use crate::store::{MonitorState, StateStore};

type ErrorFactory = Box<dyn Fn() -> ApiError + Send + Sync>;

enum Scripted {
    Body(String),
    Error(ErrorFactory),
}

/// Mock API source returning scripted bodies or errors
pub struct MockSource {
    treatments: Mutex<Scripted>,
    iob: Mutex<Scripted>,
    treatment_fetches: Mutex<u32>,
    iob_fetches: Mutex<u32>,
}

impl MockSource {
    /// Create a source that returns empty bodies
    pub fn new() -> Self {
        Self {
            treatments: Mutex::new(Scripted::Body(String::new())),
            iob: Mutex::new(Scripted::Body(String::new())),
            treatment_fetches: Mutex::new(0),
            iob_fetches: Mutex::new(0),
        }
    }

    /// Builder: script the treatments response body
    pub fn with_treatments(self, body: &str) -> Self {
        *self.treatments.lock().unwrap() = Scripted::Body(body.to_string());
        self
    }

    /// Builder: script a treatments fetch failure
    pub fn with_treatments_error<F>(self, factory: F) -> Self
    where
        F: Fn() -> ApiError + Send + Sync + 'static,
    {
        *self.treatments.lock().unwrap() = Scripted::Error(Box::new(factory));
        self
    }

    /// Builder: script the IOB response body
    pub fn with_iob(self, body: &str) -> Self {
        *self.iob.lock().unwrap() = Scripted::Body(body.to_string());
        self
    }

    /// Builder: script an IOB fetch failure
    pub fn with_iob_error<F>(self, factory: F) -> Self
    where
        F: Fn() -> ApiError + Send + Sync + 'static,
    {
        *self.iob.lock().unwrap() = Scripted::Error(Box::new(factory));
        self
    }

    /// Replace the scripted treatments body mid-test
    pub fn set_treatments(&self, body: &str) {
        *self.treatments.lock().unwrap() = Scripted::Body(body.to_string());
    }

    /// Number of treatments fetches performed
    pub fn treatment_fetches(&self) -> u32 {
        *self.treatment_fetches.lock().unwrap()
    }

    /// Number of IOB fetches performed
    pub fn iob_fetches(&self) -> u32 {
        *self.iob_fetches.lock().unwrap()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TreatmentSource for MockSource {
    fn fetch_treatments(&self) -> Result<String, ApiError> {
        *self.treatment_fetches.lock().unwrap() += 1;
        match &*self.treatments.lock().unwrap() {
            Scripted::Body(body) => Ok(body.clone()),
            Scripted::Error(factory) => Err(factory()),
        }
    }

    fn fetch_iob(&self) -> Result<String, ApiError> {
        *self.iob_fetches.lock().unwrap() += 1;
        match &*self.iob.lock().unwrap() {
            Scripted::Body(body) => Ok(body.clone()),
            Scripted::Error(factory) => Err(factory()),
        }
    }
}

/// In-memory state store with write counters
pub struct MemoryStore {
    state: MonitorState,
    writes: u32,
    window_writes: u32,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            state: MonitorState::default(),
            writes: 0,
            window_writes: 0,
        }
    }

    /// Builder: pre-populate the stored window
    pub fn with_window(mut self, serialized: &str) -> Self {
        self.state.window = BolusWindow::from_serialized(serialized);
        self
    }

    /// Builder: pre-populate the run flag
    pub fn with_running(mut self, running: bool) -> Self {
        self.state.is_running = running;
        self
    }

    /// Total number of writes of any key
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    /// Number of window writes
    pub fn window_writes(&self) -> u32 {
        self.window_writes
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for MemoryStore {
    fn window(&self) -> Result<BolusWindow, StoreError> {
        Ok(self.state.window.clone())
    }

    fn set_window(&mut self, window: &BolusWindow) -> Result<(), StoreError> {
        self.state.window = window.clone();
        self.writes += 1;
        self.window_writes += 1;
        Ok(())
    }

    fn last_check_ms(&self) -> Result<u64, StoreError> {
        Ok(self.state.last_check_ms)
    }

    fn set_last_check_ms(&mut self, ms: u64) -> Result<(), StoreError> {
        self.state.last_check_ms = ms;
        self.writes += 1;
        Ok(())
    }

    fn is_running(&self) -> Result<bool, StoreError> {
        Ok(self.state.is_running)
    }

    fn set_running(&mut self, running: bool) -> Result<(), StoreError> {
        self.state.is_running = running;
        self.writes += 1;
        Ok(())
    }

    fn state(&self) -> Result<MonitorState, StoreError> {
        Ok(self.state.clone())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.state = MonitorState::default();
        self.writes += 1;
        Ok(())
    }
}

/// Notifier that records every delivered alert
pub struct RecordingNotifier {
    delivered: Arc<Mutex<Vec<BolusAlert>>>,
}

impl RecordingNotifier {
    /// Create a recording notifier
    pub fn new() -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the delivered alerts
    pub fn delivered(&self) -> Arc<Mutex<Vec<BolusAlert>>> {
        Arc::clone(&self.delivered)
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, alert: &BolusAlert) -> crate::error::Result<()> {
        self.delivered.lock().unwrap().push(*alert);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
