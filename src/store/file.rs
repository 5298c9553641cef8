//! File-backed state store
//!
//! Persists the monitor state as a small TOML file in the user data
//! directory. Each setter does a read-modify-write of the whole record,
//! which keeps every put durable the way the original preference store
//! behaved.

use std::path::{Path, PathBuf};

use crate::domain::BolusWindow;
use crate::error::StoreError;
use crate::store::{MonitorState, StateStore};

/// TOML-file implementation of [`StateStore`]
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store at the default location, honoring an override
    pub fn open_default(path_override: Option<&Path>) -> Result<Self, StoreError> {
        let path = match path_override {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        Ok(Self::new(path))
    }

    /// Default state file path inside the user data directory
    pub fn default_path() -> Result<PathBuf, StoreError> {
        dirs::data_dir()
            .map(|dir| dir.join("boluswatch/state.toml"))
            .ok_or(StoreError::NoStateDir)
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<MonitorState, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            // A store that was never written reads as all defaults.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(MonitorState::default())
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.display().to_string(),
                    source,
                })
            }
        };

        toml::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn write_state(&self, state: &MonitorState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let encoded = toml::to_string(state)?;
        std::fs::write(&self.path, encoded).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn update<F>(&mut self, apply: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut MonitorState),
    {
        let mut state = self.read_state()?;
        apply(&mut state);
        self.write_state(&state)
    }
}

impl StateStore for FileStore {
    fn window(&self) -> Result<BolusWindow, StoreError> {
        Ok(self.read_state()?.window)
    }

    fn set_window(&mut self, window: &BolusWindow) -> Result<(), StoreError> {
        self.update(|state| state.window = window.clone())
    }

    fn last_check_ms(&self) -> Result<u64, StoreError> {
        Ok(self.read_state()?.last_check_ms)
    }

    fn set_last_check_ms(&mut self, ms: u64) -> Result<(), StoreError> {
        self.update(|state| state.last_check_ms = ms)
    }

    fn is_running(&self) -> Result<bool, StoreError> {
        Ok(self.read_state()?.is_running)
    }

    fn set_running(&mut self, running: bool) -> Result<(), StoreError> {
        self.update(|state| state.is_running = running)
    }

    fn state(&self) -> Result<MonitorState, StoreError> {
        self.read_state()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.write_state(&MonitorState::default())
    }
}
