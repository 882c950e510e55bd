//! Durable key-value slots holding the serialized quote collection.
//!
//! A slot stores one whole value under one key. There are no partial
//! updates: every write replaces the previous value.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Slot key used for the quote collection.
pub const QUOTES_KEY: &str = "quotes";

/// Whole-value storage for a serialized quote collection
pub trait QuoteSlot: Send + Sync {
    /// Read the stored value, `None` when nothing has been written yet
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored value
    fn write(&self, value: &str) -> Result<()>;

    /// Remove the stored value; erasing an empty slot succeeds
    fn erase(&self) -> Result<()>;

    /// Human-readable location for log messages
    fn describe(&self) -> String;
}

/// Slot backed by `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Slot for the quote collection inside `dir`
    pub fn quotes(dir: impl AsRef<Path>) -> Self {
        Self::new(dir, QUOTES_KEY)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuoteSlot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(Error::Io(error)),
        }
    }

    fn write(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                Error::Persistence(format!(
                    "failed to create directory {}: {error}",
                    parent.display()
                ))
            })?;
        }

        std::fs::write(&self.path, value).map_err(|error| {
            Error::Persistence(format!(
                "failed to write {}: {error}",
                self.path.display()
            ))
        })
    }

    fn erase(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(Error::Persistence(format!(
                "failed to remove {}: {error}",
                self.path.display()
            ))),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process slot; clones share the same value
#[derive(Clone, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `value`
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value.into()))),
        }
    }

    /// Snapshot of the current value
    pub fn peek(&self) -> Option<String> {
        self.value
            .lock()
            .map_or(None, |guard| guard.as_ref().cloned())
    }

    fn set(&self, value: Option<String>) -> Result<()> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| Error::Persistence("memory slot lock poisoned".to_string()))?;
        *guard = value;
        Ok(())
    }
}

impl fmt::Debug for MemorySlot {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MemorySlot")
            .field("has_value", &self.peek().is_some())
            .finish()
    }
}

impl QuoteSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.peek())
    }

    fn write(&self, value: &str) -> Result<()> {
        self.set(Some(value.to_string()))
    }

    fn erase(&self) -> Result<()> {
        self.set(None)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
