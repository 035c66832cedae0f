//! Testing utilities and in-memory implementations.
//!
//! These types are provided for use in tests and for embedding the board
//! without a database file.

use crate::error::{Error, Result};
use crate::traits::{ErrorSink, KeyValueStore};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// An in-memory key-value store.
///
/// Clones share the same underlying map, so a test can keep a handle to the
/// store it handed to a board and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with raw values.
    #[must_use]
    pub fn with_values(values: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (key, value) in values {
            store.values.borrow_mut().insert((*key).to_string(), (*value).to_string());
        }
        store
    }

    /// Get the raw value under `key`, bypassing the trait.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "memory store is read-only",
            )));
        }
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// An error sink that records every report.
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: RefCell<Vec<(String, String)>>,
}

impl RecordingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports so far as `(context, message)` pairs.
    #[must_use]
    pub fn reports(&self) -> Vec<(String, String)> {
        self.reports.borrow().clone()
    }

    /// Number of reports so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.reports.borrow().len()
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, context: &str, error: &Error) {
        self.reports.borrow_mut().push((context.to_string(), error.to_string()));
    }
}
