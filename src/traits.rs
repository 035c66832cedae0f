//! Core traits for testability and abstraction.

use crate::error::{Error, Result};

/// Trait for the durable key-value store holding the persisted collections.
///
/// Values are opaque strings (JSON blobs in practice). The production
/// implementation uses `SQLite`, while tests use an in-memory store.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    ///
    /// The write must be visible to the next `get` on the same key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Trait for the observability sink receiving recoverable errors.
///
/// Reports never propagate back to the caller; the sink decides what to do
/// with them (log, count, ignore).
pub trait ErrorSink {
    /// Report an error that was recovered from.
    ///
    /// `context` names the operation that failed, e.g. `"load tasks"`.
    fn report(&self, context: &str, error: &Error);
}
