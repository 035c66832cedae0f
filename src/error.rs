//! Error types for `todo_board`.

/// Errors that can occur while managing projects and tasks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A due date could not be parsed.
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    /// A stored record failed validation.
    #[error("Invalid record #{index} in '{key}': {reason}")]
    InvalidRecord {
        /// The store key the record was read from.
        key: String,
        /// Position of the record in the stored array.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A task could not be created from user input.
    #[error("Invalid task: {0}")]
    InvalidTask(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
