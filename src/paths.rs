//! Path utilities for determining data storage locations.
//!
//! The board database lives in `~/.todo-board/` unless the
//! `TODO_BOARD_HOME` environment variable points somewhere else.

use std::path::PathBuf;

/// The base directory name for board data.
const DATA_DIR_NAME: &str = ".todo-board";

/// Environment variable overriding the data directory.
pub const HOME_ENV_VAR: &str = "TODO_BOARD_HOME";

/// The database filename.
pub const DATABASE_FILENAME: &str = "board.sqlite3";

/// Get the base data directory.
///
/// Returns `$TODO_BOARD_HOME` when set and non-empty, otherwise
/// `~/.todo-board/`, or `None` if the home directory cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    match std::env::var_os(HOME_ENV_VAR) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir().map(|home| home.join(DATA_DIR_NAME)),
    }
}

/// Get the default database path.
#[must_use]
pub fn default_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(DATABASE_FILENAME))
}
