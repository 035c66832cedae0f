//! # `todo_board`
//!
//! Projects and to-do tasks kept in a key-value store, with registries that
//! announce every change on an event bus and views that redraw in response.
//!
//! [`Board`] wires the pieces together; [`cli`] drives a board from the
//! terminal.

pub mod board;
pub mod bus;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod paths;
pub mod projects;
pub mod storage;
pub mod tasks;
pub mod telemetry;
pub mod testing;
pub mod traits;
pub mod views;

pub use board::Board;
pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
