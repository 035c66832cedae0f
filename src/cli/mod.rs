//! Command-line interface for todo-board.
//!
//! Each invocation opens the board, performs one gesture on its views, and
//! prints the pane that gesture affects.

mod project;
mod run;
mod task;


pub use project::ProjectCommand;
pub use run::{run, CliOutput};
pub use task::TaskCommand;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Projects and to-do tasks from the terminal.
///
/// Data is stored in `~/.todo-board/board.sqlite3` unless `--db`,
/// `TODO_BOARD_HOME` or `.todo-board/config.yaml` say otherwise.
#[derive(Parser, Debug)]
#[command(name = "todo-board")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project management - add, remove, and list projects.
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Task management - add, list, show, toggle, and delete tasks.
    ///
    /// Tasks are listed incomplete first, then by due date, with undated
    /// tasks after dated ones.
    #[command(subcommand)]
    Task(TaskCommand),

    /// Show version information.
    Version,
}
