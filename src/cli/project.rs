//! Project CLI subcommands.

use clap::Subcommand;

/// Project management commands.
///
/// Projects are identified by name. Removing a project keeps its tasks;
/// they can still be listed with `task list --project <NAME>`.
#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    /// Add a project. Adding an existing name does nothing.
    Add {
        /// Project name (surrounding whitespace is trimmed)
        name: String,
    },

    /// Remove a project, leaving its tasks in place.
    Remove {
        /// Project name
        name: String,
    },

    /// List projects with their task counts.
    List,
}
