//! Task CLI subcommands.

use clap::Subcommand;

/// Task management commands.
///
/// ## Quick Start
///
/// ```bash
/// todo-board project add Home
/// todo-board task add --project Home --title "Buy milk" --due 2024-01-01
/// todo-board task list --project Home
/// todo-board task toggle <id>
/// ```
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Add a task to an existing project.
    Add {
        /// Project the task belongs to
        #[arg(short, long)]
        project: String,

        /// Title for the task (required)
        #[arg(short, long)]
        title: String,

        /// Description with more details
        #[arg(short, long, default_value = "")]
        description: String,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },

    /// List a project's tasks in display order.
    List {
        /// Project name
        #[arg(short, long)]
        project: String,
    },

    /// Show a task's details.
    Show {
        /// Task ID
        id: String,

        /// Print the stored record as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Mark a task complete, or incomplete again.
    Toggle {
        /// Task ID
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task ID
        id: String,
    },
}
