//! Views: turn registry state into view models and user gestures into
//! registry calls or bus events.
//!
//! Each view hands its model to a [`RenderSink`], which draws it. Sinks keep
//! no state between renders; every relevant event triggers a full re-render
//! of the affected pane.

mod project_list;
mod task_detail;
mod task_list;
mod text;

pub use project_list::ProjectListView;
pub use task_detail::TaskDetailView;
pub use task_list::TaskListView;
pub use text::TextRenderer;

use crate::tasks::Task;
use chrono::NaiveDate;

/// Receives view models and draws them.
pub trait RenderSink {
    /// Draw the project list.
    fn render_projects(&self, projects: &[ProjectEntry]);

    /// Draw the task list pane.
    fn render_task_list(&self, list: &TaskListModel);

    /// Draw the task detail pane.
    fn render_task_detail(&self, detail: &TaskDetailModel);
}

/// One row of the project list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Project name.
    pub name: String,
    /// Number of stored tasks that belong to the project.
    pub task_count: usize,
    /// Whether this is the selected project.
    pub active: bool,
}

/// Contents of the task list pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListModel {
    /// No project has been selected yet.
    NoProjectSelected,
    /// Tasks of the selected project in display order (possibly none).
    Project {
        /// Selected project name.
        project_id: String,
        /// Tasks in display order.
        items: Vec<TaskListItem>,
    },
}

/// One row of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListItem {
    /// Task ID, passed back when the row is clicked.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// Whether the checkbox is ticked.
    pub completed: bool,
    /// Whether the row is highlighted as overdue.
    pub overdue: bool,
    /// Formatted due date, empty without one.
    pub due_label: String,
}

impl TaskListItem {
    /// Build a row for `task` as of `today`.
    #[must_use]
    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            completed: task.completed,
            overdue: task.is_overdue_on(today),
            due_label: task.formatted_due_date(),
        }
    }
}

/// Contents of the task detail pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskDetailModel {
    /// No task is selected, or the selected task no longer exists.
    NothingSelected,
    /// Details of the selected task.
    Task(TaskDetail),
}

/// Display fields for a selected task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetail {
    /// Task ID.
    pub task_id: String,
    /// Task title.
    pub title: String,
    /// "Due: Jan 5, 2024" or "No due date".
    pub due_line: String,
    /// The description, or "No description provided".
    pub description: String,
    /// Whether the task is done.
    pub completed: bool,
    /// Label of the completion toggle button.
    pub toggle_label: String,
}

impl From<&Task> for TaskDetail {
    fn from(task: &Task) -> Self {
        let due_line = if task.due_date.is_some() {
            format!("Due: {}", task.formatted_due_date())
        } else {
            "No due date".to_string()
        };
        let description = if task.description.is_empty() {
            "No description provided".to_string()
        } else {
            task.description.clone()
        };
        let toggle_label =
            if task.completed { "Mark as Incomplete" } else { "Mark as Complete" }.to_string();

        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            due_line,
            description,
            completed: task.completed,
            toggle_label,
        }
    }
}
