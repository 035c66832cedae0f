//! Plain-text render sink.

use crate::views::{ProjectEntry, RenderSink, TaskDetailModel, TaskListModel};
use std::cell::{Cell, RefCell};

/// Renders each pane to lines of text and keeps the latest rendering.
#[derive(Debug, Default)]
pub struct TextRenderer {
    projects: RefCell<Vec<String>>,
    task_list: RefCell<Vec<String>>,
    task_detail: RefCell<Vec<String>>,
    renders: Cell<usize>,
}

impl TextRenderer {
    /// Create a renderer with all panes empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest project list lines.
    #[must_use]
    pub fn project_lines(&self) -> Vec<String> {
        self.projects.borrow().clone()
    }

    /// Latest task list lines.
    #[must_use]
    pub fn task_list_lines(&self) -> Vec<String> {
        self.task_list.borrow().clone()
    }

    /// Latest task detail lines.
    #[must_use]
    pub fn task_detail_lines(&self) -> Vec<String> {
        self.task_detail.borrow().clone()
    }

    /// Total number of renders across all panes.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    fn store(&self, pane: &RefCell<Vec<String>>, lines: Vec<String>) {
        *pane.borrow_mut() = lines;
        self.renders.set(self.renders.get() + 1);
    }
}

impl RenderSink for TextRenderer {
    fn render_projects(&self, projects: &[ProjectEntry]) {
        let lines = if projects.is_empty() {
            vec!["No projects".to_string()]
        } else {
            projects
                .iter()
                .map(|entry| {
                    let marker = if entry.active { '*' } else { ' ' };
                    format!("{marker} {} ({})", entry.name, entry.task_count)
                })
                .collect()
        };
        self.store(&self.projects, lines);
    }

    fn render_task_list(&self, list: &TaskListModel) {
        let lines = match list {
            TaskListModel::NoProjectSelected => vec!["Select a project to view tasks".to_string()],
            TaskListModel::Project { project_id, items } => {
                let mut lines = vec![format!("Tasks in {project_id}")];
                if items.is_empty() {
                    lines.push("No tasks for this project".to_string());
                }
                for item in items {
                    let check = if item.completed { "[x]" } else { "[ ]" };
                    let mut line = format!("{check} {}", item.title);
                    if !item.due_label.is_empty() {
                        line.push_str(&format!(" (due {})", item.due_label));
                    }
                    if item.overdue {
                        line.push_str(" OVERDUE");
                    }
                    line.push_str(&format!("  #{}", item.task_id));
                    lines.push(line);
                }
                lines
            }
        };
        self.store(&self.task_list, lines);
    }

    fn render_task_detail(&self, detail: &TaskDetailModel) {
        let lines = match detail {
            TaskDetailModel::NothingSelected => vec!["Select a task to view details".to_string()],
            TaskDetailModel::Task(task) => vec![
                task.title.clone(),
                task.due_line.clone(),
                task.description.clone(),
                format!("Status: {}", if task.completed { "complete" } else { "open" }),
                format!("Action: {}", task.toggle_label),
                format!("ID: {}", task.task_id),
            ],
        };
        self.store(&self.task_detail, lines);
    }
}
