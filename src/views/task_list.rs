//! Task list pane.

use crate::bus::{Event, EventBus, EventKind};
use crate::error::{Error, Result};
use crate::tasks::{today, NewTask, Task, TaskRegistry};
use crate::views::{RenderSink, TaskListItem, TaskListModel};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shows the selected project's tasks in display order.
pub struct TaskListView {
    registry: Rc<TaskRegistry>,
    bus: Rc<EventBus>,
    sink: Rc<dyn RenderSink>,
    current_project: RefCell<Option<String>>,
}

impl fmt::Debug for TaskListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskListView")
            .field("current_project", &self.current_project)
            .finish_non_exhaustive()
    }
}

impl TaskListView {
    /// Create the view. Call [`attach`](Self::attach) to wire it to the bus.
    pub fn new(registry: Rc<TaskRegistry>, bus: Rc<EventBus>, sink: Rc<dyn RenderSink>) -> Self {
        Self { registry, bus, sink, current_project: RefCell::new(None) }
    }

    /// Follow `projectSelected`, reload on `taskAdded`, redraw on
    /// `tasksUpdated`.
    pub fn attach(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.bus.subscribe(EventKind::ProjectSelected, move |event| {
            let (Some(view), Event::ProjectSelected { project_id }) = (weak.upgrade(), event) else {
                return;
            };
            *view.current_project.borrow_mut() = Some(project_id.clone());
            view.render();
        });

        let weak = Rc::downgrade(self);
        self.bus.subscribe(EventKind::TaskAdded, move |_| {
            if let Some(view) = weak.upgrade() {
                view.registry.reload();
                view.render();
            }
        });

        let weak = Rc::downgrade(self);
        self.bus.subscribe(EventKind::TasksUpdated, move |_| {
            if let Some(view) = weak.upgrade() {
                view.render();
            }
        });
    }

    /// Name of the project being shown, if any.
    #[must_use]
    pub fn current_project(&self) -> Option<String> {
        self.current_project.borrow().clone()
    }

    /// The pane's model as of `today`.
    #[must_use]
    pub fn model_on(&self, today: NaiveDate) -> TaskListModel {
        let Some(project_id) = self.current_project() else {
            return TaskListModel::NoProjectSelected;
        };
        let items = self
            .registry
            .sorted_tasks_for(&project_id)
            .iter()
            .map(|task| TaskListItem::from_task(task, today))
            .collect();
        TaskListModel::Project { project_id, items }
    }

    /// Draw the pane.
    pub fn render(&self) {
        self.sink.render_task_list(&self.model_on(today()));
    }

    /// Add a task to the current project.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTask`] if no project is selected or the title
    /// is blank, or a storage error if the task cannot be saved.
    pub fn submit_new_task(
        &self,
        title: &str,
        description: &str,
        due_date: Option<NaiveDate>,
    ) -> Result<Task> {
        let Some(project_id) = self.current_project() else {
            return Err(Error::InvalidTask("no project selected".to_string()));
        };
        self.registry.add_task(
            NewTask::new(title, project_id).description(description.trim()).due(due_date),
        )
    }

    /// Tick or untick a task's checkbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the task collection cannot be saved.
    pub fn toggle(&self, task_id: &str) -> Result<bool> {
        self.registry.toggle_task_complete(task_id)
    }

    /// Raise `taskSelected` for a clicked row.
    pub fn select_task(&self, task_id: &str) {
        self.bus.publish(&Event::TaskSelected { task_id: task_id.to_string() });
    }
}
