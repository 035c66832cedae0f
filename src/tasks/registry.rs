//! Task registry: the in-memory task collection and its sort policy.

use crate::bus::{Event, EventBus, EventKind};
use crate::error::{Error, Result};
use crate::gateway::PersistenceGateway;
use crate::tasks::models::{NewTask, Task};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

/// Canonical ordering between two tasks.
///
/// Incomplete before completed, then dated before undated, then earliest
/// due date first. Undated tasks with the same completion state compare
/// equal, so a stable sort keeps their input order.
#[must_use]
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    a.completed.cmp(&b.completed).then_with(|| match (a.due_date, b.due_date) {
        (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Return `tasks` in display order without modifying the input.
#[must_use]
pub fn sort_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(compare_tasks);
    sorted
}

/// Owns every task on the board and persists the whole collection on every
/// change.
///
/// Methods take `&self`; the collection lives in a `RefCell` whose borrow is
/// always released before an event is published, so handlers may read the
/// registry while reacting to its events.
#[derive(Debug)]
pub struct TaskRegistry {
    gateway: Rc<PersistenceGateway>,
    bus: Rc<EventBus>,
    tasks: RefCell<Vec<Task>>,
}

impl TaskRegistry {
    /// Create a registry, loading the stored tasks.
    pub fn new(gateway: Rc<PersistenceGateway>, bus: Rc<EventBus>) -> Self {
        let tasks = gateway.load_tasks();
        Self { gateway, bus, tasks: RefCell::new(tasks) }
    }

    /// Subscribe this registry to `toggleTaskComplete` and `deleteTask`.
    ///
    /// Failures while handling those events are reported to the error sink.
    pub fn attach(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.bus.subscribe(EventKind::ToggleTaskComplete, move |event| {
            let (Some(registry), Event::ToggleTaskComplete { task_id }) = (weak.upgrade(), event)
            else {
                return;
            };
            if let Err(e) = registry.toggle_task_complete(task_id) {
                registry.gateway.report("toggle task", &e);
            }
        });

        let weak = Rc::downgrade(self);
        self.bus.subscribe(EventKind::DeleteTask, move |event| {
            let (Some(registry), Event::DeleteTask { task_id }) = (weak.upgrade(), event) else {
                return;
            };
            if let Err(e) = registry.remove_task(task_id) {
                registry.gateway.report("delete task", &e);
            }
        });
    }

    /// Replace the in-memory collection with the stored one.
    pub fn reload(&self) {
        let tasks = self.gateway.load_tasks();
        *self.tasks.borrow_mut() = tasks;
    }

    /// Snapshot of every task in insertion order.
    #[must_use]
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Look up a task by ID.
    #[must_use]
    pub fn task(&self, id: &str) -> Option<Task> {
        self.tasks.borrow().iter().find(|task| task.id == id).cloned()
    }

    /// Tasks whose project is exactly `project_id`, in insertion order.
    #[must_use]
    pub fn tasks_for(&self, project_id: &str) -> Vec<Task> {
        self.tasks.borrow().iter().filter(|task| task.project_id == project_id).cloned().collect()
    }

    /// Tasks of `project_id` in display order.
    #[must_use]
    pub fn sorted_tasks_for(&self, project_id: &str) -> Vec<Task> {
        let mut tasks = self.tasks_for(project_id);
        tasks.sort_by(compare_tasks);
        tasks
    }

    /// Create and store a task, then raise `taskAdded` and `tasksUpdated`.
    ///
    /// The title is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTask`] if the title or project is blank, or a
    /// storage error if the collection cannot be saved. Nothing is stored
    /// and no event is raised on error.
    pub fn add_task(&self, new: NewTask) -> Result<Task> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidTask("title must not be empty".to_string()));
        }
        if new.project_id.trim().is_empty() {
            return Err(Error::InvalidTask("no project selected".to_string()));
        }

        let task = Task::create(NewTask { title: title.to_string(), ..new });
        let mut updated = self.all_tasks();
        updated.push(task.clone());
        self.commit(updated)?;

        tracing::info!(task_id = %task.id, project = %task.project_id, "added task");
        self.bus.publish(&Event::TaskAdded);
        self.bus.publish(&Event::TasksUpdated);
        Ok(task)
    }

    /// Remove a task and raise `tasksUpdated`.
    ///
    /// An unknown ID is a no-op: nothing is saved and no event is raised.
    /// Returns whether a task was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn remove_task(&self, id: &str) -> Result<bool> {
        let mut updated = self.all_tasks();
        let before = updated.len();
        updated.retain(|task| task.id != id);
        if updated.len() == before {
            tracing::debug!(task_id = id, "remove: no such task");
            return Ok(false);
        }
        self.commit(updated)?;

        tracing::info!(task_id = id, "removed task");
        self.bus.publish(&Event::TasksUpdated);
        Ok(true)
    }

    /// Flip a task's completion and raise `tasksUpdated`.
    ///
    /// An unknown ID is a no-op: nothing is saved and no event is raised.
    /// Returns whether a task was toggled.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved.
    pub fn toggle_task_complete(&self, id: &str) -> Result<bool> {
        let mut updated = self.all_tasks();
        let Some(task) = updated.iter_mut().find(|task| task.id == id) else {
            tracing::debug!(task_id = id, "toggle: no such task");
            return Ok(false);
        };
        task.toggle_complete();
        let completed = task.completed;
        self.commit(updated)?;

        tracing::info!(task_id = id, completed, "toggled task");
        self.bus.publish(&Event::TasksUpdated);
        Ok(true)
    }

    /// Persist `tasks`, then make them the in-memory collection.
    fn commit(&self, tasks: Vec<Task>) -> Result<()> {
        self.gateway.save_tasks(&tasks)?;
        *self.tasks.borrow_mut() = tasks;
        Ok(())
    }
}
