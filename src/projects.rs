//! Project registry: the list of project names.
//!
//! Projects are identified by name alone. Removing a project leaves tasks
//! that reference it untouched; they stay reachable by project name.

use crate::bus::{Event, EventBus};
use crate::error::Result;
use crate::gateway::PersistenceGateway;
use std::cell::RefCell;
use std::rc::Rc;

/// Owns the in-memory project list and persists it on every change.
#[derive(Debug)]
pub struct ProjectRegistry {
    gateway: Rc<PersistenceGateway>,
    bus: Rc<EventBus>,
    projects: RefCell<Vec<String>>,
}

impl ProjectRegistry {
    /// Create a registry, loading the stored projects.
    pub fn new(gateway: Rc<PersistenceGateway>, bus: Rc<EventBus>) -> Self {
        let projects = gateway.load_projects();
        Self { gateway, bus, projects: RefCell::new(projects) }
    }

    /// Snapshot of project names in insertion order.
    #[must_use]
    pub fn projects(&self) -> Vec<String> {
        self.projects.borrow().clone()
    }

    /// Whether a project with exactly this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.projects.borrow().iter().any(|project| project == name)
    }

    /// Add a project.
    ///
    /// Surrounding whitespace is trimmed. Returns `Ok(false)` without
    /// touching the store if the name is blank or already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the project list cannot be saved; the in-memory
    /// list is left unchanged in that case.
    pub fn add_project(&self, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return Ok(false);
        }

        let mut updated = self.projects();
        updated.push(name.to_string());
        self.gateway.save_projects(&updated)?;
        *self.projects.borrow_mut() = updated;

        tracing::info!(project = name, "added project");
        Ok(true)
    }

    /// Remove a project and raise `tasksUpdated`.
    ///
    /// Tasks belonging to the project are kept. Returns whether a project
    /// was actually removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the project list cannot be saved; no event is
    /// raised in that case.
    pub fn remove_project(&self, name: &str) -> Result<bool> {
        let mut updated = self.projects();
        let removed = match updated.iter().position(|project| project == name) {
            Some(index) => {
                updated.remove(index);
                true
            }
            None => false,
        };

        self.gateway.save_projects(&updated)?;
        *self.projects.borrow_mut() = updated;

        tracing::info!(project = name, removed, "removed project");
        self.bus.publish(&Event::TasksUpdated);
        Ok(removed)
    }

    /// Count stored tasks belonging to `name`.
    ///
    /// Always re-reads the task collection, so it reflects writes made by
    /// any other component. Damaged records are skipped without being
    /// reported again.
    #[must_use]
    pub fn task_count_for(&self, name: &str) -> usize {
        self.gateway.load_tasks_quietly().iter().filter(|task| task.project_id == name).count()
    }

    /// Raise `projectSelected` for `name`.
    pub fn select_project(&self, name: &str) {
        self.bus.publish(&Event::ProjectSelected { project_id: name.to_string() });
    }
}
