//! Project list pane.

use crate::bus::{EventBus, EventKind};
use crate::error::Result;
use crate::projects::ProjectRegistry;
use crate::views::{ProjectEntry, RenderSink};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shows every project with its live task count and highlights the
/// selected one.
pub struct ProjectListView {
    registry: Rc<ProjectRegistry>,
    sink: Rc<dyn RenderSink>,
    active: RefCell<Option<String>>,
}

impl fmt::Debug for ProjectListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectListView").field("active", &self.active).finish_non_exhaustive()
    }
}

impl ProjectListView {
    /// Create the view. Call [`attach`](Self::attach) to wire it to the bus.
    pub fn new(registry: Rc<ProjectRegistry>, sink: Rc<dyn RenderSink>) -> Self {
        Self { registry, sink, active: RefCell::new(None) }
    }

    /// Re-render whenever `tasksUpdated` is raised.
    pub fn attach(self: &Rc<Self>, bus: &EventBus) {
        let weak = Rc::downgrade(self);
        bus.subscribe(EventKind::TasksUpdated, move |_| {
            if let Some(view) = weak.upgrade() {
                view.render();
            }
        });
    }

    /// Name of the selected project, if any.
    #[must_use]
    pub fn active(&self) -> Option<String> {
        self.active.borrow().clone()
    }

    /// Current rows, task counts read fresh from the store.
    #[must_use]
    pub fn entries(&self) -> Vec<ProjectEntry> {
        let active = self.active();
        self.registry
            .projects()
            .into_iter()
            .map(|name| ProjectEntry {
                task_count: self.registry.task_count_for(&name),
                active: active.as_deref() == Some(name.as_str()),
                name,
            })
            .collect()
    }

    /// Draw the pane.
    pub fn render(&self) {
        self.sink.render_projects(&self.entries());
    }

    /// Add a project from user input and redraw if it was added.
    ///
    /// # Errors
    ///
    /// Returns an error if the project list cannot be saved.
    pub fn add_project(&self, input: &str) -> Result<bool> {
        let added = self.registry.add_project(input)?;
        if added {
            self.render();
        }
        Ok(added)
    }

    /// Remove a project; the resulting `tasksUpdated` redraws every pane.
    ///
    /// # Errors
    ///
    /// Returns an error if the project list cannot be saved.
    pub fn remove_project(&self, name: &str) -> Result<bool> {
        self.registry.remove_project(name)
    }

    /// Mark `name` as selected, redraw, and raise `projectSelected`.
    pub fn select(&self, name: &str) {
        *self.active.borrow_mut() = Some(name.to_string());
        self.render();
        self.registry.select_project(name);
    }
}
