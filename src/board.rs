//! The board: builds every component and wires them to one event bus.

use crate::bus::EventBus;
use crate::config::BoardConfig;
use crate::error::Result;
use crate::gateway::PersistenceGateway;
use crate::projects::ProjectRegistry;
use crate::storage::SqliteStore;
use crate::tasks::TaskRegistry;
use crate::telemetry::TracingSink;
use crate::traits::{ErrorSink, KeyValueStore};
use crate::views::{ProjectListView, RenderSink, TaskDetailView, TaskListView};
use std::path::Path;
use std::rc::Rc;

/// A fully wired board: store, registries, views, and the bus between them.
#[derive(Debug)]
pub struct Board {
    bus: Rc<EventBus>,
    gateway: Rc<PersistenceGateway>,
    projects: Rc<ProjectRegistry>,
    tasks: Rc<TaskRegistry>,
    project_list: Rc<ProjectListView>,
    task_list: Rc<TaskListView>,
    task_detail: Rc<TaskDetailView>,
}

impl Board {
    /// Build a board over `store` and draw every pane once.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        error_sink: Rc<dyn ErrorSink>,
        render_sink: Rc<dyn RenderSink>,
    ) -> Self {
        let bus = Rc::new(EventBus::new());
        let gateway = Rc::new(PersistenceGateway::new(store, error_sink));

        let projects = Rc::new(ProjectRegistry::new(Rc::clone(&gateway), Rc::clone(&bus)));
        let tasks = Rc::new(TaskRegistry::new(Rc::clone(&gateway), Rc::clone(&bus)));
        tasks.attach();

        let project_list =
            Rc::new(ProjectListView::new(Rc::clone(&projects), Rc::clone(&render_sink)));
        project_list.attach(&bus);
        let task_list =
            Rc::new(TaskListView::new(Rc::clone(&tasks), Rc::clone(&bus), Rc::clone(&render_sink)));
        task_list.attach();
        let task_detail =
            Rc::new(TaskDetailView::new(Rc::clone(&gateway), Rc::clone(&bus), render_sink));
        task_detail.attach();

        project_list.render();
        task_list.render();
        task_detail.clear();

        Self { bus, gateway, projects, tasks, project_list, task_list, task_detail }
    }

    /// Open the `SQLite` board configured for `base_dir`.
    ///
    /// Recovered errors are reported through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if no database path can be determined or the
    /// database cannot be opened.
    pub fn open(
        config: &BoardConfig,
        base_dir: &Path,
        render_sink: Rc<dyn RenderSink>,
    ) -> Result<Self> {
        let db_path = config.resolve_database_path(base_dir).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "cannot determine home directory")
        })?;
        tracing::debug!(db = %db_path.display(), "opening board");
        let store = SqliteStore::with_path(db_path)?;
        Ok(Self::new(Box::new(store), Rc::new(TracingSink), render_sink))
    }

    /// The event bus.
    #[must_use]
    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    /// The persistence gateway.
    #[must_use]
    pub fn gateway(&self) -> &Rc<PersistenceGateway> {
        &self.gateway
    }

    /// The project registry.
    #[must_use]
    pub fn projects(&self) -> &Rc<ProjectRegistry> {
        &self.projects
    }

    /// The task registry.
    #[must_use]
    pub fn tasks(&self) -> &Rc<TaskRegistry> {
        &self.tasks
    }

    /// The project list pane.
    #[must_use]
    pub fn project_list(&self) -> &Rc<ProjectListView> {
        &self.project_list
    }

    /// The task list pane.
    #[must_use]
    pub fn task_list(&self) -> &Rc<TaskListView> {
        &self.task_list
    }

    /// The task detail pane.
    #[must_use]
    pub fn task_detail(&self) -> &Rc<TaskDetailView> {
        &self.task_detail
    }
}
