//! Task detail pane.

use crate::bus::{Event, EventBus, EventKind};
use crate::gateway::PersistenceGateway;
use crate::views::{RenderSink, TaskDetail, TaskDetailModel};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shows one task, read fresh from the store, with toggle and delete
/// actions that go through the bus.
pub struct TaskDetailView {
    gateway: Rc<PersistenceGateway>,
    bus: Rc<EventBus>,
    sink: Rc<dyn RenderSink>,
    current: RefCell<Option<String>>,
}

impl fmt::Debug for TaskDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskDetailView").field("current", &self.current).finish_non_exhaustive()
    }
}

impl TaskDetailView {
    /// Create the view. Call [`attach`](Self::attach) to wire it to the bus.
    pub fn new(
        gateway: Rc<PersistenceGateway>,
        bus: Rc<EventBus>,
        sink: Rc<dyn RenderSink>,
    ) -> Self {
        Self { gateway, bus, sink, current: RefCell::new(None) }
    }

    /// Display the task named by `taskSelected`; refresh on `tasksUpdated`.
    pub fn attach(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.bus.subscribe(EventKind::TaskSelected, move |event| {
            let (Some(view), Event::TaskSelected { task_id }) = (weak.upgrade(), event) else {
                return;
            };
            view.display(task_id);
        });

        let weak = Rc::downgrade(self);
        self.bus.subscribe(EventKind::TasksUpdated, move |_| {
            let Some(view) = weak.upgrade() else {
                return;
            };
            if let Some(task_id) = view.current_task_id() {
                view.display(&task_id);
            }
        });
    }

    /// ID of the task being shown, if any.
    #[must_use]
    pub fn current_task_id(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    /// Look `task_id` up in the store and draw it.
    ///
    /// An unknown ID clears the selection and draws the empty state.
    pub fn display(&self, task_id: &str) {
        let task = self.gateway.load_tasks_quietly().into_iter().find(|task| task.id == task_id);
        match task {
            Some(task) => {
                *self.current.borrow_mut() = Some(task.id.clone());
                self.sink.render_task_detail(&TaskDetailModel::Task(TaskDetail::from(&task)));
            }
            None => self.clear(),
        }
    }

    /// Clear the selection and draw the empty state.
    pub fn clear(&self) {
        *self.current.borrow_mut() = None;
        self.sink.render_task_detail(&TaskDetailModel::NothingSelected);
    }

    /// Raise `toggleTaskComplete` for the shown task.
    ///
    /// Returns `false` if no task is shown.
    pub fn request_toggle(&self) -> bool {
        let Some(task_id) = self.current_task_id() else {
            return false;
        };
        self.bus.publish(&Event::ToggleTaskComplete { task_id });
        true
    }

    /// Raise `deleteTask` for the shown task, then clear the pane.
    ///
    /// Returns `false` if no task is shown.
    pub fn request_delete(&self) -> bool {
        let Some(task_id) = self.current_task_id() else {
            return false;
        };
        self.bus.publish(&Event::DeleteTask { task_id });
        self.clear();
        true
    }
}
