//! Synchronous publish/subscribe bus keeping the board's views in step.
//!
//! The bus is single-threaded: [`EventBus::publish`] calls every current
//! subscriber of the event's kind, in subscription order, before returning.
//! Handlers may publish further events or subscribe new handlers while an
//! event is being delivered; new subscribers only see later events, and a
//! handler unsubscribed mid-delivery is not called.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// The kinds of event carried by the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A project was chosen in the project list.
    ProjectSelected,
    /// A task was chosen in the task list.
    TaskSelected,
    /// A task was added to the registry.
    TaskAdded,
    /// Tasks or projects changed; views should re-render.
    TasksUpdated,
    /// The detail view asked for a task's completion to be flipped.
    ToggleTaskComplete,
    /// The detail view asked for a task to be deleted.
    DeleteTask,
}

impl EventKind {
    /// Every event kind.
    pub const ALL: [Self; 6] = [
        Self::ProjectSelected,
        Self::TaskSelected,
        Self::TaskAdded,
        Self::TasksUpdated,
        Self::ToggleTaskComplete,
        Self::DeleteTask,
    ];

    /// The event's wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ProjectSelected => "projectSelected",
            Self::TaskSelected => "taskSelected",
            Self::TaskAdded => "taskAdded",
            Self::TasksUpdated => "tasksUpdated",
            Self::ToggleTaskComplete => "toggleTaskComplete",
            Self::DeleteTask => "deleteTask",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event together with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A project was selected.
    ProjectSelected {
        /// Name of the selected project.
        project_id: String,
    },
    /// A task was selected.
    TaskSelected {
        /// ID of the selected task.
        task_id: String,
    },
    /// A task was added.
    TaskAdded,
    /// Board state changed.
    TasksUpdated,
    /// Request to flip a task's completion.
    ToggleTaskComplete {
        /// ID of the task to toggle.
        task_id: String,
    },
    /// Request to delete a task.
    DeleteTask {
        /// ID of the task to delete.
        task_id: String,
    },
}

impl Event {
    /// The kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ProjectSelected { .. } => EventKind::ProjectSelected,
            Self::TaskSelected { .. } => EventKind::TaskSelected,
            Self::TaskAdded => EventKind::TaskAdded,
            Self::TasksUpdated => EventKind::TasksUpdated,
            Self::ToggleTaskComplete { .. } => EventKind::ToggleTaskComplete,
            Self::DeleteTask { .. } => EventKind::DeleteTask,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&Event)>;

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler,
}

/// In-process event bus.
#[derive(Default)]
pub struct EventBus {
    next_id: Cell<u64>,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriptions", &self.subscriptions.borrow().len())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`.
    pub fn subscribe(&self, kind: EventKind, handler: impl Fn(&Event) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscriptions.borrow_mut().push(Subscription { id, kind, handler: Rc::new(handler) });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.borrow_mut();
        let before = subscriptions.len();
        subscriptions.retain(|sub| sub.id != id);
        subscriptions.len() != before
    }

    /// Number of handlers currently registered for `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions.borrow().iter().filter(|sub| sub.kind == kind).count()
    }

    /// Deliver `event` to every subscriber of its kind.
    ///
    /// A handler unsubscribed by an earlier handler during the same delivery
    /// is skipped. Returns the number of handlers invoked.
    pub fn publish(&self, event: &Event) -> usize {
        let kind = event.kind();
        // Snapshot so handlers can subscribe or publish while we iterate.
        let handlers: Vec<(SubscriptionId, Handler)> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|sub| sub.kind == kind)
            .map(|sub| (sub.id, Rc::clone(&sub.handler)))
            .collect();

        tracing::debug!(event = %kind, subscribers = handlers.len(), "publishing event");
        let mut invoked = 0;
        for (id, handler) in &handlers {
            if !self.is_subscribed(*id) {
                continue;
            }
            handler(event);
            invoked += 1;
        }
        invoked
    }

    fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.borrow().iter().any(|sub| sub.id == id)
    }
}
