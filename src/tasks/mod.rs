//! Tasks: the task entity, ID generation, and the task registry.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use todo_board::bus::EventBus;
//! use todo_board::gateway::PersistenceGateway;
//! use todo_board::tasks::{NewTask, TaskRegistry};
//! use todo_board::testing::{MemoryStore, RecordingSink};
//!
//! let gateway = Rc::new(PersistenceGateway::new(
//!     Box::new(MemoryStore::new()),
//!     Rc::new(RecordingSink::new()),
//! ));
//! let registry = TaskRegistry::new(gateway, Rc::new(EventBus::new()));
//!
//! let task = registry.add_task(NewTask::new("Buy milk", "Home")).unwrap();
//! assert_eq!(registry.tasks_for("Home"), vec![task]);
//! ```

pub mod id;
pub mod models;
pub mod registry;

pub use models::{parse_due_date, today, NewTask, Task, TaskRecord};
pub use registry::{compare_tasks, sort_tasks, TaskRegistry};
