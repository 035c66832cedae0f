//! Persistence gateway: the only reader and writer of the stored collections.
//!
//! Two collections live in the key-value store as JSON arrays:
//! - [`PROJECTS_KEY`]: project names
//! - [`TASKS_KEY`]: flat task records (see [`TaskRecord`])
//!
//! Loads never fail. Unreadable or malformed content is reported to the
//! [`ErrorSink`] and replaced by an empty collection; individual bad entries
//! are dropped while the rest of the collection loads.

use crate::error::{Error, Result};
use crate::tasks::{Task, TaskRecord};
use crate::traits::{ErrorSink, KeyValueStore};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Store key of the project collection.
pub const PROJECTS_KEY: &str = "projects";

/// Store key of the task collection.
pub const TASKS_KEY: &str = "tasks";

/// Reads and writes whole collections through a [`KeyValueStore`].
pub struct PersistenceGateway {
    store: Box<dyn KeyValueStore>,
    sink: Rc<dyn ErrorSink>,
}

impl fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistenceGateway").finish_non_exhaustive()
    }
}

impl PersistenceGateway {
    /// Create a gateway over `store`, reporting recovered errors to `sink`.
    pub fn new(store: Box<dyn KeyValueStore>, sink: Rc<dyn ErrorSink>) -> Self {
        Self { store, sink }
    }

    /// Report a recovered error to the error sink.
    pub fn report(&self, context: &str, error: &Error) {
        self.sink.report(context, error);
    }

    /// Load project names in stored order.
    ///
    /// Blank names, non-string entries and repeated names are dropped.
    pub fn load_projects(&self) -> Vec<String> {
        let Some(entries) = self.load_array(PROJECTS_KEY, "load projects", true) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let reason = match entry {
                Value::String(name) if name.trim().is_empty() => "blank project name".to_string(),
                Value::String(name) if seen.contains(&name) => {
                    format!("duplicate project name '{name}'")
                }
                Value::String(name) => {
                    seen.insert(name.clone());
                    projects.push(name);
                    continue;
                }
                other => format!("expected a string, found {other}"),
            };
            self.report_record(PROJECTS_KEY, "load projects", index, reason);
        }
        projects
    }

    /// Overwrite the stored project collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save_projects(&self, projects: &[String]) -> Result<()> {
        let json = serde_json::to_string(projects)?;
        self.store.set(PROJECTS_KEY, &json)
    }

    /// Load tasks in stored order.
    ///
    /// Records that fail validation, or repeat an ID already loaded, are
    /// dropped and reported.
    pub fn load_tasks(&self) -> Vec<Task> {
        self.read_tasks(true)
    }

    /// Load tasks like [`load_tasks`](Self::load_tasks), without reporting
    /// anything to the error sink.
    ///
    /// Used for derived reads such as counts.
    pub fn load_tasks_quietly(&self) -> Vec<Task> {
        self.read_tasks(false)
    }

    fn read_tasks(&self, report: bool) -> Vec<Task> {
        let Some(entries) = self.load_array(TASKS_KEY, "load tasks", report) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let task = serde_json::from_value::<TaskRecord>(entry)
                .map_err(|e| e.to_string())
                .and_then(|record| Task::try_from(record).map_err(|e| e.to_string()));
            match task {
                Ok(task) if seen.contains(&task.id) => {
                    if report {
                        let reason = format!("duplicate task id '{}'", task.id);
                        self.report_record(TASKS_KEY, "load tasks", index, reason);
                    }
                }
                Ok(task) => {
                    seen.insert(task.id.clone());
                    tasks.push(task);
                }
                Err(reason) if report => {
                    self.report_record(TASKS_KEY, "load tasks", index, reason);
                }
                Err(_) => {}
            }
        }
        tasks
    }

    /// Overwrite the stored task collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &json)
    }

    /// Read `key` and parse it as a JSON array.
    ///
    /// Returns `None` when nothing is stored or the content is unusable.
    fn load_array(&self, key: &str, context: &str, report: bool) -> Option<Vec<Value>> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                if report {
                    self.report(context, &e);
                }
                return None;
            }
        };

        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(entries) => Some(entries),
            Err(e) => {
                if report {
                    self.report(context, &Error::Json(e));
                }
                None
            }
        }
    }

    fn report_record(&self, key: &str, context: &str, index: usize, reason: String) {
        let error = Error::InvalidRecord { key: key.to_string(), index, reason };
        self.report(context, &error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::NewTask;
    use crate::testing::{MemoryStore, RecordingSink};
    use chrono::NaiveDate;

    fn gateway_with(values: &[(&str, &str)]) -> (MemoryStore, Rc<RecordingSink>, PersistenceGateway) {
        let store = MemoryStore::with_values(values);
        let sink = Rc::new(RecordingSink::new());
        let gateway = PersistenceGateway::new(Box::new(store.clone()), sink.clone());
        (store, sink, gateway)
    }

    #[test]
    fn test_load_empty_store() {
        let (_store, sink, gateway) = gateway_with(&[]);
        assert!(gateway.load_projects().is_empty());
        assert!(gateway.load_tasks().is_empty());
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_projects_round_trip() {
        let (store, _sink, gateway) = gateway_with(&[]);
        let projects = vec!["Home".to_string(), "Work".to_string()];
        gateway.save_projects(&projects).unwrap();
        assert_eq!(store.raw(PROJECTS_KEY).as_deref(), Some(r#"["Home","Work"]"#));
        assert_eq!(gateway.load_projects(), projects);
    }

    #[test]
    fn test_save_is_visible_immediately() {
        let (_store, _sink, gateway) = gateway_with(&[]);
        let task = Task::create(NewTask::new("Buy milk", "Home"));
        gateway.save_tasks(std::slice::from_ref(&task)).unwrap();
        assert_eq!(gateway.load_tasks(), vec![task.clone()]);

        gateway.save_tasks(&[]).unwrap();
        assert!(gateway.load_tasks().is_empty());
    }

    #[test]
    fn test_tasks_round_trip_all_fields() {
        let (_store, _sink, gateway) = gateway_with(&[]);
        let tasks = vec![
            Task::create(
                NewTask::new("Buy milk", "Home")
                    .description("2%")
                    .due(NaiveDate::from_ymd_opt(2024, 1, 1)),
            ),
            Task::create(NewTask::new("Ship it", "Work").completed(true)),
        ];
        gateway.save_tasks(&tasks).unwrap();

        let loaded: Vec<TaskRecord> = gateway.load_tasks().iter().map(Task::to_record).collect();
        let expected: Vec<TaskRecord> = tasks.iter().map(Task::to_record).collect();
        assert_eq!(loaded, expected);
    }

    #[test]
    fn test_save_load_is_idempotent() {
        let raw = r#"[{"id":"a","title":"One","description":"","dueDate":"2024-01-01","projectId":"Home","completed":false},{"id":"b","title":"Two","description":"x","dueDate":null,"projectId":"Work","completed":true}]"#;
        let (store, _sink, gateway) = gateway_with(&[(TASKS_KEY, raw)]);

        gateway.save_tasks(&gateway.load_tasks()).unwrap();
        assert_eq!(store.raw(TASKS_KEY).as_deref(), Some(raw));
    }

    #[test]
    fn test_quiet_load_reports_nothing() {
        let raw = r#"[{"id":"a","title":"One","projectId":"Home"},{"id":"b","title":"Two","dueDate":"someday","projectId":"Home"},{"id":"a","title":"Again","projectId":"Home"}]"#;
        let (_store, sink, gateway) = gateway_with(&[(TASKS_KEY, raw)]);

        let quiet = gateway.load_tasks_quietly();
        assert_eq!(sink.count(), 0);
        assert_eq!(quiet, gateway.load_tasks());
        assert_eq!(sink.count(), 2);
    }

    #[test]
    fn test_quiet_load_of_malformed_blob() {
        let (_store, sink, gateway) = gateway_with(&[(TASKS_KEY, "{not json")]);
        assert!(gateway.load_tasks_quietly().is_empty());
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_malformed_tasks_blob_fails_soft() {
        let (_store, sink, gateway) = gateway_with(&[(TASKS_KEY, "{not json")]);
        assert!(gateway.load_tasks().is_empty());
        assert_eq!(sink.count(), 1);
        assert_eq!(sink.reports()[0].0, "load tasks");
    }

    #[test]
    fn test_tasks_blob_not_an_array() {
        let (_store, sink, gateway) = gateway_with(&[(TASKS_KEY, r#"{"id":"a"}"#)]);
        assert!(gateway.load_tasks().is_empty());
        assert_eq!(sink.count(), 1);
    }

    #[test]
    fn test_bad_task_records_are_skipped() {
        let raw = r#"[
            {"id":"a","title":"Good","projectId":"Home"},
            {"title":"No id","projectId":"Home"},
            {"id":"c","title":"Bad date","projectId":"Home","dueDate":"someday"},
            42,
            {"id":"a","title":"Duplicate","projectId":"Home"},
            {"id":"f","title":"Also good","projectId":"Work","completed":true}
        ]"#;
        let (_store, sink, gateway) = gateway_with(&[(TASKS_KEY, raw)]);

        let ids: Vec<String> = gateway.load_tasks().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["a", "f"]);
        assert_eq!(sink.count(), 4);
        assert!(sink.reports().iter().all(|(context, _)| context == "load tasks"));
        assert!(sink.reports()[3].1.contains("duplicate task id 'a'"));
    }

    #[test]
    fn test_malformed_projects_blob_fails_soft() {
        let (_store, sink, gateway) = gateway_with(&[(PROJECTS_KEY, "Home,Work")]);
        assert!(gateway.load_projects().is_empty());
        assert_eq!(sink.count(), 1);
        assert_eq!(sink.reports()[0].0, "load projects");
    }

    #[test]
    fn test_bad_project_entries_are_skipped() {
        let (_store, sink, gateway) =
            gateway_with(&[(PROJECTS_KEY, r#"["Home", 7, "  ", "Work", "Home"]"#)]);
        assert_eq!(gateway.load_projects(), ["Home", "Work"]);
        assert_eq!(sink.count(), 3);
    }

    #[test]
    fn test_save_failure_propagates() {
        let (store, _sink, gateway) = gateway_with(&[]);
        store.set_fail_writes(true);
        assert!(gateway.save_projects(&["Home".to_string()]).is_err());
        assert!(gateway.save_tasks(&[]).is_err());
    }
}
