//! Task model types for the to-do board.

use crate::error::{Error, Result};
use crate::tasks::id::generate_task_id;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

/// Storage format for due dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for due dates ("Jan 5, 2024").
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Today's calendar day in the local timezone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a stored or user-entered due date.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (reduced to its local
/// calendar day). Blank input means "no due date".
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if the input is neither blank nor a date.
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| Some(dt.with_timezone(&Local).date_naive()))
        .map_err(|_| Error::InvalidDate(trimmed.to_string()))
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// Short title describing the task.
    pub title: String,
    /// Free-text description (may be empty).
    pub description: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Name of the project the task belongs to.
    pub project_id: String,
    /// Initial completion state.
    pub completed: bool,
}

impl NewTask {
    /// Start a new incomplete task with no description or due date.
    pub fn new(title: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self { title: title.into(), project_id: project_id.into(), ..Self::default() }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the due date.
    #[must_use]
    pub const fn due(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Set the initial completion state.
    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// A task on the board.
///
/// Two tasks are equal when their IDs are equal; the other fields are
/// mutable state of the same task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "TaskRecord", try_from = "TaskRecord")]
pub struct Task {
    /// Unique identifier, assigned once at creation.
    pub id: String,
    /// Short title describing the task.
    pub title: String,
    /// Free-text description (may be empty).
    pub description: String,
    /// Optional due date, day granularity.
    pub due_date: Option<NaiveDate>,
    /// Name of the project the task belongs to. May name a removed project.
    pub project_id: String,
    /// Whether the task is done.
    pub completed: bool,
}

impl Task {
    /// Create a task with a freshly generated ID.
    ///
    /// The title is not validated here; see
    /// [`TaskRegistry::add_task`](crate::tasks::TaskRegistry::add_task).
    #[must_use]
    pub fn create(new: NewTask) -> Self {
        Self {
            id: generate_task_id(),
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            project_id: new.project_id,
            completed: new.completed,
        }
    }

    /// Flip the completion state.
    pub fn toggle_complete(&mut self) {
        self.completed = !self.completed;
    }

    /// Whether the task is past due as of today (local time).
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(today())
    }

    /// Whether the task is past due as of `today`.
    ///
    /// Completed tasks and tasks without a due date are never overdue.
    #[must_use]
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }

    /// Signed number of days from today (local time) to the due date.
    #[must_use]
    pub fn days_until_due(&self) -> Option<i64> {
        self.days_until_due_on(today())
    }

    /// Signed number of days from `today` to the due date.
    ///
    /// Negative when overdue, zero when due today, `None` without a due date.
    #[must_use]
    pub fn days_until_due_on(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }

    /// The due date as "Jan 5, 2024", or an empty string.
    #[must_use]
    pub fn formatted_due_date(&self) -> String {
        self.due_date.map(|due| due.format(DISPLAY_DATE_FORMAT).to_string()).unwrap_or_default()
    }

    /// Convert to the flat stored record.
    #[must_use]
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord::from(self.clone())
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Deserialize a string field, treating `null` as empty.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The flat six-field record a task is stored as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task ID.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Description; `null` or missing reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Due date as `YYYY-MM-DD`, or `null`.
    ///
    /// An empty string also reads as no due date. Undated tasks are always
    /// written back as `null`.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Owning project name.
    pub project_id: String,
    /// Completion flag; missing reads as `false`.
    #[serde(default)]
    pub completed: bool,
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date.map(|due| due.format(DATE_FORMAT).to_string()),
            project_id: task.project_id,
            completed: task.completed,
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = Error;

    fn try_from(record: TaskRecord) -> Result<Self> {
        if record.id.trim().is_empty() {
            return Err(Error::InvalidTask("id must not be empty".to_string()));
        }
        let due_date = match record.due_date.as_deref() {
            Some(raw) => parse_due_date(raw)?,
            None => None,
        };
        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            due_date,
            project_id: record.project_id,
            completed: record.completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_due(due: Option<NaiveDate>, completed: bool) -> Task {
        Task::create(NewTask::new("Test", "Home").due(due).completed(completed))
    }

    #[test]
    fn test_create_defaults() {
        let task = Task::create(NewTask::new("Buy milk", "Home"));
        assert!(!task.id.is_empty());
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "");
        assert_eq!(task.due_date, None);
        assert_eq!(task.project_id, "Home");
        assert!(!task.completed);
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let a = Task::create(NewTask::new("Same", "Home"));
        let b = Task::create(NewTask::new("Same", "Home"));
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_is_by_id() {
        let task = Task::create(NewTask::new("Original", "Home"));
        let mut changed = task.clone();
        changed.title = "Renamed".to_string();
        changed.toggle_complete();
        assert_eq!(task, changed);
    }

    #[test]
    fn test_toggle_complete() {
        let mut task = task_due(None, false);
        task.toggle_complete();
        assert!(task.completed);
        task.toggle_complete();
        assert!(!task.completed);
    }

    #[test]
    fn test_is_overdue() {
        let today = date(2024, 6, 15);
        assert!(task_due(Some(date(2024, 6, 14)), false).is_overdue_on(today));
        assert!(!task_due(Some(date(2024, 6, 15)), false).is_overdue_on(today));
        assert!(!task_due(Some(date(2024, 6, 16)), false).is_overdue_on(today));
        assert!(!task_due(None, false).is_overdue_on(today));
    }

    #[test]
    fn test_completed_task_never_overdue() {
        let today = date(2024, 6, 15);
        assert!(!task_due(Some(date(2020, 1, 1)), true).is_overdue_on(today));
        assert!(!task_due(None, true).is_overdue_on(today));
    }

    #[test]
    fn test_overdue_against_real_clock() {
        let task = task_due(Some(date(2024, 1, 1)), false);
        assert!(task.is_overdue());
        assert!(task.days_until_due().unwrap() < 0);
    }

    #[test]
    fn test_days_until_due() {
        let today = date(2024, 2, 27);
        assert_eq!(task_due(None, false).days_until_due_on(today), None);
        assert_eq!(task_due(Some(date(2024, 2, 27)), false).days_until_due_on(today), Some(0));
        // Crosses the leap day
        assert_eq!(task_due(Some(date(2024, 3, 1)), false).days_until_due_on(today), Some(3));
        assert_eq!(task_due(Some(date(2024, 2, 20)), false).days_until_due_on(today), Some(-7));
    }

    #[test]
    fn test_formatted_due_date() {
        assert_eq!(task_due(Some(date(2024, 1, 5)), false).formatted_due_date(), "Jan 5, 2024");
        assert_eq!(task_due(Some(date(2023, 12, 25)), false).formatted_due_date(), "Dec 25, 2023");
        assert_eq!(task_due(None, false).formatted_due_date(), "");
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date("2024-01-05").unwrap(), Some(date(2024, 1, 5)));
        assert_eq!(parse_due_date("  2024-01-05 ").unwrap(), Some(date(2024, 1, 5)));
        assert_eq!(parse_due_date("").unwrap(), None);
        assert_eq!(parse_due_date("   ").unwrap(), None);
        assert!(parse_due_date("2024-02-30").is_err());
        assert!(parse_due_date("next tuesday").is_err());
    }

    #[test]
    fn test_parse_due_date_rfc3339() {
        let parsed = parse_due_date("2024-01-05T12:00:00+00:00").unwrap().unwrap();
        // Noon UTC is Jan 4, 5 or 6 depending on the local offset.
        assert!((parsed - date(2024, 1, 5)).num_days().abs() <= 1);
    }

    #[test]
    fn test_record_json_shape() {
        let mut task = Task::create(
            NewTask::new("Buy milk", "Home").description("2%").due(Some(date(2024, 1, 1))),
        );
        task.id = "abc123".to_string();

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "abc123",
                "title": "Buy milk",
                "description": "2%",
                "dueDate": "2024-01-01",
                "projectId": "Home",
                "completed": false,
            })
        );
    }

    #[test]
    fn test_empty_due_date_is_written_back_as_null() {
        let task: Task = serde_json::from_str(
            r#"{"id":"a","title":"Mow","description":"","dueDate":"","projectId":"Home","completed":false}"#,
        )
        .unwrap();
        assert_eq!(task.due_date, None);

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], serde_json::Value::Null);
    }

    #[test]
    fn test_record_without_due_date_serializes_null() {
        let task = task_due(None, false);
        let value = serde_json::to_value(&task).unwrap();
        assert!(value["dueDate"].is_null());
    }

    #[test]
    fn test_deserialize_lenient_fields() {
        let task: Task = serde_json::from_str(
            r#"{"id":"x1","title":"T","description":null,"dueDate":"","projectId":"Home"}"#,
        )
        .unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.due_date, None);
        assert!(!task.completed);
    }

    #[test]
    fn test_deserialize_rejects_bad_records() {
        assert!(serde_json::from_str::<Task>(r#"{"title":"T","projectId":"Home"}"#).is_err());
        assert!(serde_json::from_str::<Task>(r#"{"id":"","title":"T","projectId":"Home"}"#).is_err());
        assert!(serde_json::from_str::<Task>(
            r#"{"id":"x","title":"T","projectId":"Home","dueDate":"soon"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Task>(
            r#"{"id":"x","title":"T","projectId":"Home","completed":"yes"}"#
        )
        .is_err());
    }

    fn arb_task() -> impl Strategy<Value = Task> {
        (
            "[a-z0-9]{1,16}",
            ".+",
            ".*",
            proptest::option::of((1970i32..2100, 1u32..=365)),
            ".+",
            any::<bool>(),
        )
            .prop_map(|(id, title, description, due, project_id, completed)| Task {
                id,
                title,
                description,
                due_date: due.and_then(|(year, ordinal)| NaiveDate::from_yo_opt(year, ordinal)),
                project_id,
                completed,
            })
    }

    proptest! {
        #[test]
        fn prop_serialization_preserves_all_fields(task in arb_task()) {
            let json = serde_json::to_string(&task).unwrap();
            let back: Task = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back.to_record(), task.to_record());
        }

        #[test]
        fn prop_completed_never_overdue(task in arb_task(), offset in -1000i64..1000) {
            let mut task = task;
            task.completed = true;
            let today = date(2024, 6, 15) + chrono::Duration::days(offset);
            prop_assert!(!task.is_overdue_on(today));
        }
    }
}
