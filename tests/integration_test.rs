//! Integration tests for `todo_board`.

use std::rc::Rc;

use chrono::NaiveDate;
use todo_board::bus::{Event, EventKind};
use todo_board::gateway::{PersistenceGateway, PROJECTS_KEY, TASKS_KEY};
use todo_board::storage::SqliteStore;
use todo_board::tasks::{sort_tasks, NewTask, Task};
use todo_board::testing::{MemoryStore, RecordingSink};
use todo_board::traits::KeyValueStore;
use todo_board::views::TextRenderer;
use todo_board::{Board, Error, VERSION};

fn board_over(store: &MemoryStore) -> (Board, Rc<TextRenderer>, Rc<RecordingSink>) {
    let screen = Rc::new(TextRenderer::new());
    let errors = Rc::new(RecordingSink::new());
    let board = Board::new(Box::new(store.clone()), errors.clone(), screen.clone());
    (board, screen, errors)
}

#[test]
fn test_version_exists() {
    assert!(!VERSION.is_empty());
}

#[test]
fn test_overdue_task_walkthrough() {
    let store = MemoryStore::new();
    let (board, screen, errors) = board_over(&store);

    board.project_list().add_project("Home").unwrap();
    board.project_list().select("Home");
    let task = board
        .task_list()
        .submit_new_task("Buy milk", "", NaiveDate::from_ymd_opt(2024, 1, 1))
        .unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert!(task.is_overdue_on(today));
    assert_eq!(task.days_until_due_on(today), Some(-4));
    assert_eq!(task.formatted_due_date(), "Jan 1, 2024");

    let stored: serde_json::Value = serde_json::from_str(&store.raw(TASKS_KEY).unwrap()).unwrap();
    assert_eq!(
        stored,
        serde_json::json!([{
            "id": task.id,
            "title": "Buy milk",
            "description": "",
            "dueDate": "2024-01-01",
            "projectId": "Home",
            "completed": false,
        }])
    );

    board.task_list().select_task(&task.id);
    assert!(board.task_detail().request_toggle());

    let toggled = board.tasks().task(&task.id).unwrap();
    assert!(toggled.completed);
    assert!(!toggled.is_overdue_on(today));
    assert!(screen.task_list_lines()[1].starts_with("[x] Buy milk"));
    assert_eq!(errors.count(), 0);
}

#[test]
fn test_state_survives_reload() {
    let store = MemoryStore::new();
    let task_id = {
        let (board, _, _) = board_over(&store);
        board.project_list().add_project("Home").unwrap();
        board.project_list().add_project("Work").unwrap();
        board.project_list().select("Work");
        board.task_list().submit_new_task("Report", "Quarterly", None).unwrap().id
    };

    let (board, screen, _) = board_over(&store);
    assert_eq!(board.projects().projects(), ["Home", "Work"]);
    assert_eq!(screen.project_lines(), ["  Home (0)", "  Work (1)"]);
    let task = board.tasks().task(&task_id).unwrap();
    assert_eq!(task.description, "Quarterly");
    assert_eq!(task.project_id, "Work");
}

#[test]
fn test_project_names_are_unique() {
    let store = MemoryStore::new();
    let (board, _, _) = board_over(&store);

    assert!(board.projects().add_project("Home").unwrap());
    assert!(!board.projects().add_project(" Home ").unwrap());
    assert!(!board.projects().add_project("   ").unwrap());
    assert_eq!(store.raw(PROJECTS_KEY).as_deref(), Some(r#"["Home"]"#));
}

#[test]
fn test_orphaned_tasks_persist() {
    let store = MemoryStore::with_values(&[(PROJECTS_KEY, r#"["Home"]"#)]);
    let task_id = {
        let (board, _, _) = board_over(&store);
        board.project_list().select("Home");
        let id = board.task_list().submit_new_task("Mow", "", None).unwrap().id;
        board.project_list().remove_project("Home").unwrap();
        id
    };

    let (board, screen, _) = board_over(&store);
    assert!(board.projects().projects().is_empty());
    assert_eq!(screen.project_lines(), ["No projects"]);
    assert_eq!(board.tasks().tasks_for("Home")[0].id, task_id);
}

#[test]
fn test_failed_write_leaves_state_unchanged() {
    let store = MemoryStore::with_values(&[(PROJECTS_KEY, r#"["Home"]"#)]);
    let (board, _, _) = board_over(&store);
    board.project_list().select("Home");
    let task = board.task_list().submit_new_task("Mow", "", None).unwrap();

    store.set_fail_writes(true);
    assert!(board.projects().add_project("Work").is_err());
    assert!(board.tasks().toggle_task_complete(&task.id).is_err());

    assert_eq!(board.projects().projects(), ["Home"]);
    assert!(!board.tasks().task(&task.id).unwrap().completed);
}

#[test]
fn test_blank_title_is_rejected() {
    let store = MemoryStore::with_values(&[(PROJECTS_KEY, r#"["Home"]"#)]);
    let (board, _, _) = board_over(&store);
    board.project_list().select("Home");

    let err = board.task_list().submit_new_task("  ", "", None).unwrap_err();
    assert!(matches!(err, Error::InvalidTask(_)));
    assert_eq!(store.raw(TASKS_KEY), None);
}

#[test]
fn test_damaged_records_are_skipped_and_reported() {
    let store = MemoryStore::with_values(&[(
        TASKS_KEY,
        r#"[
            {"id":"a","title":"Good","projectId":"Home"},
            {"id":"b","title":"Bad date","dueDate":"someday","projectId":"Home"},
            42
        ]"#,
    )]);
    let (board, _, errors) = board_over(&store);

    let ids: Vec<String> = board.tasks().all_tasks().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, ["a"]);
    assert_eq!(errors.count(), 2);
}

#[test]
fn test_external_listener_sees_events_in_order() {
    let store = MemoryStore::with_values(&[(PROJECTS_KEY, r#"["Home"]"#)]);
    let (board, _, _) = board_over(&store);

    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let seen = Rc::clone(&seen);
        board.bus().subscribe(kind, move |event: &Event| {
            seen.borrow_mut().push(event.kind().name());
        });
    }

    board.project_list().select("Home");
    let task = board.task_list().submit_new_task("Mow", "", None).unwrap();
    board.task_list().select_task(&task.id);
    board.task_detail().request_delete();

    // The registry handles deleteTask before this listener does, so the
    // tasksUpdated it raises is delivered first.
    assert_eq!(
        *seen.borrow(),
        [
            "projectSelected",
            "taskAdded",
            "tasksUpdated",
            "taskSelected",
            "tasksUpdated",
            "deleteTask",
        ]
    );
}

#[test]
fn test_sqlite_store_backs_gateway() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = SqliteStore::with_path(dir.path().join("board.sqlite3")).unwrap();
    store.set(PROJECTS_KEY, r#"["Home","Work"]"#).unwrap();

    let gateway = PersistenceGateway::new(Box::new(store), Rc::new(RecordingSink::new()));
    assert_eq!(gateway.load_projects(), ["Home", "Work"]);

    let tasks = vec![
        Task::create(NewTask::new("Undated", "Home")),
        Task::create(NewTask::new("Dated", "Home").due(NaiveDate::from_ymd_opt(2030, 6, 1))),
    ];
    gateway.save_tasks(&tasks).unwrap();

    let sorted = sort_tasks(&gateway.load_tasks());
    assert_eq!(sorted[0].title, "Dated");
    assert_eq!(sorted[1].title, "Undated");
}
