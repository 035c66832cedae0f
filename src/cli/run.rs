//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::board::Board;
use crate::cli::{Cli, Command, ProjectCommand, TaskCommand};
use crate::config::BoardConfig;
use crate::error::Error;
use crate::tasks::parse_due_date;
use crate::views::{RenderSink, TextRenderer};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Run a CLI command against the board configured for `base_dir`.
pub fn run(cli: Cli, base_dir: &Path) -> CliOutput {
    if matches!(cli.command, Command::Version) {
        return run_version();
    }

    let screen = Rc::new(TextRenderer::new());
    let board = match open_board(cli.db.as_deref(), base_dir, &screen) {
        Ok(board) => board,
        Err(e) => return error_output(format!("Error opening board: {e}")),
    };

    match cli.command {
        Command::Project(cmd) => run_project_cmd(&board, &screen, cmd),
        Command::Task(cmd) => run_task_cmd(&board, &screen, cmd),
        Command::Version => run_version(),
    }
}

fn open_board(
    db: Option<&Path>,
    base_dir: &Path,
    screen: &Rc<TextRenderer>,
) -> crate::error::Result<Board> {
    let mut config = BoardConfig::load_or_default(base_dir)?;
    if let Some(db) = db {
        config.database_path = Some(db.to_path_buf());
    }
    let sink: Rc<dyn RenderSink> = screen.clone();
    Board::open(&config, base_dir, sink)
}

fn run_version() -> CliOutput {
    success_output(format!("todo-board v{}", crate::VERSION))
}

// === Project Commands ===

fn run_project_cmd(board: &Board, screen: &TextRenderer, cmd: ProjectCommand) -> CliOutput {
    match cmd {
        ProjectCommand::Add { name } => match board.project_list().add_project(&name) {
            Ok(true) => lines_output(screen.project_lines()),
            Ok(false) => CliOutput {
                exit_code: ExitCode::SUCCESS,
                stdout: screen.project_lines(),
                stderr: vec![format!("Project not added: {:?} is blank or already exists", name.trim())],
            },
            Err(e) => error_output(format!("Error adding project: {e}")),
        },
        ProjectCommand::Remove { name } => {
            if !board.projects().contains(&name) {
                return error_output(format!("Project not found: {name}"));
            }
            match board.project_list().remove_project(&name) {
                Ok(_) => lines_output(screen.project_lines()),
                Err(e) => error_output(format!("Error removing project: {e}")),
            }
        }
        ProjectCommand::List => lines_output(screen.project_lines()),
    }
}

// === Task Commands ===

pub(super) fn run_task_cmd(board: &Board, screen: &TextRenderer, cmd: TaskCommand) -> CliOutput {
    match cmd {
        TaskCommand::Add { project, title, description, due } => {
            let due_date = match parse_due_date(due.as_deref().unwrap_or_default()) {
                Ok(date) => date,
                Err(e) => return error_output(format!("Error adding task: {e}")),
            };
            if !board.projects().contains(&project) {
                let e = Error::InvalidTask(format!("unknown project {project:?}"));
                return error_output(format!("Error adding task: {e}"));
            }
            board.project_list().select(&project);
            match board.task_list().submit_new_task(&title, &description, due_date) {
                Ok(task) => CliOutput {
                    exit_code: ExitCode::SUCCESS,
                    stdout: screen.task_list_lines(),
                    stderr: vec![format!("Created task: {}", task.id)],
                },
                Err(e) => error_output(format!("Error adding task: {e}")),
            }
        }
        TaskCommand::List { project } => {
            board.project_list().select(&project);
            lines_output(screen.task_list_lines())
        }
        TaskCommand::Show { id, json } => {
            if json {
                return match board.tasks().task(&id) {
                    Some(task) => json_output(&task),
                    None => error_output(format!("Task not found: {id}")),
                };
            }
            board.task_list().select_task(&id);
            if board.task_detail().current_task_id().is_none() {
                return error_output(format!("Task not found: {id}"));
            }
            lines_output(screen.task_detail_lines())
        }
        TaskCommand::Toggle { id } => {
            board.task_detail().display(&id);
            let before = board.tasks().task(&id).map(|task| task.completed);
            if !board.task_detail().request_toggle() {
                return error_output(format!("Task not found: {id}"));
            }
            let after = board.tasks().task(&id).map(|task| task.completed);
            if after.is_none() || after == before {
                return error_output(format!("Error toggling task: {id} was not updated"));
            }
            lines_output(screen.task_detail_lines())
        }
        TaskCommand::Delete { id } => {
            board.task_detail().display(&id);
            if !board.task_detail().request_delete() {
                return error_output(format!("Task not found: {id}"));
            }
            if board.tasks().task(&id).is_some() {
                return error_output(format!("Error deleting task: {id} is still stored"));
            }
            success_output(format!("Deleted task: {id}"))
        }
    }
}

// === Helper Functions ===

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: vec![] },
        Err(e) => error_output(e.to_string()),
    }
}

fn lines_output(lines: Vec<String>) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: lines, stderr: vec![] }
}

fn success_output(message: String) -> CliOutput {
    lines_output(vec![message])
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}
