//! CLI binary for `todo_board`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the library.

use std::env;
use std::process::ExitCode;

use clap::Parser;
use todo_board::cli::{run, Cli};
use todo_board::config::BoardConfig;
use todo_board::telemetry;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let base_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error reading current directory: {e}");
            return ExitCode::from(1);
        }
    };

    let log_level = BoardConfig::load_from(&base_dir).ok().flatten().and_then(|c| c.log_level);
    telemetry::init_logging(log_level.as_deref());

    let output = run(cli, &base_dir);

    for line in output.stdout {
        println!("{line}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}
