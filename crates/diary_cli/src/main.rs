//! `diary` executable.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open storage, run the menu.
//! - Map fatal failures to a non-zero exit code.

use diary_core::{
    init_logging, open_db, AppConfig, CommandLoop, Console, EntryService, SqliteEntryRepository,
};
use log::{error, info};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match AppConfig::from_current_dir() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    // The diary still works without logs.
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=startup module=cli status=error error={err}");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let repo = match SqliteEntryRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            error!("event=startup module=cli status=error error={err}");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let service = EntryService::new(repo);

    let stdout = io::stdout();
    let clear_screen = stdout.is_terminal();
    let mut console = Console::new(io::stdin().lock(), stdout.lock());
    if !clear_screen {
        console = console.without_screen_clearing();
    }

    match CommandLoop::new(&service).run(&mut console) {
        Ok(()) => {
            info!("event=shutdown module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=shutdown module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
