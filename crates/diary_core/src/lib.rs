//! Core of the diary: entry storage, browsing and the interactive menu.
//! The binary crate only wires these to the real terminal.

pub mod browse;
pub mod config;
pub mod db;
pub mod logging;
pub mod menu;
pub mod model;
pub mod repo;
pub mod service;
pub mod ui;

pub use browse::{browse_entries, BrowseCommand, BrowseSummary, EntryBrowser};
pub use config::AppConfig;
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use menu::{CommandLoop, MenuCommand, MenuItem, MENU};
pub use model::entry::{Entry, EntryId, EntryValidationError};
pub use repo::entry_repo::{
    EntryListQuery, EntryRepository, RepoError, RepoResult, SqliteEntryRepository,
};
pub use service::entry_service::{DeleteOutcome, EntryService, EntryServiceError};
pub use ui::{ConfirmPolicy, Console, UiError, UiResult};

