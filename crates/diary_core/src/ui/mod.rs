//! Console interaction layer.
//!
//! # Responsibility
//! - Line-oriented prompts, free-form text blocks and yes/no confirmations.
//! - Human-readable rendering of entries.
//!
//! # Invariants
//! - Nothing here touches storage directly; flows receive an `EntryService`.

use crate::repo::entry_repo::RepoError;
use crate::service::entry_service::EntryServiceError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

pub mod console;
pub mod render;

pub use console::{ConfirmPolicy, Console};
pub use render::{format_timestamp, render_entry, TIMESTAMP_FORMAT};

pub type UiResult<T> = Result<T, UiError>;

/// Failure of an interactive flow.
#[derive(Debug)]
pub enum UiError {
    /// Reading the terminal or writing to it failed.
    Io(io::Error),
    /// A storage operation failed mid-flow.
    Storage(EntryServiceError),
}

impl Display for UiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console error: {err}"),
            Self::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl Error for UiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<io::Error> for UiError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<EntryServiceError> for UiError {
    fn from(value: EntryServiceError) -> Self {
        Self::Storage(value)
    }
}

impl From<RepoError> for UiError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value.into())
    }
}
