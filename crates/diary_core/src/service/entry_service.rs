//! Entry use-case service.
//!
//! # Responsibility
//! - Provide the store operations used by the interactive flows: create,
//!   list newest-first, substring search, delete.
//! - Translate repository outcomes into use-case results.
//!
//! # Invariants
//! - Created entries are read back before being returned.
//! - Deleting an entry that is already gone is not an error.

use crate::model::entry::{Entry, EntryId, EntryValidationError};
use crate::repo::entry_repo::{EntryListQuery, EntryRepository, RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for entry use-cases.
#[derive(Debug)]
pub enum EntryServiceError {
    /// Entry input violates model invariants.
    InvalidEntry(EntryValidationError),
    /// Target entry does not exist.
    EntryNotFound(EntryId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Write succeeded but read-back disagreed.
    InconsistentState(&'static str),
}

impl EntryServiceError {
    /// See [`RepoError::is_connection_lost`].
    pub fn is_connection_lost(&self) -> bool {
        matches!(self, Self::Repo(err) if err.is_connection_lost())
    }
}

impl Display for EntryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEntry(err) => write!(f, "invalid entry: {err}"),
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent entry state: {details}"),
        }
    }
}

impl Error for EntryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEntry(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EntryServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EntryNotFound(id),
            RepoError::Validation(err) => Self::InvalidEntry(err),
            other => Self::Repo(other),
        }
    }
}

/// Result of [`EntryService::delete_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// No row matched; the entry was removed earlier.
    AlreadyDeleted,
}

/// Entry service facade over repository implementations.
pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one entry stamped with the current time.
    ///
    /// Callers trim user input first; empty or whitespace-only content is
    /// rejected and nothing is written.
    pub fn create_entry(&self, content: impl Into<String>) -> Result<Entry, EntryServiceError> {
        let entry = Entry::new(content);
        let id = self.repo.create_entry(&entry)?;
        info!(
            "event=entry_create module=service status=ok entry_id={} content_len={}",
            id,
            entry.content.len()
        );
        self.repo
            .get_entry(id)?
            .ok_or(EntryServiceError::InconsistentState(
                "created entry not found in read-back",
            ))
    }

    /// Lists every entry, newest first. Each call re-queries storage.
    pub fn list_descending(&self) -> RepoResult<Vec<Entry>> {
        self.repo.list_entries(&EntryListQuery::all())
    }

    /// Lists entries whose content contains `needle`, newest first.
    ///
    /// An empty needle lists everything.
    pub fn search(&self, needle: &str) -> RepoResult<Vec<Entry>> {
        self.repo.list_entries(&EntryListQuery::containing(needle))
    }

    /// Deletes `entry` by identity.
    pub fn delete_entry(&self, entry: &Entry) -> Result<DeleteOutcome, EntryServiceError> {
        match self.repo.delete_entry(entry.id) {
            Ok(()) => {
                info!(
                    "event=entry_delete module=service status=ok entry_id={}",
                    entry.id
                );
                Ok(DeleteOutcome::Deleted)
            }
            Err(RepoError::NotFound(id)) => {
                warn!("event=entry_delete module=service status=noop reason=not_found entry_id={id}");
                Ok(DeleteOutcome::AlreadyDeleted)
            }
            Err(err) => Err(err.into()),
        }
    }
}
