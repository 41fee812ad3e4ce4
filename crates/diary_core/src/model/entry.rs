//! Entry domain model.
//!
//! # Responsibility
//! - Define the single diary record shape shared by store, browser and UI.
//! - Validate entry content before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `content` is never empty or whitespace-only.
//! - `timestamp` is set once at creation and never modified.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one diary entry.
pub type EntryId = Uuid;

/// One diary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Identity used for deletion.
    pub id: EntryId,
    /// Free-form text as entered by the user.
    pub content: String,
    /// Creation time in Unix epoch milliseconds (UTC).
    pub timestamp: i64,
}

/// Validation failures for [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyContent,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "entry content must not be empty"),
        }
    }
}

impl Error for EntryValidationError {}

impl Entry {
    /// Creates a new entry stamped with the current time and a fresh id.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_timestamp(Uuid::new_v4(), content, Utc::now().timestamp_millis())
    }

    /// Creates an entry with caller-provided identity and timestamp.
    ///
    /// Used by the repository read path and by tests that need fixed clocks.
    pub fn with_timestamp(id: EntryId, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id,
            content: content.into(),
            timestamp,
        }
    }

    /// Checks entry invariants.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.content.trim().is_empty() {
            return Err(EntryValidationError::EmptyContent);
        }
        Ok(())
    }
}
