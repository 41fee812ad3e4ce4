//! Diary domain model.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - Entries are immutable once created; deletion is a hard delete.

pub mod entry;
