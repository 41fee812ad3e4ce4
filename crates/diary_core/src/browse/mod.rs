//! One-entry-at-a-time browsing with inline deletion.
//!
//! # Responsibility
//! - `browser`: cursor state machine over any entry sequence.
//! - `session`: console driver that renders, reads commands and deletes.
//!
//! # Invariants
//! - The browser never reorders or re-queries its sequence.
//! - Declining a delete leaves the current entry in place.

pub mod browser;
pub mod session;

pub use browser::{BrowseCommand, EntryBrowser};
pub use session::{browse_entries, BrowseSummary};
