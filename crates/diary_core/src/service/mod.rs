//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep console flows decoupled from storage details.

pub mod entry_service;
