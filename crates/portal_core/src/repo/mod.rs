//! Repository layer for persisted portal settings.
//!
//! # Responsibility
//! - Define use-case oriented settings access contracts.
//! - Keep SQLite query details out of services and FFI.
//!
//! # Invariants
//! - Writes validate the widget configuration before any SQL mutation.
//! - Reads reject invalid persisted state instead of masking it.

pub mod widget_settings_repo;
