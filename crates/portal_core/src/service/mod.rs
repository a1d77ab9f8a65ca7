//! Core use-case services.
//!
//! # Responsibility
//! - Turn a roster into widget view models and pick what renders.
//! - Keep FFI/CLI layers free of projection and validation rules.

pub mod absence;
pub mod dashboard;
pub mod transform;
pub mod validation;
pub mod visibility;
