//! Domain model for the family portal dashboard.
//!
//! # Responsibility
//! - Define the roster shape consumed by widget projections.
//! - Define the widget keys and the ordered visibility configuration.
//! - Define the widget-shaped view models produced by the transformer.
//!
//! # Invariants
//! - Roster entities are read-only once deserialized.
//! - Optional list fields are normalized to empty sequences at the
//!   deserialization boundary, never inside projections.

pub mod document;
pub mod filter;
pub mod student;
pub mod view;
pub mod widget;

use serde::{Deserialize, Deserializer};

/// Deserializes a missing or `null` value as `T::default()`.
///
/// Paired with `#[serde(default)]` so both absent keys and explicit nulls
/// resolve to the same empty value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
