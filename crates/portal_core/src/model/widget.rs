//! Widget keys and the ordered visibility configuration.
//!
//! # Responsibility
//! - Enumerate the fixed set of dashboard widgets.
//! - Hold the key -> visible mapping exactly as supplied, in insertion order.
//!
//! # Invariants
//! - `WidgetConfig` never re-sorts entries; iteration order is render order.
//! - Keys are stored raw so unknown or repeated keys survive parsing and can
//!   be reported by `WidgetConfig::resolve`.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Dashboard widget identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetKey {
    YearAttendance,
    Homework,
    NowNextClass,
    PlannedAbsence,
    Extracurricular,
    Photos,
}

impl WidgetKey {
    /// All widget keys in default render order.
    pub const ALL: [WidgetKey; 6] = [
        WidgetKey::YearAttendance,
        WidgetKey::Homework,
        WidgetKey::NowNextClass,
        WidgetKey::PlannedAbsence,
        WidgetKey::Extracurricular,
        WidgetKey::Photos,
    ];

    /// Wire name used in configuration maps.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YearAttendance => "yearAttendance",
            Self::Homework => "homework",
            Self::NowNextClass => "nowNextClass",
            Self::PlannedAbsence => "plannedAbsence",
            Self::Extracurricular => "extracurricular",
            Self::Photos => "photos",
        }
    }

    /// Parses a wire name. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }

    /// Heading shown above the widget.
    pub fn title(self) -> &'static str {
        match self {
            Self::YearAttendance => "Attendance",
            Self::Homework => "Homework",
            Self::NowNextClass => "Timetable",
            Self::PlannedAbsence => "Planned Absences",
            Self::Extracurricular => "Extracurricular Activities",
            Self::Photos => "Class Photos",
        }
    }
}

impl Display for WidgetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configuration entry as supplied by the settings source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSetting {
    /// Raw key; may be outside the known widget set.
    pub key: String,
    pub visible: bool,
}

/// Ordered widget visibility configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    entries: Vec<WidgetSetting>,
}

impl WidgetConfig {
    /// Creates an empty configuration. Nothing renders until keys are added.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builds a configuration from `(key, visible)` pairs, keeping their order.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(key, visible)| WidgetSetting {
                    key: key.into(),
                    visible,
                })
                .collect(),
        }
    }

    /// Appends one entry at the end of the render order.
    pub fn push(&mut self, key: impl Into<String>, visible: bool) {
        self.entries.push(WidgetSetting {
            key: key.into(),
            visible,
        });
    }

    /// Updates the first entry for `key`, appending it when absent.
    pub fn set_visibility(&mut self, key: WidgetKey, visible: bool) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.key == key.as_str())
        {
            Some(entry) => entry.visible = visible,
            None => self.push(key.as_str(), visible),
        }
    }

    pub fn entries(&self) -> &[WidgetSetting] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves every entry to a known key, in configuration order.
    ///
    /// # Errors
    /// - `UnknownWidget` for a key outside the fixed widget set.
    /// - `DuplicateWidget` when a key appears more than once.
    pub fn resolve(&self) -> Result<Vec<(WidgetKey, bool)>, WidgetConfigError> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        let mut resolved = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let key = WidgetKey::parse(entry.key.as_str())
                .ok_or_else(|| WidgetConfigError::UnknownWidget(entry.key.clone()))?;
            if !seen.insert(key) {
                return Err(WidgetConfigError::DuplicateWidget(key));
            }
            resolved.push((key, entry.visible));
        }
        Ok(resolved)
    }
}

impl Default for WidgetConfig {
    /// Every widget visible, in `WidgetKey::ALL` order.
    fn default() -> Self {
        Self::from_pairs(WidgetKey::ALL.into_iter().map(|key| (key.as_str(), true)))
    }
}

/// Configuration errors surfaced to the caller instead of being defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetConfigError {
    /// Configuration names a widget that has no view model.
    UnknownWidget(String),
    /// Configuration lists the same widget twice.
    DuplicateWidget(WidgetKey),
}

impl Display for WidgetConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownWidget(key) => write!(f, "unknown widget key in configuration: `{key}`"),
            Self::DuplicateWidget(key) => {
                write!(f, "widget key listed more than once in configuration: `{key}`")
            }
        }
    }
}

impl Error for WidgetConfigError {}

#[derive(Serialize, Deserialize)]
struct VisibilityFlag {
    visible: bool,
}

impl Serialize for WidgetConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(
                entry.key.as_str(),
                &VisibilityFlag {
                    visible: entry.visible,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WidgetConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WidgetConfigVisitor)
    }
}

struct WidgetConfigVisitor;

impl<'de> Visitor<'de> for WidgetConfigVisitor {
    type Value = WidgetConfig;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a map of widget key to `{ \"visible\": bool }`")
    }

    // Entries are collected as they stream in; a map type would lose order.
    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, flag)) = map.next_entry::<String, VisibilityFlag>()? {
            entries.push(WidgetSetting {
                key,
                visible: flag.visible,
            });
        }
        Ok(WidgetConfig { entries })
    }
}
