//! Dashboard document envelope.
//!
//! The document is what a data source hands to the portal: freshness
//! metadata, the signed-in parent, the roster, and optionally the widget
//! configuration stored alongside it.

use super::null_as_default;
use super::student::Student;
use super::widget::WidgetConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Full dashboard payload for one parent/guardian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDocument {
    #[serde(default)]
    pub meta: DocumentMeta,
    pub parent: Parent,
    #[serde(default, deserialize_with = "null_as_default")]
    pub students: Vec<Student>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<DocumentConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    /// Last refresh time, RFC 3339.
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub environment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub preferred_language: String,
    #[serde(default)]
    pub relationship: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub widgets: WidgetConfig,
}

impl DashboardDocument {
    /// Parses a document from JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(raw).map_err(DocumentError::Parse)
    }

    /// Student names in roster order, as offered by the student selector.
    pub fn student_names(&self) -> Vec<&str> {
        self.students.iter().map(|s| s.name.as_str()).collect()
    }

    /// Widget configuration carried by the document, or the default layout.
    pub fn widget_config(&self) -> WidgetConfig {
        self.config
            .as_ref()
            .map(|config| config.widgets.clone())
            .unwrap_or_default()
    }
}

/// Document decoding error.
#[derive(Debug)]
pub enum DocumentError {
    Parse(serde_json::Error),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid dashboard document: {err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}
