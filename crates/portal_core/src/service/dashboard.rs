//! Dashboard assembly use-case.
//!
//! # Responsibility
//! - Run validation, transformation and visibility resolution in one call.
//! - Own the result so UI callers can hold it across renders.
//!
//! # Invariants
//! - `layout` only contains visible keys, in configuration order.
//! - `issues` come from the unfiltered roster, independent of the filter.

use crate::model::filter::StudentFilter;
use crate::model::student::Student;
use crate::model::view::WidgetViews;
use crate::model::widget::{WidgetConfig, WidgetConfigError, WidgetKey};
use crate::service::transform::{transform_for_widgets, TransformError};
use crate::service::validation::{validate_roster, RosterIssue};
use crate::service::visibility::{visible_keys, RenderedWidget};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from assembling a dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    Transform(TransformError),
    Config(WidgetConfigError),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transform(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transform(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<TransformError> for DashboardError {
    fn from(value: TransformError) -> Self {
        Self::Transform(value)
    }
}

impl From<WidgetConfigError> for DashboardError {
    fn from(value: WidgetConfigError) -> Self {
        Self::Config(value)
    }
}

/// Render-ready dashboard for one filter value.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub filter: StudentFilter,
    pub views: WidgetViews,
    /// Visible widgets in render order.
    pub layout: Vec<WidgetKey>,
    /// Non-blocking roster anomalies worth showing to an operator.
    pub issues: Vec<RosterIssue>,
}

impl Dashboard {
    /// Visible widgets paired with their view models.
    pub fn rendered(&self) -> Vec<RenderedWidget<'_>> {
        self.layout
            .iter()
            .map(|&key| RenderedWidget {
                key,
                view: self.views.view(key),
            })
            .collect()
    }
}

/// Builds the dashboard for `filter` using `config` for layout.
///
/// Configuration is checked before the roster is projected, so a bad
/// layout is reported even when the roster is fine.
pub fn build_dashboard(
    roster: &[Student],
    filter: StudentFilter,
    config: &WidgetConfig,
) -> Result<Dashboard, DashboardError> {
    let layout = visible_keys(config)?;
    let views = transform_for_widgets(roster, &filter)?;
    let issues = validate_roster(roster)
        .into_iter()
        .filter(|issue| !issue.is_blocking())
        .collect();

    Ok(Dashboard {
        filter,
        views,
        layout,
        issues,
    })
}
