//! Core domain logic for the family portal dashboard.
//! This crate owns roster shaping and widget layout rules; UI shells only
//! render what it returns.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::document::{DashboardDocument, DocumentError, DocumentMeta, Parent};
pub use model::filter::{StudentFilter, ALL_STUDENTS};
pub use model::student::{
    AbsenceReason, Activity, AttendanceCounts, AttendancePeriod, AttendanceSummary, ClassPosition,
    ClassSlot, Homework, Photo, PlannedAbsence, Student,
};
pub use model::view::{
    AbsenceRow, AbsencesView, AssignmentRow, AttendanceFigure, AttendanceRow, AttendanceView,
    ClassView, DaySpan, EmptyState, ExtracurricularView, HomeworkView, PhotoRow, PhotoView,
    ScheduleRow, ScheduleView, StudentActivities, WidgetView, WidgetViews,
};
pub use model::widget::{WidgetConfig, WidgetConfigError, WidgetKey, WidgetSetting};
pub use repo::widget_settings_repo::{
    SettingsError, SettingsResult, SqliteWidgetSettingsRepository, WidgetSettingsRepository,
};
pub use service::absence::{AbsenceField, AbsenceRequest, AbsenceRequestError, RegisteredAbsence};
pub use service::dashboard::{build_dashboard, Dashboard, DashboardError};
pub use service::transform::{
    split_time_slot, transform_for_widgets, TransformError, PHOTO_DISPLAY_LIMIT,
};
pub use service::validation::{validate_roster, RosterIssue};
pub use service::visibility::{resolve_widgets, visible_keys, RenderedWidget};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
