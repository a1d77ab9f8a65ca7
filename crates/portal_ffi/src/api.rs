//! FFI use-case API for the presentation shell.
//!
//! # Responsibility
//! - Expose dashboard, absence and layout use-cases to Dart via FRB.
//! - Flatten core results into plain envelopes the UI can render directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Widget payloads are JSON strings with camelCase keys.
//! - Every envelope carries `ok` and a human-readable `message`.

use log::warn;
use portal_core::db::open_db;
use portal_core::{
    build_dashboard, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, AbsenceRequest, DashboardDocument, SqliteWidgetSettingsRepository,
    StudentFilter, WidgetConfig, WidgetKey, WidgetSettingsRepository,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const SETTINGS_DB_FILE_NAME: &str = "portal_settings.sqlite3";
static SETTINGS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One visible widget, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardWidget {
    /// Widget key (`yearAttendance|homework|...`).
    pub key: String,
    /// Heading shown above the widget.
    pub title: String,
    /// View model serialized as JSON.
    pub payload_json: String,
    /// Rows the widget lists; zero means the empty state is shown.
    pub row_count: u32,
}

/// Dashboard response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    pub message: String,
    /// Visible widgets in render order.
    pub widgets: Vec<DashboardWidget>,
    /// Non-blocking roster problems.
    pub warnings: Vec<String>,
}

impl DashboardResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            widgets: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Absence registration response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsenceActionResponse {
    pub ok: bool,
    /// Registration request ID on success.
    pub request_id: Option<String>,
    /// Registered absence as roster JSON on success.
    pub absence_json: Option<String>,
    pub message: String,
    /// `field: message` entries for each invalid form field.
    pub field_errors: Vec<String>,
}

impl AbsenceActionResponse {
    fn failure(message: impl Into<String>, field_errors: Vec<String>) -> Self {
        Self {
            ok: false,
            request_id: None,
            absence_json: None,
            message: message.into(),
            field_errors,
        }
    }
}

/// One stored layout entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetLayoutItem {
    pub key: String,
    pub visible: bool,
}

/// Stored layout response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetLayoutResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<WidgetLayoutItem>,
}

impl WidgetLayoutResponse {
    fn from_result(result: Result<WidgetConfig, String>, context: &str) -> Self {
        match result {
            Ok(config) => Self {
                ok: true,
                message: format!("{} widget(s) configured.", config.len()),
                items: config
                    .entries()
                    .iter()
                    .map(|entry| WidgetLayoutItem {
                        key: entry.key.clone(),
                        visible: entry.visible,
                    })
                    .collect(),
            },
            Err(err) => Self {
                ok: false,
                message: format!("{context} failed: {err}"),
                items: Vec::new(),
            },
        }
    }
}

/// Builds the dashboard for one document and filter value.
///
/// Input semantics:
/// - `document_json`: dashboard document (meta, parent, students, config).
/// - `filter`: `all` or an exact student name.
///
/// The document's own widget configuration wins; without one, the stored
/// layout is used.
///
/// # FFI contract
/// - Sync call; may read the settings database.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_widgets(document_json: String, filter: String) -> DashboardResponse {
    let document = match DashboardDocument::from_json_str(&document_json) {
        Ok(document) => document,
        Err(err) => return DashboardResponse::failure(format!("dashboard_widgets failed: {err}")),
    };
    let config = match document.config.as_ref() {
        Some(config) => config.widgets.clone(),
        None => match with_settings_repo(|repo| repo.load_config().map_err(|err| err.to_string()))
        {
            Ok(config) => config,
            Err(err) => {
                warn!("event=dashboard_layout module=ffi status=fallback error={err}");
                WidgetConfig::default()
            }
        },
    };

    let dashboard = match build_dashboard(
        &document.students,
        StudentFilter::parse(filter.trim()),
        &config,
    ) {
        Ok(dashboard) => dashboard,
        Err(err) => return DashboardResponse::failure(format!("dashboard_widgets failed: {err}")),
    };

    let mut widgets = Vec::with_capacity(dashboard.layout.len());
    for rendered in dashboard.rendered() {
        let payload_json = match serde_json::to_string(&rendered.view) {
            Ok(json) => json,
            Err(err) => {
                return DashboardResponse::failure(format!(
                    "dashboard_widgets failed to encode `{}`: {err}",
                    rendered.key
                ));
            }
        };
        widgets.push(DashboardWidget {
            key: rendered.key.as_str().to_string(),
            title: rendered.key.title().to_string(),
            payload_json,
            row_count: u32::try_from(rendered.view.row_count()).unwrap_or(u32::MAX),
        });
    }

    DashboardResponse {
        ok: true,
        message: format!("{} widget(s) visible.", widgets.len()),
        widgets,
        warnings: dashboard
            .issues
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Lists student names for the student selector, in roster order.
///
/// # FFI contract
/// - Never panics; an unreadable document yields an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn student_names(document_json: String) -> Vec<String> {
    match DashboardDocument::from_json_str(&document_json) {
        Ok(document) => document
            .student_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        Err(err) => {
            warn!("event=student_names module=ffi status=error error={err}");
            Vec::new()
        }
    }
}

/// Validates and registers a planned absence against the document roster.
///
/// # FFI contract
/// - Sync call, no persistence; the shell submits the returned absence.
/// - Never panics.
/// - Returns every invalid field at once in `field_errors`.
#[flutter_rust_bridge::frb(sync)]
#[allow(clippy::too_many_arguments)]
pub fn register_absence(
    document_json: String,
    student: String,
    from_date: String,
    from_time: String,
    to_date: String,
    to_time: String,
    reason: String,
    more_info: String,
) -> AbsenceActionResponse {
    let document = match DashboardDocument::from_json_str(&document_json) {
        Ok(document) => document,
        Err(err) => {
            return AbsenceActionResponse::failure(
                format!("register_absence failed: {err}"),
                Vec::new(),
            );
        }
    };

    let request = AbsenceRequest {
        student,
        from_date,
        from_time,
        to_date,
        to_time,
        reason,
        more_info,
    };
    let registered = match request.register(&document.students) {
        Ok(registered) => registered,
        Err(err) => {
            let field_errors = err
                .issues
                .iter()
                .map(|(field, message)| format!("{}: {message}", field.as_str()))
                .collect();
            return AbsenceActionResponse::failure(
                "Please correct the highlighted fields.",
                field_errors,
            );
        }
    };

    match serde_json::to_string(&registered.absence) {
        Ok(absence_json) => AbsenceActionResponse {
            ok: true,
            request_id: Some(registered.request_id.to_string()),
            absence_json: Some(absence_json),
            message: format!("Absence registered for {}.", registered.student),
            field_errors: Vec::new(),
        },
        Err(err) => AbsenceActionResponse::failure(
            format!("register_absence failed to encode absence: {err}"),
            Vec::new(),
        ),
    }
}

/// Reads the stored widget layout.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn widget_layout() -> WidgetLayoutResponse {
    WidgetLayoutResponse::from_result(
        with_settings_repo(|repo| repo.load_config().map_err(|err| err.to_string())),
        "widget_layout",
    )
}

/// Shows or hides one widget in the stored layout.
///
/// Unknown keys are rejected; a known key missing from the layout is
/// appended at the end.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn set_widget_visibility(key: String, visible: bool) -> WidgetLayoutResponse {
    let result = match WidgetKey::parse(key.trim()) {
        Some(key) => with_settings_repo(|repo| {
            repo.set_visibility(key, visible)
                .map_err(|err| err.to_string())
        }),
        None => Err(format!("unknown widget key `{}`", key.trim())),
    };
    WidgetLayoutResponse::from_result(result, "set_widget_visibility")
}

fn resolve_settings_db_path() -> PathBuf {
    SETTINGS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("PORTAL_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(SETTINGS_DB_FILE_NAME)
        })
        .clone()
}

fn with_settings_repo<T>(
    f: impl FnOnce(&mut SqliteWidgetSettingsRepository<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_settings_db_path();
    let mut conn = open_db(&db_path).map_err(|err| format!("settings DB open failed: {err}"))?;
    let mut repo = SqliteWidgetSettingsRepository::try_new(&mut conn)
        .map_err(|err| format!("settings repo init failed: {err}"))?;
    f(&mut repo)
}
