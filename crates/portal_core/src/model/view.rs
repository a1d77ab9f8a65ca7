//! Widget view models.
//!
//! # Responsibility
//! - Define the render-ready shape consumed by each dashboard widget.
//! - Carry the small display rules every widget applies to its rows.
//!
//! # Invariants
//! - Rows are tagged with the owning student's name.
//! - Percentages are stored unrounded; rounding is a display concern.
//! - Multi-day classification is literal string inequality of the dates.

use super::filter::StudentFilter;
use super::student::{is_submitted_status, AbsenceReason, Activity, Photo};
use super::widget::WidgetKey;
use serde::Serialize;

/// Label shown in place of an end date for single-day absences.
pub const SAME_DAY_LABEL: &str = "Same day";

/// Homework widget rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkView {
    pub assignments: Vec<AssignmentRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRow {
    pub student: String,
    pub subject: String,
    pub title: String,
    pub teacher: String,
    pub set_date: String,
    pub due_date: String,
    pub status: String,
}

impl AssignmentRow {
    pub fn is_submitted(&self) -> bool {
        is_submitted_status(&self.status)
    }
}

impl HomeworkView {
    pub fn show_student_column(&self) -> bool {
        self.assignments.len() > 1
    }

    pub fn single_student(&self) -> Option<&str> {
        single_row(&self.assignments).map(|row| row.student.as_str())
    }
}

/// Timetable widget rows, one per student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleView {
    pub schedules: Vec<ScheduleRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub student: String,
    pub current_class: ClassView,
    pub next_class: ClassView,
}

/// A class slot with its time range split into start and end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassView {
    pub subject: String,
    pub teacher: String,
    pub time_slot: String,
    pub status: String,
    pub start_time: String,
    /// Empty when the slot had no ` - ` delimiter.
    pub end_time: String,
}

impl ClassView {
    /// `start - end` as rendered by the timetable.
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

impl ScheduleView {
    pub fn show_student_column(&self) -> bool {
        self.schedules.len() > 1
    }

    pub fn single_student(&self) -> Option<&str> {
        single_row(&self.schedules).map(|row| row.student.as_str())
    }
}

/// Planned absences widget rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsencesView {
    pub planned: Vec<AbsenceRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRow {
    pub student: String,
    pub start_date: String,
    /// Always populated; defaults to `start_date`.
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    pub reason: AbsenceReason,
    pub span: DaySpan,
}

/// Single-day versus multi-day classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DaySpan {
    #[serde(rename = "single day")]
    SingleDay,
    #[serde(rename = "multi-day")]
    MultiDay,
}

impl DaySpan {
    /// Classifies by comparing the date strings as written. No date parsing.
    pub fn classify(start_date: &str, end_date: &str) -> Self {
        if start_date != end_date {
            Self::MultiDay
        } else {
            Self::SingleDay
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SingleDay => "Single day",
            Self::MultiDay => "Multi-day",
        }
    }
}

impl AbsenceRow {
    pub fn is_multi_day(&self) -> bool {
        self.span == DaySpan::MultiDay
    }

    /// End column text: the end date for multi-day rows, otherwise `Same day`.
    pub fn end_label(&self) -> &str {
        match self.span {
            DaySpan::MultiDay => self.end_date.as_str(),
            DaySpan::SingleDay => SAME_DAY_LABEL,
        }
    }

    pub fn span_label(&self) -> &'static str {
        self.span.label()
    }
}

/// Text shown by the absences widget when it has no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub hint: String,
}

impl AbsencesView {
    pub fn show_student_column(&self) -> bool {
        self.planned.len() > 1
    }

    pub fn single_student(&self) -> Option<&str> {
        single_row(&self.planned).map(|row| row.student.as_str())
    }

    /// Empty-state copy, or `None` when there are rows to show.
    pub fn empty_state(&self, filter: &StudentFilter) -> Option<EmptyState> {
        if !self.planned.is_empty() {
            return None;
        }
        Some(match filter {
            StudentFilter::Named(name) => EmptyState {
                title: format!("No planned absences for {name}"),
                hint: "Switch to 'All Students' to see other absences".to_string(),
            },
            StudentFilter::All => EmptyState {
                title: "No planned absences".to_string(),
                hint: "To register an absence please use the button below".to_string(),
            },
        })
    }
}

/// Attendance widget rows, one per student.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceView {
    pub students: Vec<AttendanceRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRow {
    pub name: String,
    pub year: AttendanceFigure,
    pub term: AttendanceFigure,
}

/// Attendance for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceFigure {
    /// `present / total * 100`, unrounded.
    pub percentage: f64,
    pub present: u32,
    pub absent: u32,
    pub total: u32,
}

impl AttendanceFigure {
    /// Percentage rounded to the nearest whole number for display.
    pub fn rounded_percentage(&self) -> i64 {
        self.percentage.round() as i64
    }

    /// Present registrations as recovered from the percentage.
    pub fn present_registrations(&self) -> u32 {
        (self.percentage / 100.0 * f64::from(self.total)).round() as u32
    }

    pub fn absent_registrations(&self) -> u32 {
        self.total.saturating_sub(self.present_registrations())
    }
}

impl AttendanceView {
    pub fn show_student_column(&self) -> bool {
        self.students.len() > 1
    }

    pub fn single_student(&self) -> Option<&str> {
        single_row(&self.students).map(|row| row.name.as_str())
    }
}

/// Extracurricular widget rows, one per student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtracurricularView {
    pub students: Vec<StudentActivities>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentActivities {
    pub name: String,
    pub extra_curricular: Vec<Activity>,
}

impl ExtracurricularView {
    /// True when no student has an activity to show.
    pub fn is_empty(&self) -> bool {
        self.students
            .iter()
            .all(|student| student.extra_curricular.is_empty())
    }

    pub fn activity_count(&self) -> usize {
        self.students
            .iter()
            .map(|student| student.extra_curricular.len())
            .sum()
    }
}

/// Photo widget rows, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoView {
    pub photos: Vec<PhotoRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRow {
    pub student: String,
    #[serde(flatten)]
    pub photo: Photo,
}

impl PhotoRow {
    /// Image alt text.
    pub fn alt_text(&self) -> String {
        format!(
            "{}'s {} class - {}",
            self.student, self.photo.subject, self.photo.caption
        )
    }
}

/// All six view models for one filter value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetViews {
    pub homework: HomeworkView,
    pub schedule: ScheduleView,
    pub absences: AbsencesView,
    pub attendance: AttendanceView,
    pub extracurricular: ExtracurricularView,
    pub photos: PhotoView,
}

impl WidgetViews {
    /// Borrows the view model rendered by `key`.
    pub fn view(&self, key: WidgetKey) -> WidgetView<'_> {
        match key {
            WidgetKey::YearAttendance => WidgetView::Attendance(&self.attendance),
            WidgetKey::Homework => WidgetView::Homework(&self.homework),
            WidgetKey::NowNextClass => WidgetView::Schedule(&self.schedule),
            WidgetKey::PlannedAbsence => WidgetView::Absences(&self.absences),
            WidgetKey::Extracurricular => WidgetView::Extracurricular(&self.extracurricular),
            WidgetKey::Photos => WidgetView::Photos(&self.photos),
        }
    }
}

/// A borrowed view model of any widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WidgetView<'a> {
    Attendance(&'a AttendanceView),
    Homework(&'a HomeworkView),
    Schedule(&'a ScheduleView),
    Absences(&'a AbsencesView),
    Extracurricular(&'a ExtracurricularView),
    Photos(&'a PhotoView),
}

impl WidgetView<'_> {
    /// Number of rows the widget will list.
    pub fn row_count(&self) -> usize {
        match self {
            Self::Attendance(view) => view.students.len(),
            Self::Homework(view) => view.assignments.len(),
            Self::Schedule(view) => view.schedules.len(),
            Self::Absences(view) => view.planned.len(),
            Self::Extracurricular(view) => view.activity_count(),
            Self::Photos(view) => view.photos.len(),
        }
    }
}

fn single_row<T>(rows: &[T]) -> Option<&T> {
    match rows {
        [only] => Some(only),
        _ => None,
    }
}
