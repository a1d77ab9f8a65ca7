//! Roster to widget view-model transformer.
//!
//! # Responsibility
//! - Filter the roster by the selected student.
//! - Project the filtered roster into the six widget view models.
//!
//! # Invariants
//! - Pure: the roster is only borrowed, every call allocates fresh output.
//! - Row order follows roster order, then list order within a student,
//!   except photos which are ordered newest first.
//! - A zero attendance total is reported, never turned into NaN/inf.
//! - Time slots without a ` - ` delimiter are split best-effort, never fail.

use crate::model::filter::StudentFilter;
use crate::model::student::{
    parse_capture_time, AttendanceCounts, AttendancePeriod, ClassSlot, Student,
};
use crate::model::view::{
    AbsenceRow, AbsencesView, AssignmentRow, AttendanceFigure, AttendanceRow, AttendanceView,
    ClassView, DaySpan, ExtracurricularView, HomeworkView, PhotoRow, PhotoView, ScheduleRow,
    ScheduleView, StudentActivities, WidgetViews,
};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::cmp::Reverse;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum number of photos the photo widget shows.
pub const PHOTO_DISPLAY_LIMIT: usize = 6;

/// Delimiter between start and end in a class time slot.
pub const TIME_SLOT_DELIMITER: &str = " - ";

/// Transformer error. Every variant indicates malformed roster data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Attendance `total` is zero, so no percentage exists.
    ZeroAttendanceTotal {
        student: String,
        period: AttendancePeriod,
    },
}

impl Display for TransformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroAttendanceTotal { student, period } => write!(
                f,
                "attendance {period} total for `{student}` must be greater than zero"
            ),
        }
    }
}

impl Error for TransformError {}

/// Builds all six widget view models for `filter`.
///
/// A filter that matches nobody yields six empty view models, not an error.
///
/// # Errors
/// - `ZeroAttendanceTotal` when a participating student has a year or term
///   total of zero.
pub fn transform_for_widgets(
    roster: &[Student],
    filter: &StudentFilter,
) -> Result<WidgetViews, TransformError> {
    let students = filter.apply(roster);

    let attendance = match attendance_view(&students) {
        Ok(view) => view,
        Err(err) => {
            warn!(
                "event=widgets_transform module=transform status=error error_code=zero_attendance_total filter_all={} roster_len={}",
                filter.is_all(),
                roster.len()
            );
            return Err(err);
        }
    };

    let views = WidgetViews {
        homework: homework_view(&students),
        schedule: schedule_view(&students),
        absences: absences_view(&students),
        attendance,
        extracurricular: extracurricular_view(&students),
        photos: photo_view(&students),
    };

    debug!(
        "event=widgets_transform module=transform status=ok filter_all={} roster_len={} matched={} homework={} absences={} photos={}",
        filter.is_all(),
        roster.len(),
        students.len(),
        views.homework.assignments.len(),
        views.absences.planned.len(),
        views.photos.photos.len()
    );
    Ok(views)
}

/// Flattens homework into one row per item, tagged with the student.
pub fn homework_view(students: &[&Student]) -> HomeworkView {
    let assignments = students
        .iter()
        .flat_map(|student| {
            student.homework.iter().map(|hw| AssignmentRow {
                student: student.name.clone(),
                subject: hw.subject.clone(),
                title: hw.title.clone(),
                teacher: hw.teacher.clone(),
                set_date: hw.set_date.clone(),
                due_date: hw.due_date.clone(),
                status: hw.status.clone(),
            })
        })
        .collect();
    HomeworkView { assignments }
}

/// One timetable row per student with split class times.
pub fn schedule_view(students: &[&Student]) -> ScheduleView {
    let schedules = students
        .iter()
        .map(|student| ScheduleRow {
            student: student.name.clone(),
            current_class: class_view(&student.current_class),
            next_class: class_view(&student.next_class),
        })
        .collect();
    ScheduleView { schedules }
}

/// Splits `start - end` into its two halves.
///
/// The end is everything after the first delimiter. Without a delimiter the
/// whole slot becomes the start and the end is empty.
pub fn split_time_slot(time_slot: &str) -> (&str, &str) {
    time_slot
        .split_once(TIME_SLOT_DELIMITER)
        .unwrap_or((time_slot, ""))
}

fn class_view(slot: &ClassSlot) -> ClassView {
    let (start, end) = split_time_slot(&slot.time_slot);
    ClassView {
        subject: slot.subject.clone(),
        teacher: slot.teacher.clone(),
        time_slot: slot.time_slot.clone(),
        status: slot.status.clone(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

/// Flattens planned absences, resolving the end date and day span.
pub fn absences_view(students: &[&Student]) -> AbsencesView {
    let planned = students
        .iter()
        .flat_map(|student| {
            student.absences.iter().map(|absence| {
                let end_date = absence.resolved_end_date();
                AbsenceRow {
                    student: student.name.clone(),
                    start_date: absence.date.clone(),
                    end_date: end_date.to_string(),
                    start_time: absence.start_time.clone(),
                    end_time: absence.end_time.clone(),
                    reason: absence.reason.clone(),
                    span: DaySpan::classify(&absence.date, end_date),
                }
            })
        })
        .collect();
    AbsencesView { planned }
}

/// Year and term attendance per student.
///
/// # Errors
/// - `ZeroAttendanceTotal` for the first period with `total == 0`.
pub fn attendance_view(students: &[&Student]) -> Result<AttendanceView, TransformError> {
    let rows = students
        .iter()
        .map(|student| {
            Ok(AttendanceRow {
                name: student.name.clone(),
                year: attendance_figure(student, AttendancePeriod::Year)?,
                term: attendance_figure(student, AttendancePeriod::Term)?,
            })
        })
        .collect::<Result<Vec<_>, TransformError>>()?;
    Ok(AttendanceView { students: rows })
}

fn attendance_figure(
    student: &Student,
    period: AttendancePeriod,
) -> Result<AttendanceFigure, TransformError> {
    let AttendanceCounts {
        present,
        absent,
        total,
    } = student.attendance.period(period);
    if total == 0 {
        return Err(TransformError::ZeroAttendanceTotal {
            student: student.name.clone(),
            period,
        });
    }
    Ok(AttendanceFigure {
        percentage: f64::from(present) / f64::from(total) * 100.0,
        present,
        absent,
        total,
    })
}

/// Passes each student's activities through, tagged with the name.
pub fn extracurricular_view(students: &[&Student]) -> ExtracurricularView {
    let students = students
        .iter()
        .map(|student| StudentActivities {
            name: student.name.clone(),
            extra_curricular: student.extra_curricular.clone(),
        })
        .collect();
    ExtracurricularView { students }
}

/// Most recent photos across the filtered students, newest first.
///
/// Ties keep input order. Timestamps without an offset count as UTC; text
/// that is not an ISO 8601 date sorts after every dated photo, newest-first
/// by its raw text.
pub fn photo_view(students: &[&Student]) -> PhotoView {
    let mut photos: Vec<PhotoRow> = students
        .iter()
        .flat_map(|student| {
            student.photos.iter().map(|photo| PhotoRow {
                student: student.name.clone(),
                photo: photo.clone(),
            })
        })
        .collect();
    // Stable: equal keys keep their flattened order.
    photos.sort_by_cached_key(|row| photo_sort_key(&row.photo.timestamp));
    photos.truncate(PHOTO_DISPLAY_LIMIT);
    PhotoView { photos }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PhotoSortKey {
    Dated(Reverse<DateTime<Utc>>),
    Undated(Reverse<String>),
}

fn photo_sort_key(timestamp: &str) -> PhotoSortKey {
    match parse_capture_time(timestamp) {
        Some(captured_at) => PhotoSortKey::Dated(Reverse(captured_at)),
        None => PhotoSortKey::Undated(Reverse(timestamp.to_string())),
    }
}
