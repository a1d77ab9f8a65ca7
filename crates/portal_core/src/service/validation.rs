//! Roster validation pass.
//!
//! # Responsibility
//! - Report roster anomalies that the transformer tolerates or rejects,
//!   so callers can surface them before rendering.
//!
//! # Invariants
//! - Validation never mutates or reorders the roster.
//! - Issues are reported in roster order.

use crate::model::student::{AttendancePeriod, ClassPosition, ClassSlot, Student};
use crate::service::transform::TIME_SLOT_DELIMITER;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

static CLOCK_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(1[0-2]|0?[1-9]):[0-5][0-9](am|pm)$").expect("valid clock time regex")
});

/// One anomaly found in the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterIssue {
    /// Slot does not read `H:MMam - H:MMpm`.
    MalformedTimeSlot {
        student: String,
        position: ClassPosition,
        time_slot: String,
    },
    /// Attendance total is zero; the transformer rejects this roster.
    ZeroAttendanceTotal {
        student: String,
        period: AttendancePeriod,
    },
    /// Photo timestamp is not an ISO 8601 date; the photo sorts last.
    InvalidPhotoTimestamp {
        student: String,
        photo_id: String,
        timestamp: String,
    },
    /// Two students share a name, so the filter cannot tell them apart.
    DuplicateStudentName { name: String },
}

impl RosterIssue {
    /// Issues that make `transform_for_widgets` fail.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::ZeroAttendanceTotal { .. })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedTimeSlot { .. } => "malformed_time_slot",
            Self::ZeroAttendanceTotal { .. } => "zero_attendance_total",
            Self::InvalidPhotoTimestamp { .. } => "invalid_photo_timestamp",
            Self::DuplicateStudentName { .. } => "duplicate_student_name",
        }
    }
}

impl Display for RosterIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedTimeSlot {
                student,
                position,
                time_slot,
            } => write!(
                f,
                "{} class time slot for `{student}` is malformed: `{time_slot}`",
                position.as_str()
            ),
            Self::ZeroAttendanceTotal { student, period } => {
                write!(f, "attendance {period} total for `{student}` is zero")
            }
            Self::InvalidPhotoTimestamp {
                student,
                photo_id,
                timestamp,
            } => write!(
                f,
                "photo `{photo_id}` for `{student}` has invalid timestamp `{timestamp}`"
            ),
            Self::DuplicateStudentName { name } => {
                write!(f, "student name `{name}` appears more than once")
            }
        }
    }
}

/// Checks every student and returns all issues found.
pub fn validate_roster(roster: &[Student]) -> Vec<RosterIssue> {
    let mut issues = Vec::new();
    let mut names = HashSet::with_capacity(roster.len());

    for student in roster {
        if !names.insert(student.name.as_str()) {
            issues.push(RosterIssue::DuplicateStudentName {
                name: student.name.clone(),
            });
        }

        for (position, slot) in [
            (ClassPosition::Current, &student.current_class),
            (ClassPosition::Next, &student.next_class),
        ] {
            if !is_well_formed_slot(slot) {
                issues.push(RosterIssue::MalformedTimeSlot {
                    student: student.name.clone(),
                    position,
                    time_slot: slot.time_slot.clone(),
                });
            }
        }

        for period in AttendancePeriod::ALL {
            if student.attendance.period(period).total == 0 {
                issues.push(RosterIssue::ZeroAttendanceTotal {
                    student: student.name.clone(),
                    period,
                });
            }
        }

        for photo in &student.photos {
            if photo.captured_at().is_none() {
                issues.push(RosterIssue::InvalidPhotoTimestamp {
                    student: student.name.clone(),
                    photo_id: photo.id.clone(),
                    timestamp: photo.timestamp.clone(),
                });
            }
        }
    }

    if !issues.is_empty() {
        info!(
            "event=roster_validate module=validation status=issues roster_len={} issues={}",
            roster.len(),
            issues.len()
        );
    }
    issues
}

/// True when the slot has exactly one delimiter between two clock times.
pub fn is_well_formed_slot(slot: &ClassSlot) -> bool {
    let parts: Vec<&str> = slot.time_slot.split(TIME_SLOT_DELIMITER).collect();
    match parts.as_slice() {
        [start, end] => is_clock_time(start) && is_clock_time(end),
        _ => false,
    }
}

fn is_clock_time(value: &str) -> bool {
    CLOCK_TIME_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::is_clock_time;

    #[test]
    fn clock_time_accepts_twelve_hour_times() {
        assert!(is_clock_time("10:30am"));
        assert!(is_clock_time("1:00pm"));
        assert!(is_clock_time("12:30pm"));
        assert!(!is_clock_time("13:00pm"));
        assert!(!is_clock_time("10:30"));
        assert!(!is_clock_time("10:30 am"));
    }
}
