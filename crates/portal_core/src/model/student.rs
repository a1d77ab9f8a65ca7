//! Student roster records.
//!
//! # Responsibility
//! - Define one student record and the per-widget item types it carries.
//! - Resolve optional list defaults once, during deserialization.
//!
//! # Invariants
//! - `name` is the identity used by the selected-student filter.
//! - Missing or `null` lists (`homework`, `absences`, `extraCurricular`,
//!   `photos`) deserialize as empty vectors.
//! - Attendance counters and class slots are required fields.

use super::null_as_default;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One student as supplied by the roster source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    /// Display name, also the exact-match key for student filtering.
    pub name: String,
    pub attendance: AttendanceSummary,
    pub current_class: ClassSlot,
    pub next_class: ClassSlot,
    #[serde(default, deserialize_with = "null_as_default")]
    pub homework: Vec<Homework>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub absences: Vec<PlannedAbsence>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extra_curricular: Vec<Activity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<Photo>,
}

/// Year and term attendance counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub year: AttendanceCounts,
    pub term: AttendanceCounts,
}

impl AttendanceSummary {
    /// Returns counters for one reporting period.
    pub fn period(&self, period: AttendancePeriod) -> AttendanceCounts {
        match period {
            AttendancePeriod::Year => self.year,
            AttendancePeriod::Term => self.term,
        }
    }
}

/// Registration counters for one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCounts {
    pub present: u32,
    pub absent: u32,
    /// Number of registrations taken. Zero is malformed input.
    pub total: u32,
}

/// Attendance reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendancePeriod {
    Year,
    Term,
}

impl AttendancePeriod {
    pub const ALL: [AttendancePeriod; 2] = [AttendancePeriod::Year, AttendancePeriod::Term];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Term => "term",
        }
    }
}

impl Display for AttendancePeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timetable entry for the current or next lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSlot {
    pub subject: String,
    pub teacher: String,
    /// Expected shape: `H:MMam - H:MMpm`.
    pub time_slot: String,
    #[serde(default)]
    pub status: String,
}

/// Which of the two timetable slots a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassPosition {
    Current,
    Next,
}

impl ClassPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Next => "next",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    pub subject: String,
    pub title: String,
    pub teacher: String,
    pub set_date: String,
    pub due_date: String,
    /// Free text; `pending` and `submitted` are the values in use.
    pub status: String,
}

impl Homework {
    pub fn is_submitted(&self) -> bool {
        is_submitted_status(&self.status)
    }
}

pub(crate) fn is_submitted_status(status: &str) -> bool {
    status.eq_ignore_ascii_case("submitted")
}

/// A planned absence as recorded for one student.
///
/// `end_date` is optional; a missing value means a single-day absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedAbsence {
    /// Start date, display formatted (for example `20 Nov 2024`).
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    pub reason: AbsenceReason,
}

impl PlannedAbsence {
    /// Returns the end date, falling back to the start date.
    pub fn resolved_end_date(&self) -> &str {
        self.end_date.as_deref().unwrap_or(self.date.as_str())
    }
}

/// Reason attached to a planned absence.
///
/// The first three variants are the values offered when registering an
/// absence; anything else on record is kept verbatim as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AbsenceReason {
    Doctor,
    Dentist,
    Illness,
    Other(String),
}

impl AbsenceReason {
    /// Reasons a parent may pick when registering a new absence.
    pub const REGISTRABLE: [AbsenceReason; 3] = [
        AbsenceReason::Doctor,
        AbsenceReason::Dentist,
        AbsenceReason::Illness,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Doctor => "Doctor",
            Self::Dentist => "Dentist",
            Self::Illness => "Illness",
            Self::Other(value) => value.as_str(),
        }
    }

    pub fn is_registrable(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for AbsenceReason {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Doctor" => Self::Doctor,
            "Dentist" => Self::Dentist,
            "Illness" => Self::Illness,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for AbsenceReason {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<AbsenceReason> for String {
    fn from(value: AbsenceReason) -> Self {
        match value {
            AbsenceReason::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for AbsenceReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An extracurricular activity booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub activity: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    /// `today` or `upcoming`.
    pub status: String,
}

impl Activity {
    pub fn is_today(&self) -> bool {
        self.status.eq_ignore_ascii_case("today")
    }

    /// `Today` for same-day activities, otherwise the booking date.
    pub fn when_label(&self) -> &str {
        if self.is_today() {
            "Today"
        } else {
            self.date.as_str()
        }
    }
}

/// An in-class photo shared with parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    pub subject: String,
    pub teacher: String,
    pub caption: String,
    pub image_url: String,
    /// Capture time, ISO 8601. A missing offset means UTC.
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Photo {
    /// Capture instant, or `None` when `timestamp` is not an ISO 8601 date.
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        parse_capture_time(&self.timestamp)
    }
}

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses an ISO 8601 capture time.
///
/// Accepts RFC 3339 (any offset), local date-times without an offset and
/// bare dates; the last two are read as UTC, a bare date as midnight.
pub fn parse_capture_time(timestamp: &str) -> Option<DateTime<Utc>> {
    let timestamp = timestamp.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(timestamp, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::{parse_capture_time, AbsenceReason, Student};

    #[test]
    fn absence_reason_keeps_unknown_values_verbatim() {
        assert_eq!(AbsenceReason::from("Dentist"), AbsenceReason::Dentist);
        let other = AbsenceReason::from("Field trip");
        assert_eq!(other, AbsenceReason::Other("Field trip".to_string()));
        assert!(!other.is_registrable());
        assert_eq!(String::from(other), "Field trip");
    }

    #[test]
    fn missing_and_null_lists_default_to_empty() {
        let value = serde_json::json!({
            "id": "ST1",
            "name": "Sarah",
            "attendance": {
                "year": { "present": 1, "absent": 0, "total": 1 },
                "term": { "present": 1, "absent": 0, "total": 1 }
            },
            "currentClass": { "subject": "Maths", "teacher": "T", "timeSlot": "9:00am - 10:00am" },
            "nextClass": { "subject": "Art", "teacher": "U", "timeSlot": "10:00am - 11:00am" },
            "homework": null
        });

        let student: Student = serde_json::from_value(value).expect("student should parse");
        assert!(student.homework.is_empty());
        assert!(student.absences.is_empty());
        assert!(student.extra_curricular.is_empty());
        assert!(student.photos.is_empty());
        assert_eq!(student.current_class.status, "");
    }

    #[test]
    fn capture_time_accepts_iso_8601_without_offset() {
        let zulu = parse_capture_time("2024-11-25T10:00:00Z").expect("rfc 3339");
        assert_eq!(parse_capture_time("2024-11-25T10:00:00"), Some(zulu));
        assert_eq!(parse_capture_time("2024-11-25T10:00:00.000"), Some(zulu));
        assert_eq!(parse_capture_time("2024-11-25T10:00"), Some(zulu));
        assert_eq!(parse_capture_time("2024-11-25T11:00:00+01:00"), Some(zulu));
        assert!(parse_capture_time("2024-11-25").is_some_and(|day| day < zulu));
        assert_eq!(parse_capture_time("25 Nov 2024"), None);
        assert_eq!(parse_capture_time(""), None);
    }
}
