//! Planned absence registration.
//!
//! # Responsibility
//! - Validate a parent's absence registration request.
//! - Convert a valid request into a roster `PlannedAbsence`.
//!
//! # Invariants
//! - Student, from date, to date and reason are required.
//! - Only `AbsenceReason::REGISTRABLE` reasons are accepted.
//! - All field problems are reported together, in form order.

use crate::model::student::{AbsenceReason, PlannedAbsence, Student};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Raw registration form input. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbsenceRequest {
    pub student: String,
    pub from_date: String,
    pub from_time: String,
    pub to_date: String,
    pub to_time: String,
    pub reason: String,
    pub more_info: String,
}

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsenceField {
    Student,
    FromDate,
    ToDate,
    Reason,
}

impl AbsenceField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::FromDate => "fromDate",
            Self::ToDate => "toDate",
            Self::Reason => "reason",
        }
    }
}

/// Validation failure with one message per offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsenceRequestError {
    pub issues: Vec<(AbsenceField, String)>,
}

impl AbsenceRequestError {
    /// Message recorded for `field`, if any.
    pub fn message_for(&self, field: AbsenceField) -> Option<&str> {
        self.issues
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, message)| message.as_str())
    }
}

impl Display for AbsenceRequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .issues
            .iter()
            .map(|(field, message)| format!("{}: {message}", field.as_str()))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "invalid absence request: {joined}")
    }
}

impl Error for AbsenceRequestError {}

/// A validated absence ready to be added to a student's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAbsence {
    /// Identifier for this registration request.
    pub request_id: Uuid,
    pub student: String,
    pub absence: PlannedAbsence,
    pub more_info: Option<String>,
}

impl AbsenceRequest {
    /// Checks required fields and roster membership.
    ///
    /// # Errors
    /// Returns every failing field at once.
    pub fn validate(&self, roster: &[Student]) -> Result<(), AbsenceRequestError> {
        let mut issues = Vec::new();

        let student = self.student.trim();
        if student.is_empty() {
            issues.push((AbsenceField::Student, "Student is required".to_string()));
        } else if !roster.iter().any(|candidate| candidate.name == student) {
            issues.push((
                AbsenceField::Student,
                format!("Student `{student}` is not on this roster"),
            ));
        }

        if self.from_date.trim().is_empty() {
            issues.push((AbsenceField::FromDate, "From date is required".to_string()));
        }
        if self.to_date.trim().is_empty() {
            issues.push((AbsenceField::ToDate, "To date is required".to_string()));
        }

        let reason = self.reason.trim();
        if reason.is_empty() {
            issues.push((AbsenceField::Reason, "Reason is required".to_string()));
        } else if !AbsenceReason::from(reason).is_registrable() {
            let allowed = AbsenceReason::REGISTRABLE
                .iter()
                .map(AbsenceReason::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            issues.push((
                AbsenceField::Reason,
                format!("Reason must be one of {allowed}"),
            ));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(AbsenceRequestError { issues })
        }
    }

    /// Validates the request and builds the planned absence it describes.
    pub fn register(&self, roster: &[Student]) -> Result<RegisteredAbsence, AbsenceRequestError> {
        self.validate(roster)?;

        let more_info = self.more_info.trim();
        let registered = RegisteredAbsence {
            request_id: Uuid::new_v4(),
            student: self.student.trim().to_string(),
            absence: self.to_planned_absence(),
            more_info: (!more_info.is_empty()).then(|| more_info.to_string()),
        };
        info!(
            "event=absence_register module=absence status=ok request_id={} span={}",
            registered.request_id,
            if registered.absence.resolved_end_date() == registered.absence.date {
                "single_day"
            } else {
                "multi_day"
            }
        );
        Ok(registered)
    }

    fn to_planned_absence(&self) -> PlannedAbsence {
        let from_date = self.from_date.trim().to_string();
        let to_date = self.to_date.trim();
        PlannedAbsence {
            end_date: (to_date != from_date).then(|| to_date.to_string()),
            date: from_date,
            start_time: self.from_time.trim().to_string(),
            end_time: self.to_time.trim().to_string(),
            reason: AbsenceReason::from(self.reason.trim()),
        }
    }
}
