use portal_core::{
    validate_roster, AttendancePeriod, ClassPosition, DashboardDocument, RosterIssue, Student,
};

fn fixture_roster() -> Vec<Student> {
    DashboardDocument::from_json_str(include_str!("fixtures/dashboard.json"))
        .expect("fixture should parse")
        .students
}

#[test]
fn clean_roster_has_no_issues() {
    assert!(validate_roster(&fixture_roster()).is_empty());
}

#[test]
fn malformed_time_slots_are_reported_per_position() {
    let mut roster = fixture_roster();
    roster[0].current_class.time_slot = "10:30am".to_string();
    roster[1].next_class.time_slot = "11:30am - 12:30pm - 1:30pm".to_string();

    let issues = validate_roster(&roster);
    assert_eq!(
        issues,
        vec![
            RosterIssue::MalformedTimeSlot {
                student: "Sarah".to_string(),
                position: ClassPosition::Current,
                time_slot: "10:30am".to_string(),
            },
            RosterIssue::MalformedTimeSlot {
                student: "Mark".to_string(),
                position: ClassPosition::Next,
                time_slot: "11:30am - 12:30pm - 1:30pm".to_string(),
            },
        ]
    );
    assert!(issues.iter().all(|issue| !issue.is_blocking()));
}

#[test]
fn zero_totals_are_blocking_issues() {
    let mut roster = fixture_roster();
    roster[1].attendance.term.total = 0;

    let issues = validate_roster(&roster);
    assert_eq!(issues.len(), 1);
    assert_eq!(
        issues[0],
        RosterIssue::ZeroAttendanceTotal {
            student: "Mark".to_string(),
            period: AttendancePeriod::Term,
        }
    );
    assert!(issues[0].is_blocking());
    assert_eq!(issues[0].code(), "zero_attendance_total");
}

#[test]
fn invalid_photo_timestamps_and_duplicate_names_are_reported() {
    let mut roster = fixture_roster();
    roster[0].photos[0].timestamp = "18 Nov 2024".to_string();
    let mut twin = roster[1].clone();
    twin.id = "ST2024003".to_string();
    roster.push(twin);

    let issues = validate_roster(&roster);
    assert!(issues.contains(&RosterIssue::InvalidPhotoTimestamp {
        student: "Sarah".to_string(),
        photo_id: "PH1".to_string(),
        timestamp: "18 Nov 2024".to_string(),
    }));
    assert!(issues.contains(&RosterIssue::DuplicateStudentName {
        name: "Mark".to_string(),
    }));
    assert!(issues
        .iter()
        .any(|issue| issue.to_string().contains("appears more than once")));
}

#[test]
fn iso_timestamps_without_offset_are_not_flagged() {
    let mut roster = fixture_roster();
    roster[0].photos[0].timestamp = "2024-11-25T10:00:00".to_string();
    roster[0].photos[1].timestamp = "2024-11-22".to_string();
    roster[1].photos[0].timestamp = "2024-11-20T10:00:00.250+01:00".to_string();

    assert!(validate_roster(&roster).is_empty());
}
