use portal_core::{
    transform_for_widgets, AbsenceReason, AttendancePeriod, DashboardDocument, DaySpan,
    EmptyState, Student, StudentFilter, TransformError, PHOTO_DISPLAY_LIMIT,
};
use serde_json::json;

fn fixture_roster() -> Vec<Student> {
    DashboardDocument::from_json_str(include_str!("fixtures/dashboard.json"))
        .expect("fixture should parse")
        .students
}

fn student(name: &str, photos: serde_json::Value) -> Student {
    serde_json::from_value(json!({
        "id": format!("ID-{name}"),
        "name": name,
        "attendance": {
            "year": { "present": 90, "absent": 10, "total": 100 },
            "term": { "present": 30, "absent": 0, "total": 30 }
        },
        "currentClass": { "subject": "Maths", "teacher": "T", "timeSlot": "9:00am - 10:00am" },
        "nextClass": { "subject": "Art", "teacher": "U", "timeSlot": "10:00am - 11:00am" },
        "photos": photos
    }))
    .expect("student should parse")
}

fn photo(id: &str, timestamp: &str) -> serde_json::Value {
    json!({
        "id": id,
        "subject": "Science",
        "teacher": "Mr. Wilson",
        "caption": "caption",
        "imageUrl": format!("/photos/{id}.jpg"),
        "timestamp": timestamp
    })
}

#[test]
fn transform_is_idempotent_for_every_filter() {
    let roster = fixture_roster();
    for filter in ["all", "Sarah", "Mark", "Nobody"] {
        let filter = StudentFilter::parse(filter);
        let first = transform_for_widgets(&roster, &filter).unwrap();
        let second = transform_for_widgets(&roster, &filter).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn all_filter_keeps_roster_order() {
    let roster = fixture_roster();
    let views = transform_for_widgets(&roster, &StudentFilter::All).unwrap();

    let names: Vec<&str> = views
        .attendance
        .students
        .iter()
        .map(|row| row.name.as_str())
        .collect();
    assert_eq!(names, vec!["Sarah", "Mark"]);

    let homework: Vec<(&str, &str)> = views
        .homework
        .assignments
        .iter()
        .map(|row| (row.student.as_str(), row.title.as_str()))
        .collect();
    assert_eq!(
        homework,
        vec![
            ("Sarah", "SOHCAHTOA"),
            ("Sarah", "Verb tables"),
            ("Mark", "Photosynthesis"),
        ]
    );
    assert!(views.homework.show_student_column());
}

#[test]
fn named_filter_yields_single_student() {
    let roster = fixture_roster();
    let views = transform_for_widgets(&roster, &StudentFilter::parse("Mark")).unwrap();

    assert_eq!(views.attendance.students.len(), 1);
    assert_eq!(views.schedule.schedules.len(), 1);
    assert_eq!(views.schedule.single_student(), Some("Mark"));
    assert_eq!(views.homework.single_student(), Some("Mark"));
    assert!(!views.homework.show_student_column());
    assert!(views
        .photos
        .photos
        .iter()
        .all(|row| row.student == "Mark"));
}

#[test]
fn filter_is_case_sensitive_and_unmatched_filter_is_empty() {
    let roster = fixture_roster();
    for filter in ["mark", "Nobody"] {
        let views = transform_for_widgets(&roster, &StudentFilter::parse(filter)).unwrap();
        assert!(views.homework.assignments.is_empty());
        assert!(views.schedule.schedules.is_empty());
        assert!(views.absences.planned.is_empty());
        assert!(views.attendance.students.is_empty());
        assert!(views.extracurricular.students.is_empty());
        assert!(views.photos.photos.is_empty());
    }
}

#[test]
fn attendance_percentage_is_exact_and_unrounded() {
    let roster = fixture_roster();
    let views = transform_for_widgets(&roster, &StudentFilter::All).unwrap();

    let mark = &views.attendance.students[1];
    assert_eq!(mark.year.percentage, 148.0 / 180.0 * 100.0);
    assert_eq!(mark.term.percentage, 51.0 / 60.0 * 100.0);
    assert_eq!(mark.year.total, 180);
    assert_eq!(mark.year.rounded_percentage(), 82);
}

#[test]
fn zero_attendance_total_is_a_configuration_error() {
    let mut roster = vec![student("Ava", json!([]))];
    roster[0].attendance.year.total = 0;
    roster[0].attendance.year.present = 0;

    let err = transform_for_widgets(&roster, &StudentFilter::All).unwrap_err();
    assert_eq!(
        err,
        TransformError::ZeroAttendanceTotal {
            student: "Ava".to_string(),
            period: AttendancePeriod::Year,
        }
    );

    // The broken record does not participate when filtered out.
    roster.push(student("Ben", json!([])));
    assert!(transform_for_widgets(&roster, &StudentFilter::parse("Ben")).is_ok());
}

#[test]
fn schedule_splits_time_slots() {
    let mut roster = fixture_roster();
    roster[1].next_class.time_slot = "after lunch".to_string();
    let views = transform_for_widgets(&roster, &StudentFilter::All).unwrap();

    let sarah = &views.schedule.schedules[0];
    assert_eq!(sarah.current_class.start_time, "10:30am");
    assert_eq!(sarah.current_class.end_time, "11:30am");
    assert_eq!(sarah.next_class.start_time, "11:30am");
    assert_eq!(sarah.next_class.end_time, "12:30pm");

    let mark = &views.schedule.schedules[1];
    assert_eq!(mark.next_class.start_time, "after lunch");
    assert_eq!(mark.next_class.end_time, "");
}

#[test]
fn absences_default_end_date_and_classify_span() {
    let roster = fixture_roster();
    let views = transform_for_widgets(&roster, &StudentFilter::All).unwrap();
    let planned = &views.absences.planned;
    assert_eq!(planned.len(), 2);

    let dentist = &planned[0];
    assert_eq!(dentist.student, "Mark");
    assert_eq!(dentist.start_date, "20 Nov 2024");
    assert_eq!(dentist.end_date, "20 Nov 2024");
    assert_eq!(dentist.span, DaySpan::SingleDay);
    assert_eq!(dentist.end_label(), "Same day");
    assert_eq!(dentist.reason, AbsenceReason::Dentist);

    let trip = &planned[1];
    assert_eq!(trip.end_date, "26 Nov 2024");
    assert_eq!(trip.span, DaySpan::MultiDay);
    assert_eq!(trip.end_label(), "26 Nov 2024");
    assert_eq!(trip.span_label(), "Multi-day");
    assert_eq!(trip.reason, AbsenceReason::Other("Field trip".to_string()));
}

#[test]
fn absences_empty_state_depends_on_filter() {
    let roster = fixture_roster();
    let filter = StudentFilter::parse("Sarah");
    let views = transform_for_widgets(&roster, &filter).unwrap();

    assert_eq!(
        views.absences.empty_state(&filter),
        Some(EmptyState {
            title: "No planned absences for Sarah".to_string(),
            hint: "Switch to 'All Students' to see other absences".to_string(),
        })
    );

    let everyone = transform_for_widgets(&roster, &StudentFilter::All).unwrap();
    assert_eq!(everyone.absences.empty_state(&StudentFilter::All), None);
}

#[test]
fn extracurricular_passes_activities_through() {
    let mut roster = fixture_roster();
    roster.push(student("Cleo", json!([])));
    let views = transform_for_widgets(&roster, &StudentFilter::All).unwrap();

    let students = &views.extracurricular.students;
    assert_eq!(students.len(), 3);
    assert_eq!(students[0].extra_curricular, roster[0].extra_curricular);
    assert_eq!(students[1].extra_curricular[0].when_label(), "Today");
    assert!(students[2].extra_curricular.is_empty());
    assert_eq!(views.extracurricular.activity_count(), 2);
    assert!(!views.extracurricular.is_empty());
}

#[test]
fn photos_are_newest_first_and_capped() {
    let roster = fixture_roster();
    let views = transform_for_widgets(&roster, &StudentFilter::All).unwrap();

    let ids: Vec<&str> = views
        .photos
        .photos
        .iter()
        .map(|row| row.photo.id.as_str())
        .collect();
    assert_eq!(PHOTO_DISPLAY_LIMIT, 6);
    assert_eq!(ids, vec!["PH2", "PH5", "PH4", "PH1", "PH6", "PH7"]);
    assert_eq!(views.photos.photos[1].student, "Mark");
    assert_eq!(
        views.photos.photos[0].alt_text(),
        "Sarah's Art class - Clay pots"
    );
}

#[test]
fn photos_under_limit_keep_all_and_ties_keep_input_order() {
    let roster = vec![
        student(
            "Ava",
            json!([
                photo("a1", "2024-11-20T10:00:00Z"),
                photo("a2", "2024-11-21T10:00:00Z"),
            ]),
        ),
        student("Ben", json!([photo("b1", "2024-11-20T10:00:00Z")])),
    ];
    let views = transform_for_widgets(&roster, &StudentFilter::All).unwrap();

    let ids: Vec<&str> = views
        .photos
        .photos
        .iter()
        .map(|row| row.photo.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a2", "a1", "b1"]);
}

#[test]
fn transform_does_not_mutate_roster() {
    let roster = fixture_roster();
    let before = roster.clone();
    let _ = transform_for_widgets(&roster, &StudentFilter::All).unwrap();
    assert_eq!(roster, before);
}

#[test]
fn photos_without_offset_are_ordered_by_capture_time() {
    let roster = vec![student(
        "Ava",
        json!([
            photo("old", "2024-11-20T10:00:00Z"),
            photo("newest_local", "2024-11-25T10:00:00"),
            photo("p3", "2024-11-19T10:00:00Z"),
            photo("p4", "2024-11-18T10:00:00Z"),
            photo("day_only", "2024-11-22"),
            photo("p6", "2024-11-16T10:00:00Z"),
            photo("p7", "2024-11-15T10:00:00Z"),
            photo("undated", "last week"),
        ]),
    )];
    let views = transform_for_widgets(&roster, &StudentFilter::All).unwrap();

    let ids: Vec<&str> = views
        .photos
        .photos
        .iter()
        .map(|row| row.photo.id.as_str())
        .collect();
    assert_eq!(ids, vec!["newest_local", "day_only", "old", "p3", "p4", "p6"]);
}
