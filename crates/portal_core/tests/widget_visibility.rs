use portal_core::{
    resolve_widgets, transform_for_widgets, DashboardDocument, StudentFilter, WidgetConfig,
    WidgetConfigError, WidgetKey, WidgetView, WidgetViews,
};

fn fixture_views() -> WidgetViews {
    let document = DashboardDocument::from_json_str(include_str!("fixtures/dashboard.json"))
        .expect("fixture should parse");
    transform_for_widgets(&document.students, &StudentFilter::All).expect("transform")
}

#[test]
fn hidden_widgets_are_skipped_in_configuration_order() {
    let views = fixture_views();
    let config = WidgetConfig::from_pairs([
        ("yearAttendance", true),
        ("homework", false),
        ("photos", true),
    ]);

    let rendered = resolve_widgets(&config, &views).unwrap();
    let keys: Vec<WidgetKey> = rendered.iter().map(|widget| widget.key).collect();
    assert_eq!(keys, vec![WidgetKey::YearAttendance, WidgetKey::Photos]);
}

#[test]
fn rendered_widgets_borrow_the_matching_view_model() {
    let views = fixture_views();
    let config = WidgetConfig::from_pairs([("photos", true), ("nowNextClass", true)]);

    let rendered = resolve_widgets(&config, &views).unwrap();
    assert!(matches!(rendered[0].view, WidgetView::Photos(view) if view == &views.photos));
    assert!(matches!(rendered[1].view, WidgetView::Schedule(view) if view == &views.schedule));
    assert_eq!(rendered[0].view.row_count(), 6);
}

#[test]
fn unconfigured_widgets_never_render() {
    let views = fixture_views();
    let config = WidgetConfig::from_pairs([("homework", true)]);

    let rendered = resolve_widgets(&config, &views).unwrap();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].key, WidgetKey::Homework);
}

#[test]
fn unknown_widget_key_is_a_configuration_error() {
    let views = fixture_views();
    let config = WidgetConfig::from_pairs([("homework", true), ("lunchMenu", false)]);

    let err = resolve_widgets(&config, &views).unwrap_err();
    assert_eq!(err, WidgetConfigError::UnknownWidget("lunchMenu".to_string()));
}

#[test]
fn repeated_widget_key_is_a_configuration_error() {
    let views = fixture_views();
    let config = WidgetConfig::from_pairs([("photos", true), ("photos", true)]);

    let err = resolve_widgets(&config, &views).unwrap_err();
    assert_eq!(err, WidgetConfigError::DuplicateWidget(WidgetKey::Photos));
}

#[test]
fn default_configuration_shows_every_widget() {
    let views = fixture_views();
    let rendered = resolve_widgets(&WidgetConfig::default(), &views).unwrap();
    let keys: Vec<WidgetKey> = rendered.iter().map(|widget| widget.key).collect();
    assert_eq!(keys, WidgetKey::ALL.to_vec());
}

#[test]
fn document_configuration_keeps_json_order() {
    let raw = r#"{
        "parent": { "id": "P1", "name": "Guardian" },
        "students": [],
        "config": { "widgets": {
            "photos": { "visible": true },
            "yearAttendance": { "visible": true },
            "homework": { "visible": true }
        } }
    }"#;
    let document = DashboardDocument::from_json_str(raw).unwrap();
    let views = transform_for_widgets(&document.students, &StudentFilter::All).unwrap();

    let rendered = resolve_widgets(&document.widget_config(), &views).unwrap();
    let keys: Vec<WidgetKey> = rendered.iter().map(|widget| widget.key).collect();
    assert_eq!(
        keys,
        vec![WidgetKey::Photos, WidgetKey::YearAttendance, WidgetKey::Homework]
    );
}
