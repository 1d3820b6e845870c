use climate_story::api::{
    AnnotationAnchor, DotRule, LineWindow, STORY_SNAPSHOT_JSON_SCHEMA_V1, SceneCatalog,
    StorySnapshotJsonContractV1,
};
use climate_story::core::{Dataset, Observation, Viewport};
use climate_story::render::{DotClass, RecordingView};
use climate_story::{StoryConfig, StoryEngine, StorySnapshot};

fn dataset() -> Dataset {
    (1950..=2023)
        .map(|year| {
            let anomaly = f64::from(year - 1950) * 0.015 - 0.3;
            Observation::new(year, anomaly).expect("observation")
        })
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn config_defaults_fill_missing_fields() {
    let config = StoryConfig::from_json_str(r#"{ "viewport": { "width": 1200, "height": 600 } }"#)
        .expect("config");
    assert_eq!(config.viewport, Viewport::new(1200, 600));
    assert_eq!(config.transition_duration_ms, 1_000.0);
    assert_eq!(config.dot_radius, 4.0);
    assert_eq!(config.dataset_format.anomaly_column, "J-D");
    assert_eq!(config.dataset_format.preamble_lines, 1);
    assert_eq!(config.tooltip_offset.dx, 15.0);
    assert_eq!(config.tooltip_offset.dy, -28.0);
}

#[test]
fn config_round_trips_and_rejects_invalid_values() {
    let config = StoryConfig::default().with_dot_radius(6.0);
    let json = config.to_json_pretty().expect("json");
    assert_eq!(StoryConfig::from_json_str(&json).expect("parse"), config);

    assert!(StoryConfig::from_json_str(r#"{ "dot_radius": -1.0 }"#).is_err());
    assert!(StoryConfig::from_json_str(r#"{ "viewport": { "width": 0, "height": 10 } }"#).is_err());
    assert!(StoryConfig::from_json_str("not json").is_err());
}

#[test]
fn builtin_catalog_matches_the_story() {
    let catalog = SceneCatalog::builtin();
    assert_eq!(catalog.total_scenes(), 3);

    let scene2 = catalog.definition(2).expect("scene 2");
    assert_eq!(scene2.line_window, LineWindow::FromYear { year: 1970 });
    assert_eq!(scene2.dot_rule, DotRule::FadeBefore { year: 1970 });
    assert!(scene2.narrative.starts_with("Let's focus on the period from 1970 onwards."));

    let scene3 = catalog.definition(3).expect("scene 3");
    assert_eq!(scene3.annotation.anchor, AnnotationAnchor::LatestObservation);
    assert_eq!(scene3.annotation.callout_radius, Some(60.0));
    assert!(catalog.definition(4).is_err());
}

#[test]
fn catalog_json_drives_a_custom_story() {
    let json = r#"[
        {
            "narrative": "Only the nineties.",
            "line_window": { "kind": "year_range", "start": 1990, "end": 1999 },
            "dot_rule": { "kind": "fade_before", "year": 1990 },
            "annotation": {
                "title": "Nineties",
                "body": "A decade of records.",
                "anchor": { "kind": "calendar_point", "year": 1995, "value": 0.4 },
                "dx": 30.0,
                "dy": -30.0
            }
        }
    ]"#;
    let catalog = SceneCatalog::from_json_str(json).expect("catalog");
    assert_eq!(catalog.total_scenes(), 1);

    let engine = StoryEngine::from_dataset_with_catalog(
        RecordingView::default(),
        StoryConfig::default(),
        catalog.clone(),
        dataset(),
    )
    .expect("engine");
    let view = engine.view();
    assert_eq!(view.indicator, "Scene 1 of 1");
    assert!(!view.previous_enabled);
    assert!(!view.next_enabled);
    assert_eq!(view.line.len(), 10);

    let round_trip = SceneCatalog::from_json_str(&catalog.to_json_pretty().expect("json"))
        .expect("reparse");
    assert_eq!(round_trip, catalog);

    assert!(SceneCatalog::from_json_str("[]").is_err());
}

fn single_scene_catalog(annotation: &str) -> String {
    format!(
        r#"[
            {{
                "narrative": "One scene.",
                "line_window": {{ "kind": "all" }},
                "dot_rule": {{ "kind": "all_normal" }},
                "annotation": {annotation}
            }}
        ]"#
    )
}

#[test]
fn catalog_rejects_annotations_that_cannot_be_placed() {
    let zero_radius = single_scene_catalog(
        r#"{ "title": "T", "body": "B", "anchor": { "kind": "latest_observation" },
             "dx": -50.0, "dy": -50.0, "callout_radius": 0.0, "radius_padding": 5.0 }"#,
    );
    let err = SceneCatalog::from_json_str(&zero_radius).expect_err("zero radius");
    assert!(err.to_string().contains("scene 1"));
    assert!(err.to_string().contains("callout radius"));

    let negative_padding = single_scene_catalog(
        r#"{ "title": "T", "body": "B", "anchor": { "kind": "latest_observation" },
             "dx": -50.0, "dy": -50.0, "callout_radius": 60.0, "radius_padding": -1.0 }"#,
    );
    assert!(SceneCatalog::from_json_str(&negative_padding).is_err());

    let unrepresentable_year = single_scene_catalog(
        r#"{ "title": "T", "body": "B",
             "anchor": { "kind": "calendar_point", "year": 2147483647, "value": 0.1 },
             "dx": 10.0, "dy": 10.0 }"#,
    );
    assert!(SceneCatalog::from_json_str(&unrepresentable_year).is_err());

    let placeable = single_scene_catalog(
        r#"{ "title": "T", "body": "B", "anchor": { "kind": "latest_observation" },
             "dx": -50.0, "dy": -50.0, "callout_radius": 60.0, "radius_padding": 5.0 }"#,
    );
    assert!(SceneCatalog::from_json_str(&placeable).is_ok());
}

#[test]
fn snapshot_reflects_current_scene() {
    let mut engine =
        StoryEngine::from_dataset(RecordingView::default(), StoryConfig::default(), dataset())
            .expect("engine");
    engine.advance().expect("scene 2");

    let snapshot = engine.snapshot().expect("snapshot");
    assert_eq!(snapshot.scene, 2);
    assert_eq!(snapshot.scene_indicator, "Scene 2 of 3");
    assert!(snapshot.previous_enabled && snapshot.next_enabled);
    assert_eq!(snapshot.time_domain, (1950, 2023));
    assert_eq!(snapshot.value_domain.0, -snapshot.value_domain.1);
    assert_eq!(snapshot.line_years.first().copied(), Some(1970));
    assert_eq!(snapshot.line_years.len(), 54);
    assert_eq!(snapshot.dot_classes[&1969], DotClass::Faded);
    assert_eq!(snapshot.annotation_title, "The Acceleration");
    assert_eq!(snapshot.narrative, engine.view().narrative);
}

#[test]
fn snapshot_contract_v1_round_trips() {
    let engine =
        StoryEngine::from_dataset(RecordingView::default(), StoryConfig::default(), dataset())
            .expect("engine");
    let snapshot = engine.snapshot().expect("snapshot");

    let json = snapshot.to_json_contract_v1_pretty().expect("contract");
    let payload: StorySnapshotJsonContractV1 = serde_json::from_str(&json).expect("payload");
    assert_eq!(payload.schema_version, STORY_SNAPSHOT_JSON_SCHEMA_V1);
    assert_eq!(StorySnapshot::from_json_compat_str(&json).expect("compat"), snapshot);

    let bare = snapshot.to_json_pretty().expect("bare");
    assert_eq!(StorySnapshot::from_json_compat_str(&bare).expect("bare compat"), snapshot);

    let future = json.replacen("\"schema_version\": 1", "\"schema_version\": 2", 1);
    assert!(StorySnapshot::from_json_compat_str(&future).is_err());
}
