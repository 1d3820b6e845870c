use climate_story::api::{SceneCatalog, StoryAxes, classify_dots, render_scene};
use climate_story::api::{DotRule, SceneRenderOptions};
use climate_story::core::{Dataset, Observation, project_line_path};
use climate_story::data::{DatasetFormat, DatasetSource, load_dataset};
use climate_story::render::{DotClass, NavControl, RecordingView, TransitionSpec, ViewCall};
use climate_story::{StoryConfig, StoryEngine};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gistemp_sample.csv");

fn dataset(rows: &[(i32, f64)]) -> Dataset {
    rows.iter()
        .map(|(year, anomaly)| Observation::new(*year, *anomaly).expect("observation"))
        .collect::<Vec<_>>()
        .into()
}

fn fixture() -> Dataset {
    load_dataset(&DatasetSource::parse(FIXTURE), &DatasetFormat::default()).expect("fixture")
}

fn options(config: &StoryConfig) -> SceneRenderOptions {
    SceneRenderOptions {
        transition: TransitionSpec {
            duration_ms: config.transition_duration_ms,
        },
        dot_radius: config.dot_radius,
        annotation_layout: config.annotation_layout,
    }
}

fn years_with(view: &RecordingView, class: DotClass) -> Vec<i32> {
    view.dot_classes
        .iter()
        .filter(|(_, c)| **c == class)
        .map(|(year, _)| *year)
        .collect()
}

fn end_to_end_rows() -> Vec<(i32, f64)> {
    let mut rows = vec![(1880, -0.20), (1970, 0.10), (2020, 1.25), (2021, 1.30)];
    for (offset, year) in (2012..2020).enumerate() {
        rows.push((year, 1.26 + offset as f64 * 0.01));
    }
    rows.sort_by_key(|(year, _)| *year);
    rows
}

#[test]
fn end_to_end_scene_three_then_two() {
    let data = dataset(&end_to_end_rows());
    let mut engine = StoryEngine::from_dataset(RecordingView::default(), StoryConfig::default(), data)
        .expect("engine");

    engine.render_scene(3).expect("scene 3");
    let view = engine.view();
    let mut highlighted = years_with(view, DotClass::Highlighted);
    highlighted.sort_unstable();
    let mut expected: Vec<i32> = (2012..=2021).collect();
    expected.sort_unstable();
    assert_eq!(highlighted, expected);
    assert_eq!(years_with(view, DotClass::Faded), vec![1880, 1970]);

    engine.render_scene(2).expect("scene 2");
    let view = engine.view();
    assert_eq!(view.line.len(), 11);
    assert_eq!(view.dot_classes[&1880], DotClass::Faded);
    assert_eq!(view.dot_classes[&1970], DotClass::Normal);
    assert_eq!(view.dot_classes[&2021], DotClass::Normal);
}

#[test]
fn scene_two_line_is_exactly_the_modern_era() {
    let data = fixture();
    let config = StoryConfig::default();
    let axes = StoryAxes::configure(&data, &config).expect("axes");
    let catalog = SceneCatalog::builtin();
    let mut view = RecordingView::default();

    render_scene(2, &data, &axes, &catalog, options(&config), &mut view).expect("render");

    let modern: Vec<Observation> = data
        .observations()
        .iter()
        .copied()
        .filter(|observation| observation.year >= 1970)
        .collect();
    let expected = project_line_path(&modern, axes.time_scale(), axes.value_scale(), axes.layout())
        .expect("path");
    assert_eq!(view.line, expected);

    let faded = years_with(&view, DotClass::Faded);
    assert_eq!(faded.len(), 90);
    assert!(faded.iter().all(|year| *year < 1970));
    assert_eq!(view.dot_classes.len(), data.len());
}

#[test]
fn only_scene_two_fades_by_year() {
    let data = fixture();
    let config = StoryConfig::default();
    let axes = StoryAxes::configure(&data, &config).expect("axes");
    let catalog = SceneCatalog::builtin();

    let mut view = RecordingView::default();
    render_scene(1, &data, &axes, &catalog, options(&config), &mut view).expect("scene 1");
    assert!(years_with(&view, DotClass::Faded).is_empty());
    assert!(years_with(&view, DotClass::Highlighted).is_empty());

    render_scene(3, &data, &axes, &catalog, options(&config), &mut view).expect("scene 3");
    let top = data.top_anomaly_years(10);
    let faded = years_with(&view, DotClass::Faded);
    assert_eq!(faded.len(), data.len() - 10);
    assert!(faded.iter().all(|year| !top.contains(year)));
}

#[test]
fn scene_three_highlights_the_ten_warmest_years() {
    let data = fixture();
    let classes = classify_dots(DotRule::HighlightTopAnomalies { count: 10 }, &data);
    let mut highlighted: Vec<i32> = classes
        .iter()
        .filter(|(_, class)| **class == DotClass::Highlighted)
        .map(|(year, _)| *year)
        .collect();
    highlighted.sort_unstable();
    assert_eq!(
        highlighted,
        vec![2012, 2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022, 2023]
    );

    let threshold = data
        .observations()
        .iter()
        .filter(|o| highlighted.contains(&o.year))
        .map(|o| o.anomaly)
        .fold(f64::INFINITY, f64::min);
    assert!(
        data.observations()
            .iter()
            .filter(|o| !highlighted.contains(&o.year))
            .all(|o| o.anomaly <= threshold)
    );
}

#[test]
fn fewer_than_ten_observations_highlight_everything() {
    let data = dataset(&[(2000, 0.1), (2001, 0.3), (2002, 0.2)]);
    let classes = classify_dots(DotRule::HighlightTopAnomalies { count: 10 }, &data);
    assert!(classes.values().all(|class| *class == DotClass::Highlighted));
}

#[test]
fn render_steps_run_in_order() {
    let data = fixture();
    let config = StoryConfig::default();
    let axes = StoryAxes::configure(&data, &config).expect("axes");
    let catalog = SceneCatalog::builtin();
    let mut view = RecordingView::default();

    render_scene(1, &data, &axes, &catalog, options(&config), &mut view).expect("render");

    let narrative = catalog
        .describe(1, &data, &axes)
        .expect("descriptor")
        .narrative;
    assert_eq!(
        view.calls(),
        &[
            ViewCall::NarrativeText(narrative),
            ViewCall::SceneIndicator("Scene 1 of 3".to_owned()),
            ViewCall::ControlEnabled(NavControl::Previous, false),
            ViewCall::ControlEnabled(NavControl::Next, true),
            ViewCall::Line {
                points: 144,
                duration_ms: 1_000.0
            },
            ViewCall::Dots {
                count: 144,
                duration_ms: 1_000.0
            },
            ViewCall::ClearAnnotations,
            ViewCall::Annotation("Long-Term Trend".to_owned()),
        ]
    );
}

#[test]
fn rendering_twice_is_idempotent() {
    let data = fixture();
    let config = StoryConfig::default();
    let axes = StoryAxes::configure(&data, &config).expect("axes");
    let catalog = SceneCatalog::builtin();

    for scene in 1..=3 {
        let mut view = RecordingView::default();
        render_scene(scene, &data, &axes, &catalog, options(&config), &mut view).expect("first");
        let first = (
            view.narrative.clone(),
            view.indicator.clone(),
            view.line.clone(),
            view.dot_classes.clone(),
            view.annotations.clone(),
        );
        let first_calls = view.calls().to_vec();
        view.clear_log();

        render_scene(scene, &data, &axes, &catalog, options(&config), &mut view).expect("second");
        let second = (
            view.narrative.clone(),
            view.indicator.clone(),
            view.line.clone(),
            view.dot_classes.clone(),
            view.annotations.clone(),
        );
        assert_eq!(first, second, "scene {scene}");
        assert_eq!(first_calls, view.calls());
        assert_eq!(view.annotations.len(), 1);
    }
}

#[test]
fn record_heat_annotation_circles_the_latest_year() {
    let data = fixture();
    let config = StoryConfig::default();
    let axes = StoryAxes::configure(&data, &config).expect("axes");
    let catalog = SceneCatalog::builtin();
    let mut view = RecordingView::default();

    render_scene(3, &data, &axes, &catalog, options(&config), &mut view).expect("render");

    let annotation = &view.annotations[0];
    assert_eq!(annotation.title, "Record Heat");
    let latest = axes
        .project(data.latest().expect("latest"))
        .expect("projected");
    assert_eq!(annotation.anchor, latest);
    let subject = annotation.subject.expect("callout circle");
    assert_eq!(subject.radius, 60.0);
    assert_eq!(annotation.note_origin.x, latest.x - 50.0);
    assert_eq!(annotation.note_origin.y, latest.y - 50.0);
}

#[test]
fn out_of_range_scene_is_rejected() {
    let data = fixture();
    let config = StoryConfig::default();
    let axes = StoryAxes::configure(&data, &config).expect("axes");
    let catalog = SceneCatalog::builtin();
    let mut view = RecordingView::default();

    assert!(render_scene(0, &data, &axes, &catalog, options(&config), &mut view).is_err());
    assert!(render_scene(4, &data, &axes, &catalog, options(&config), &mut view).is_err());
    assert!(view.calls().is_empty());
}

#[test]
fn failed_render_leaves_previous_scene_untouched() {
    let data = fixture();
    let config = StoryConfig::default();
    let axes = StoryAxes::configure(&data, &config).expect("axes");
    let catalog = SceneCatalog::builtin();
    let mut view = RecordingView::default();
    render_scene(1, &data, &axes, &catalog, options(&config), &mut view).expect("scene 1");
    view.clear_log();

    let mut broken = options(&config);
    broken.annotation_layout.wrap_width_px = 0.0;
    assert!(render_scene(2, &data, &axes, &catalog, broken, &mut view).is_err());

    assert!(view.calls().is_empty());
    assert_eq!(view.indicator, "Scene 1 of 3");
    assert_eq!(view.annotations.len(), 1);
    assert_eq!(view.annotations[0].title, "Long-Term Trend");
}
