use approx::assert_abs_diff_eq;
use climate_story::core::{Dataset, Observation};
use climate_story::render::{DotClass, NavControl, SvgStoryView};
use climate_story::{StoryConfig, StoryEngine};

fn dataset() -> Dataset {
    (1960..=1990)
        .map(|year| {
            let anomaly = (f64::from(year - 1960) * 0.03) - 0.2;
            Observation::new(year, anomaly).expect("observation")
        })
        .collect::<Vec<_>>()
        .into()
}

fn engine() -> StoryEngine<SvgStoryView> {
    StoryEngine::from_dataset(SvgStoryView::new(), StoryConfig::default(), dataset())
        .expect("engine")
}

#[test]
fn entering_dots_grow_from_zero_radius() {
    let mut engine = engine();
    let view = engine.view_mut();
    assert_eq!(view.dot_count(), 31);
    assert_eq!(view.dot_radius(1960), Some(0.0));

    view.advance_clock(500.0);
    let mid = view.dot_radius(1960).expect("radius");
    assert_abs_diff_eq!(mid, 2.0, epsilon = 1e-9);
    assert!(!view.is_settled());

    view.advance_clock(500.0);
    assert_eq!(view.dot_radius(1960), Some(4.0));
    assert!(view.is_settled());
}

#[test]
fn first_line_is_drawn_without_morphing() {
    let engine = engine();
    let view = engine.view();
    assert_eq!(view.line_path().as_ref(), view.line_target());
    assert_eq!(view.line_target().map(|path| path.len()), Some(31));
}

#[test]
fn scene_change_retargets_from_the_visible_state() {
    let mut engine = engine();
    engine.view_mut().settle();

    engine.advance().expect("scene 2");
    assert_eq!(engine.view().dot_class(1965), Some(DotClass::Faded));
    assert_eq!(engine.view().line_target().map(|path| path.len()), Some(21));

    let normal = DotClass::Normal.style();
    let faded = DotClass::Faded.style();
    assert_eq!(engine.view().dot_style(1965), Some(normal));

    engine.view_mut().advance_clock(500.0);
    let halfway = engine.view().dot_style(1965).expect("style");
    assert_abs_diff_eq!(
        halfway.opacity,
        (normal.opacity + faded.opacity) / 2.0,
        epsilon = 1e-9
    );

    // Going back mid-flight restarts from the half-faded paint.
    engine.retreat().expect("scene 1");
    let restart = engine.view().dot_style(1965).expect("style");
    assert_abs_diff_eq!(restart.opacity, halfway.opacity, epsilon = 1e-9);

    engine.view_mut().advance_clock(1_000.0);
    assert_eq!(engine.view().dot_style(1965), Some(normal));
    assert_eq!(engine.view().dot_class(1965), Some(DotClass::Normal));
    assert!(engine.view().is_settled());
}

#[test]
fn cancel_freezes_the_visible_frame() {
    let mut engine = engine();
    engine.view_mut().advance_clock(250.0);
    let frozen = engine.view().dot_radius(1970).expect("radius");
    engine.view_mut().cancel_transitions();
    engine.view_mut().advance_clock(5_000.0);
    assert_eq!(engine.view().dot_radius(1970), Some(frozen));
    assert!(engine.view().is_settled());
}

#[test]
fn zero_duration_config_skips_animation() {
    let config = StoryConfig::default().with_transition_duration_ms(0.0);
    let engine = StoryEngine::from_dataset(SvgStoryView::new(), config, dataset()).expect("engine");
    assert!(engine.view().is_settled());
    assert_eq!(engine.view().dot_radius(1975), Some(4.0));
}

#[test]
fn svg_document_carries_story_elements() {
    let mut engine = engine();
    engine.render_scene(3).expect("scene 3");
    engine.pointer_over_dot(1990);
    engine.pointer_move(10.0, 50.0);
    engine.view_mut().settle();

    let view = engine.view();
    assert!(!view.is_control_enabled(NavControl::Next));
    assert_eq!(view.scene_indicator(), "Scene 3 of 3");
    assert_eq!(view.annotations().len(), 1);

    let svg = view.to_svg_string().expect("svg");
    assert!(svg.starts_with("<svg "));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"stroke-dasharray="4 4""#));
    assert!(svg.contains(r#"class="dot highlighted""#));
    assert!(svg.contains(r#"class="dot faded""#));
    assert!(svg.contains(">Record Heat</text>"));
    assert!(svg.contains("Temperature Anomaly (°C)"));
    assert!(svg.contains(r#"<g class="tooltip" transform="translate(25,22)""#));
    assert_eq!(svg.matches("<circle class=\"dot").count(), 31);
}

#[test]
fn svg_export_requires_chrome() {
    assert!(SvgStoryView::new().to_svg_string().is_err());
}
