use climate_story::api::{SceneCatalog, SceneRenderOptions, StoryAxes, render_scene};
use climate_story::core::{Dataset, Observation};
use climate_story::data::{DatasetFormat, parse_dataset};
use climate_story::render::{RecordingView, SvgStoryView, TransitionSpec};
use climate_story::{StoryConfig, StoryEngine};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn synthetic_dataset(years: i32) -> Dataset {
    (0..years)
        .map(|offset| {
            let t = f64::from(offset);
            let anomaly = -0.3 + t * 0.008 + (t * 1.7).sin() * 0.07;
            Observation::new(1880 + offset, anomaly).expect("valid generated observation")
        })
        .collect::<Vec<_>>()
        .into()
}

fn bench_parse_table(c: &mut Criterion) {
    let mut text = String::from("Land-Ocean: Global Means\nYear,Jan,Feb,J-D,D-N\n");
    for offset in 0..145 {
        let value = -0.3 + f64::from(offset) * 0.008;
        text.push_str(&format!("{},{value:.2},{value:.2},{value:.2},***\n", 1880 + offset));
    }
    let format = DatasetFormat::default();

    c.bench_function("parse_anomaly_table_145_rows", |b| {
        b.iter(|| {
            let _ = parse_dataset(black_box(&text), &format).expect("parse");
        })
    });
}

fn bench_render_all_scenes(c: &mut Criterion) {
    let dataset = synthetic_dataset(145);
    let config = StoryConfig::default();
    let axes = StoryAxes::configure(&dataset, &config).expect("axes");
    let catalog = SceneCatalog::builtin();
    let options = SceneRenderOptions {
        transition: TransitionSpec {
            duration_ms: config.transition_duration_ms,
        },
        dot_radius: config.dot_radius,
        annotation_layout: config.annotation_layout,
    };

    c.bench_function("render_three_scenes_recording_view", |b| {
        b.iter(|| {
            let mut view = RecordingView::default();
            for scene in 1..=3 {
                render_scene(scene, &dataset, &axes, &catalog, options, &mut view)
                    .expect("render");
            }
            black_box(view.dot_classes.len())
        })
    });
}

fn bench_svg_export(c: &mut Criterion) {
    let mut engine =
        StoryEngine::from_dataset(SvgStoryView::new(), StoryConfig::default(), synthetic_dataset(145))
            .expect("engine");
    engine.render_scene(3).expect("scene 3");
    engine.view_mut().advance_clock(400.0);

    c.bench_function("svg_export_mid_transition", |b| {
        b.iter(|| {
            let _ = engine.view().to_svg_string().expect("svg");
        })
    });
}

criterion_group!(
    benches,
    bench_parse_table,
    bench_render_all_scenes,
    bench_svg_export
);
criterion_main!(benches);
