use tracing::debug;

use crate::core::{Dataset, project_line_path};
use crate::error::StoryResult;
use crate::extensions::{AnnotationLayoutConfig, place_annotation};
use crate::interaction::TooltipContent;
use crate::render::{DotUpdate, NavControl, StoryView, TransitionSpec};

use super::dot_styling::{classify_dots, line_observations};
use super::{SceneCatalog, StoryAxes};

/// Per-render knobs taken from the story config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneRenderOptions {
    pub transition: TransitionSpec,
    pub dot_radius: f64,
    pub annotation_layout: AnnotationLayoutConfig,
}

/// Replaces all scene-dependent view state with scene `index`.
///
/// Deterministic in its inputs: rendering the same scene twice leaves the
/// view in the same target state.
pub fn render_scene<V: StoryView + ?Sized>(
    index: usize,
    dataset: &Dataset,
    axes: &StoryAxes,
    catalog: &SceneCatalog,
    options: SceneRenderOptions,
    view: &mut V,
) -> StoryResult<()> {
    let definition = catalog.definition(index)?;
    let descriptor = catalog.describe(index, dataset, axes)?;
    let total = catalog.total_scenes();

    let visible = line_observations(definition.line_window, dataset);
    let path = project_line_path(
        &visible,
        axes.time_scale(),
        axes.value_scale(),
        axes.layout(),
    )?;

    let classes = classify_dots(definition.dot_rule, dataset);
    let mut dots = Vec::with_capacity(dataset.len());
    for observation in dataset.observations() {
        dots.push(DotUpdate {
            year: observation.year,
            center: axes.project(*observation)?,
            radius: options.dot_radius,
            class: classes
                .get(&observation.year)
                .copied()
                .unwrap_or_default(),
            tooltip: TooltipContent::from_observation(*observation),
        });
    }

    let placed = place_annotation(&descriptor.annotation, options.annotation_layout)?;

    // The view is untouched until the whole scene has resolved.
    view.set_narrative_text(&descriptor.narrative);
    view.set_scene_indicator(&format!("Scene {index} of {total}"));
    view.set_control_enabled(NavControl::Previous, index > 1);
    view.set_control_enabled(NavControl::Next, index < total);
    view.draw_line(&path, options.transition)?;
    view.reconcile_dots(&dots, options.transition)?;
    view.clear_annotations();
    view.draw_annotation(&placed)?;

    debug!(
        scene = index,
        total,
        line_points = path.len(),
        dots = dots.len(),
        annotation = %placed.title,
        "rendered scene"
    );
    Ok(())
}
