use serde::{Deserialize, Serialize};

use crate::core::{LinePath, PathPoint};
use crate::error::StoryResult;
use crate::extensions::PlacedAnnotation;
use crate::interaction::{TooltipContent, TooltipState};
use crate::render::transition::Interpolate;
use crate::render::{Color, RenderFrame};

/// Navigation controls hosted by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavControl {
    Previous,
    Next,
}

/// Per-scene class of a data dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DotClass {
    #[default]
    Normal,
    Faded,
    Highlighted,
}

impl DotClass {
    /// Class attribute of the dot element.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Normal => "dot",
            Self::Faded => "dot faded",
            Self::Highlighted => "dot highlighted",
        }
    }

    #[must_use]
    pub fn style(self) -> DotStyle {
        match self {
            Self::Normal => DotStyle {
                fill: Color::rgb(0.275, 0.510, 0.706),
                opacity: 0.9,
            },
            Self::Faded => DotStyle {
                fill: Color::rgb(0.667, 0.667, 0.667),
                opacity: 0.3,
            },
            Self::Highlighted => DotStyle {
                fill: Color::rgb(0.839, 0.153, 0.157),
                opacity: 1.0,
            },
        }
    }
}

/// Animatable paint of a dot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotStyle {
    pub fill: Color,
    pub opacity: f64,
}

impl Interpolate for DotStyle {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Self {
            fill: self.fill.interpolate(&to.fill, t),
            opacity: self.opacity.interpolate(&to.opacity, t),
        }
    }
}

/// Duration of the transitions started by one view call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub duration_ms: f64,
}

/// Desired state of one dot, keyed by year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DotUpdate {
    pub year: i32,
    pub center: PathPoint,
    pub radius: f64,
    pub class: DotClass,
    pub tooltip: TooltipContent,
}

/// Operations the story needs from a rendering surface.
///
/// Scene logic only talks to this trait, so it runs unchanged against an
/// SVG scene graph, a recording double, or any host toolkit.
pub trait StoryView {
    /// Axes, axis labels and the zero line. Called once per session.
    fn draw_static_chrome(&mut self, chrome: &RenderFrame) -> StoryResult<()>;

    fn set_narrative_text(&mut self, text: &str);

    fn set_scene_indicator(&mut self, text: &str);

    fn set_control_enabled(&mut self, control: NavControl, enabled: bool);

    /// Rebinds the single line path and animates towards `path`.
    fn draw_line(&mut self, path: &LinePath, transition: TransitionSpec) -> StoryResult<()>;

    /// Joins `dots` against existing dots by year. Unknown years enter at
    /// radius 0; every listed dot animates to its radius and class style.
    fn reconcile_dots(&mut self, dots: &[DotUpdate], transition: TransitionSpec)
    -> StoryResult<()>;

    fn clear_annotations(&mut self);

    fn draw_annotation(&mut self, annotation: &PlacedAnnotation) -> StoryResult<()>;

    fn update_tooltip(&mut self, tooltip: &TooltipState);
}

impl<T: StoryView + ?Sized> StoryView for &mut T {
    fn draw_static_chrome(&mut self, chrome: &RenderFrame) -> StoryResult<()> {
        (**self).draw_static_chrome(chrome)
    }

    fn set_narrative_text(&mut self, text: &str) {
        (**self).set_narrative_text(text);
    }

    fn set_scene_indicator(&mut self, text: &str) {
        (**self).set_scene_indicator(text);
    }

    fn set_control_enabled(&mut self, control: NavControl, enabled: bool) {
        (**self).set_control_enabled(control, enabled);
    }

    fn draw_line(&mut self, path: &LinePath, transition: TransitionSpec) -> StoryResult<()> {
        (**self).draw_line(path, transition)
    }

    fn reconcile_dots(
        &mut self,
        dots: &[DotUpdate],
        transition: TransitionSpec,
    ) -> StoryResult<()> {
        (**self).reconcile_dots(dots, transition)
    }

    fn clear_annotations(&mut self) {
        (**self).clear_annotations();
    }

    fn draw_annotation(&mut self, annotation: &PlacedAnnotation) -> StoryResult<()> {
        (**self).draw_annotation(annotation)
    }

    fn update_tooltip(&mut self, tooltip: &TooltipState) {
        (**self).update_tooltip(tooltip);
    }
}
