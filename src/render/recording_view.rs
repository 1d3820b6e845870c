use indexmap::IndexMap;

use crate::core::LinePath;
use crate::error::StoryResult;
use crate::extensions::PlacedAnnotation;
use crate::interaction::TooltipState;
use crate::render::{DotClass, DotUpdate, NavControl, RenderFrame, StoryView, TransitionSpec};

/// One call received by a [`RecordingView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    StaticChrome,
    NarrativeText(String),
    SceneIndicator(String),
    ControlEnabled(NavControl, bool),
    Line { points: usize, duration_ms: f64 },
    Dots { count: usize, duration_ms: f64 },
    ClearAnnotations,
    Annotation(String),
    Tooltip(TooltipState),
}

/// Headless view used by tests and hosts without a drawing surface.
///
/// It validates what it receives the way a real view would and keeps the
/// latest state plus an ordered log of calls.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub narrative: String,
    pub indicator: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub line: LinePath,
    pub dot_classes: IndexMap<i32, DotClass>,
    pub annotations: Vec<PlacedAnnotation>,
    pub tooltip: TooltipState,
}

impl RecordingView {
    /// Calls recorded since the last [`RecordingView::clear_log`].
    #[must_use]
    pub fn calls(&self) -> &[ViewCall] {
        &self.calls
    }

    pub fn clear_log(&mut self) {
        self.calls.clear();
    }
}

impl StoryView for RecordingView {
    fn draw_static_chrome(&mut self, chrome: &RenderFrame) -> StoryResult<()> {
        chrome.validate()?;
        self.calls.push(ViewCall::StaticChrome);
        Ok(())
    }

    fn set_narrative_text(&mut self, text: &str) {
        text.clone_into(&mut self.narrative);
        self.calls.push(ViewCall::NarrativeText(text.to_owned()));
    }

    fn set_scene_indicator(&mut self, text: &str) {
        text.clone_into(&mut self.indicator);
        self.calls.push(ViewCall::SceneIndicator(text.to_owned()));
    }

    fn set_control_enabled(&mut self, control: NavControl, enabled: bool) {
        match control {
            NavControl::Previous => self.previous_enabled = enabled,
            NavControl::Next => self.next_enabled = enabled,
        }
        self.calls.push(ViewCall::ControlEnabled(control, enabled));
    }

    fn draw_line(&mut self, path: &LinePath, transition: TransitionSpec) -> StoryResult<()> {
        self.line = path.clone();
        self.calls.push(ViewCall::Line {
            points: path.len(),
            duration_ms: transition.duration_ms,
        });
        Ok(())
    }

    fn reconcile_dots(
        &mut self,
        dots: &[DotUpdate],
        transition: TransitionSpec,
    ) -> StoryResult<()> {
        for dot in dots {
            self.dot_classes.insert(dot.year, dot.class);
        }
        self.calls.push(ViewCall::Dots {
            count: dots.len(),
            duration_ms: transition.duration_ms,
        });
        Ok(())
    }

    fn clear_annotations(&mut self) {
        self.annotations.clear();
        self.calls.push(ViewCall::ClearAnnotations);
    }

    fn draw_annotation(&mut self, annotation: &PlacedAnnotation) -> StoryResult<()> {
        for text in &annotation.texts {
            text.validate()?;
        }
        self.annotations.push(annotation.clone());
        self.calls
            .push(ViewCall::Annotation(annotation.title.clone()));
        Ok(())
    }

    fn update_tooltip(&mut self, tooltip: &TooltipState) {
        self.tooltip = *tooltip;
        self.calls.push(ViewCall::Tooltip(*tooltip));
    }
}
