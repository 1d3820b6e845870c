use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::StoryResult;
use crate::interaction::TooltipState;
use crate::render::{DotClass, StoryView};

use super::StoryEngine;
use super::dot_styling::{classify_dots, line_observations};

/// Serializable deterministic state snapshot used by regression tests and
/// the scene export tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySnapshot {
    pub viewport: Viewport,
    pub scene: usize,
    pub total_scenes: usize,
    pub narrative: String,
    pub scene_indicator: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub time_domain: (i32, i32),
    pub value_domain: (f64, f64),
    pub line_years: Vec<i32>,
    pub dot_classes: IndexMap<i32, DotClass>,
    pub annotation_title: String,
    pub tooltip: TooltipState,
}

impl<V: StoryView> StoryEngine<V> {
    /// Target state of the current scene, independent of transition progress.
    pub fn snapshot(&self) -> StoryResult<StorySnapshot> {
        let index = self.navigation.current();
        let total = self.navigation.total();
        let definition = self.catalog.definition(index)?;
        let descriptor = self.catalog.describe(index, &self.dataset, &self.axes)?;

        Ok(StorySnapshot {
            viewport: self.config.viewport,
            scene: index,
            total_scenes: total,
            narrative: descriptor.narrative,
            scene_indicator: format!("Scene {index} of {total}"),
            previous_enabled: self.navigation.can_retreat(),
            next_enabled: self.navigation.can_advance(),
            time_domain: self.axes.time_scale().year_extent(),
            value_domain: self.axes.value_scale().domain(),
            line_years: line_observations(definition.line_window, &self.dataset)
                .iter()
                .map(|observation| observation.year)
                .collect(),
            dot_classes: classify_dots(definition.dot_rule, &self.dataset),
            annotation_title: descriptor.annotation.title,
            tooltip: self.tooltip,
        })
    }
}
