use tracing::{debug, info};

use crate::core::Dataset;
use crate::error::StoryResult;
use crate::interaction::{TooltipContent, TooltipState};
use crate::render::{StoryView, TransitionSpec};

use super::scene_renderer::{SceneRenderOptions, render_scene};
use super::{NavigationController, SceneCatalog, StoryAxes, StoryConfig};

/// Story session facade consumed by hosts.
///
/// Owns the loaded dataset, the configured axes, the scene catalog and the
/// navigation state, and drives a [`StoryView`] from them. Pass `&mut view`
/// to keep ownership of the view on the host side.
pub struct StoryEngine<V: StoryView> {
    pub(super) view: V,
    pub(super) config: StoryConfig,
    pub(super) dataset: Dataset,
    pub(super) axes: StoryAxes,
    pub(super) catalog: SceneCatalog,
    pub(super) navigation: NavigationController,
    pub(super) tooltip: TooltipState,
}

impl<V: StoryView> StoryEngine<V> {
    #[must_use]
    pub fn current_scene(&self) -> usize {
        self.navigation.current()
    }

    #[must_use]
    pub fn total_scenes(&self) -> usize {
        self.navigation.total()
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn axes(&self) -> &StoryAxes {
        &self.axes
    }

    #[must_use]
    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    #[must_use]
    pub fn tooltip(&self) -> TooltipState {
        self.tooltip
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[must_use]
    pub fn into_view(self) -> V {
        self.view
    }

    /// Next control. Re-renders only when the scene changed; a failed render
    /// leaves the current scene where it was.
    pub fn advance(&mut self) -> StoryResult<bool> {
        let previous = self.navigation;
        if !self.navigation.advance() {
            debug!(scene = self.navigation.current(), "advance ignored at last scene");
            return Ok(false);
        }
        info!(scene = self.navigation.current(), "advanced scene");
        if let Err(err) = self.render_current() {
            self.navigation = previous;
            return Err(err);
        }
        Ok(true)
    }

    /// Previous control. Re-renders only when the scene changed.
    pub fn retreat(&mut self) -> StoryResult<bool> {
        let previous = self.navigation;
        if !self.navigation.retreat() {
            debug!(scene = self.navigation.current(), "retreat ignored at first scene");
            return Ok(false);
        }
        info!(scene = self.navigation.current(), "retreated scene");
        if let Err(err) = self.render_current() {
            self.navigation = previous;
            return Err(err);
        }
        Ok(true)
    }

    /// Moves to `index` and renders it, even if it is already current.
    pub fn render_scene(&mut self, index: usize) -> StoryResult<()> {
        let previous = self.navigation;
        self.navigation.jump_to(index)?;
        self.render_current().inspect_err(|_| self.navigation = previous)
    }

    /// Re-renders the current scene.
    pub fn render_current(&mut self) -> StoryResult<()> {
        let options = SceneRenderOptions {
            transition: TransitionSpec {
                duration_ms: self.config.transition_duration_ms,
            },
            dot_radius: self.config.dot_radius,
            annotation_layout: self.config.annotation_layout,
        };
        render_scene(
            self.navigation.current(),
            &self.dataset,
            &self.axes,
            &self.catalog,
            options,
            &mut self.view,
        )
    }

    /// Shows the tooltip for the dot of `year`. Unknown years are ignored.
    pub fn pointer_over_dot(&mut self, year: i32) -> bool {
        let Some(observation) = self.dataset.find_year(year) else {
            return false;
        };
        self.tooltip
            .on_pointer_over(TooltipContent::from_observation(observation));
        self.view.update_tooltip(&self.tooltip);
        true
    }

    pub fn pointer_move(&mut self, page_x: f64, page_y: f64) {
        self.tooltip
            .on_pointer_move(page_x, page_y, self.config.tooltip_offset);
        self.view.update_tooltip(&self.tooltip);
    }

    pub fn pointer_out(&mut self) {
        self.tooltip.on_pointer_out();
        self.view.update_tooltip(&self.tooltip);
    }
}
