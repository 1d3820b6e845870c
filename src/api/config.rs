use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, Margins, Viewport};
use crate::data::DatasetFormat;
use crate::error::{StoryError, StoryResult};
use crate::extensions::AnnotationLayoutConfig;
use crate::interaction::TooltipOffset;

pub const DEFAULT_LOAD_FAILURE_MESSAGE: &str =
    "Failed to load visualization data. Please check the browser console for details.";

/// Story bootstrap configuration.
///
/// Serializable so hosts can keep the chart setup in a JSON file instead of
/// inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: f64,
    #[serde(default = "default_dot_radius")]
    pub dot_radius: f64,
    #[serde(default = "default_tick_count")]
    pub value_tick_count: usize,
    #[serde(default = "default_tick_count")]
    pub time_tick_count: usize,
    #[serde(default)]
    pub tooltip_offset: TooltipOffset,
    #[serde(default)]
    pub annotation_layout: AnnotationLayoutConfig,
    #[serde(default)]
    pub dataset_format: DatasetFormat,
    #[serde(default = "default_load_failure_message")]
    pub load_failure_message: String,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            margins: Margins::default(),
            transition_duration_ms: default_transition_duration_ms(),
            dot_radius: default_dot_radius(),
            value_tick_count: default_tick_count(),
            time_tick_count: default_tick_count(),
            tooltip_offset: TooltipOffset::default(),
            annotation_layout: AnnotationLayoutConfig::default(),
            dataset_format: DatasetFormat::default(),
            load_failure_message: default_load_failure_message(),
        }
    }
}

impl StoryConfig {
    /// Sets the outer canvas size.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the duration of line and dot transitions. `0` disables animation.
    #[must_use]
    pub fn with_transition_duration_ms(mut self, duration_ms: f64) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_dot_radius(mut self, dot_radius: f64) -> Self {
        self.dot_radius = dot_radius;
        self
    }

    #[must_use]
    pub fn with_dataset_format(mut self, format: DatasetFormat) -> Self {
        self.dataset_format = format;
        self
    }

    #[must_use]
    pub fn with_load_failure_message(mut self, message: impl Into<String>) -> Self {
        self.load_failure_message = message.into();
        self
    }

    pub fn layout(&self) -> StoryResult<ChartLayout> {
        ChartLayout::new(self.viewport, self.margins)
    }

    pub fn validate(&self) -> StoryResult<()> {
        self.layout()?;
        if !self.transition_duration_ms.is_finite() || self.transition_duration_ms < 0.0 {
            return Err(StoryError::InvalidData(
                "transition duration must be finite and >= 0".to_owned(),
            ));
        }
        if !self.dot_radius.is_finite() || self.dot_radius <= 0.0 {
            return Err(StoryError::InvalidData(
                "dot radius must be finite and > 0".to_owned(),
            ));
        }
        if self.value_tick_count == 0 || self.time_tick_count == 0 {
            return Err(StoryError::InvalidData(
                "tick counts must be > 0".to_owned(),
            ));
        }
        if !self.tooltip_offset.dx.is_finite() || !self.tooltip_offset.dy.is_finite() {
            return Err(StoryError::InvalidData(
                "tooltip offset must be finite".to_owned(),
            ));
        }
        self.annotation_layout.validate()?;
        if self.dataset_format.year_column.is_empty()
            || self.dataset_format.anomaly_column.is_empty()
        {
            return Err(StoryError::InvalidData(
                "dataset column names must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> StoryResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| StoryError::InvalidData(format!("failed to parse story config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> StoryResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StoryError::InvalidData(format!("failed to serialize story config: {e}")))
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(960, 500)
}

fn default_transition_duration_ms() -> f64 {
    1_000.0
}

fn default_dot_radius() -> f64 {
    4.0
}

fn default_tick_count() -> usize {
    10
}

fn default_load_failure_message() -> String {
    DEFAULT_LOAD_FAILURE_MESSAGE.to_owned()
}
