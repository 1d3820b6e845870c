use serde::{Deserialize, Serialize};

use crate::core::primitives::year_to_unix_seconds;
use crate::error::{StoryError, StoryResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Outer spacing between the viewport edge and the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 30.0,
            bottom: 60.0,
            left: 60.0,
        }
    }
}

/// Viewport plus margins; all chart geometry lives in the inner plot area
/// whose origin is translated by `(margins.left, margins.top)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub viewport: Viewport,
    pub margins: Margins,
}

impl ChartLayout {
    pub fn new(viewport: Viewport, margins: Margins) -> StoryResult<Self> {
        if !viewport.is_valid() {
            return Err(StoryError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        for (name, value) in [
            ("top", margins.top),
            ("right", margins.right),
            ("bottom", margins.bottom),
            ("left", margins.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(StoryError::InvalidData(format!(
                    "margin `{name}` must be finite and >= 0"
                )));
            }
        }

        let layout = Self { viewport, margins };
        if layout.inner_width() <= 0.0 || layout.inner_height() <= 0.0 {
            return Err(StoryError::InvalidData(
                "margins leave no room for the plot area".to_owned(),
            ));
        }
        Ok(layout)
    }

    #[must_use]
    pub fn inner_width(self) -> f64 {
        f64::from(self.viewport.width) - self.margins.left - self.margins.right
    }

    #[must_use]
    pub fn inner_height(self) -> f64 {
        f64::from(self.viewport.height) - self.margins.top - self.margins.bottom
    }

    #[must_use]
    pub fn x_range(self) -> (f64, f64) {
        (0.0, self.inner_width())
    }

    /// Value axis grows upwards, so the pixel range is inverted.
    #[must_use]
    pub fn y_range(self) -> (f64, f64) {
        (self.inner_height(), 0.0)
    }
}

/// One row of the anomaly series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub anomaly: f64,
}

impl Observation {
    pub fn new(year: i32, anomaly: f64) -> StoryResult<Self> {
        if !anomaly.is_finite() {
            return Err(StoryError::InvalidData(format!(
                "anomaly for year {year} must be finite"
            )));
        }
        year_to_unix_seconds(year)?;
        Ok(Self { year, anomaly })
    }
}
