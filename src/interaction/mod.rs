use serde::{Deserialize, Serialize};

use crate::core::Observation;

/// Text shown while the pointer rests on a dot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub year: i32,
    pub anomaly: f64,
}

impl TooltipContent {
    #[must_use]
    pub fn from_observation(observation: Observation) -> Self {
        Self {
            year: observation.year,
            anomaly: observation.anomaly,
        }
    }

    #[must_use]
    pub fn year_line(self) -> String {
        format!("Year: {}", self.year)
    }

    /// Anomaly with two decimals and the unit suffix.
    #[must_use]
    pub fn anomaly_line(self) -> String {
        format!("Anomaly: {:.2}°C", self.anomaly)
    }

    #[must_use]
    pub fn to_html(self) -> String {
        format!("{}<br>{}", self.year_line(), self.anomaly_line())
    }
}

/// Pixel displacement of the tooltip from the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipOffset {
    pub dx: f64,
    pub dy: f64,
}

impl Default for TooltipOffset {
    fn default() -> Self {
        Self {
            dx: 15.0,
            dy: -28.0,
        }
    }
}

/// Public tooltip state exposed to views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub opacity: f64,
    pub content: Option<TooltipContent>,
    pub left_px: f64,
    pub top_px: f64,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self {
            opacity: 0.0,
            content: None,
            left_px: 0.0,
            top_px: 0.0,
        }
    }
}

impl TooltipState {
    #[must_use]
    pub fn is_visible(self) -> bool {
        self.opacity > 0.0
    }

    pub fn on_pointer_over(&mut self, content: TooltipContent) {
        self.opacity = 1.0;
        self.content = Some(content);
    }

    /// Follows the pointer; position is tracked even while hidden.
    pub fn on_pointer_move(&mut self, page_x: f64, page_y: f64, offset: TooltipOffset) {
        if !page_x.is_finite() || !page_y.is_finite() {
            return;
        }
        self.left_px = page_x + offset.dx;
        self.top_px = page_y + offset.dy;
    }

    /// Hides the tooltip; the last content stays around like a hidden element.
    pub fn on_pointer_out(&mut self) {
        self.opacity = 0.0;
    }
}
