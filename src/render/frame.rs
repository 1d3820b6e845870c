use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{StoryError, StoryResult};
use crate::render::{LinePrimitive, TextPrimitive};

/// Backend-agnostic batch of primitives in plot-area coordinates.
///
/// `origin` is the translation from viewport space to the plot area
/// (the left/top margins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub origin: (f64, f64),
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, origin: (f64, f64)) -> Self {
        Self {
            viewport,
            origin,
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> StoryResult<()> {
        if !self.viewport.is_valid() {
            return Err(StoryError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.origin.0.is_finite() || !self.origin.1.is_finite() {
            return Err(StoryError::InvalidData(
                "frame origin must be finite".to_owned(),
            ));
        }

        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.texts.is_empty()
    }
}
