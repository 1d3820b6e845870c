use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PathPoint;
use crate::error::{StoryError, StoryResult};
use crate::render::{CirclePrimitive, Color, LinePrimitive, TextHAlign, TextPrimitive};

/// Callout request resolved to chart-pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSpec {
    pub title: String,
    pub body: String,
    pub anchor: PathPoint,
    pub dx: f64,
    pub dy: f64,
    /// Circle drawn around the anchor when set.
    pub callout_radius: Option<f64>,
    pub radius_padding: f64,
}

impl AnnotationSpec {
    pub fn validate(&self) -> StoryResult<()> {
        if !self.anchor.x.is_finite() || !self.anchor.y.is_finite() {
            return Err(StoryError::InvalidData(
                "annotation anchor must be finite".to_owned(),
            ));
        }
        if !self.dx.is_finite() || !self.dy.is_finite() {
            return Err(StoryError::InvalidData(
                "annotation offset must be finite".to_owned(),
            ));
        }
        if let Some(radius) = self.callout_radius {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(StoryError::InvalidData(
                    "annotation callout radius must be finite and > 0".to_owned(),
                ));
            }
        }
        if !self.radius_padding.is_finite() || self.radius_padding < 0.0 {
            return Err(StoryError::InvalidData(
                "annotation radius padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationLayoutConfig {
    pub wrap_width_px: f64,
    pub label_char_width_px: f64,
    pub title_font_px: f64,
    pub body_font_px: f64,
    pub line_height_px: f64,
    pub note_padding_px: f64,
    pub stroke_width: f64,
    pub color: Color,
}

impl Default for AnnotationLayoutConfig {
    fn default() -> Self {
        Self {
            wrap_width_px: 120.0,
            label_char_width_px: 6.5,
            title_font_px: 13.0,
            body_font_px: 12.0,
            line_height_px: 15.0,
            note_padding_px: 5.0,
            stroke_width: 1.0,
            color: Color::rgb(0.2, 0.2, 0.2),
        }
    }
}

impl AnnotationLayoutConfig {
    pub fn validate(self) -> StoryResult<Self> {
        for (value, name) in [
            (self.wrap_width_px, "wrap_width_px"),
            (self.label_char_width_px, "label_char_width_px"),
            (self.title_font_px, "title_font_px"),
            (self.body_font_px, "body_font_px"),
            (self.line_height_px, "line_height_px"),
            (self.stroke_width, "stroke_width"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(StoryError::InvalidData(format!(
                    "annotation config `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.note_padding_px.is_finite() || self.note_padding_px < 0.0 {
            return Err(StoryError::InvalidData(
                "annotation config `note_padding_px` must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()?;
        Ok(self)
    }
}

/// Fully laid out callout: subject circle, connector, note underline and
/// wrapped text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedAnnotation {
    pub title: String,
    pub anchor: PathPoint,
    pub note_origin: PathPoint,
    pub subject: Option<CirclePrimitive>,
    pub connector: LinePrimitive,
    pub note_line: LinePrimitive,
    pub texts: Vec<TextPrimitive>,
}

impl PlacedAnnotation {
    #[must_use]
    pub fn body_line_count(&self) -> usize {
        self.texts.len().saturating_sub(1)
    }
}

/// Greedy word wrap against an estimated character width.
#[must_use]
pub fn wrap_label(text: &str, wrap_width_px: f64, char_width_px: f64) -> SmallVec<[String; 4]> {
    let max_chars = ((wrap_width_px / char_width_px).floor() as usize).max(1);
    let mut lines: SmallVec<[String; 4]> = SmallVec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Lays out a callout annotation.
///
/// The note sits at `anchor + (dx, dy)`. It extends rightwards for `dx >= 0`
/// and leftwards otherwise; text stacks above the underline when the note is
/// above the anchor (`dy < 0`) and below it otherwise. With a callout radius
/// the connector starts on the padded circle edge instead of the anchor.
pub fn place_annotation(
    spec: &AnnotationSpec,
    config: AnnotationLayoutConfig,
) -> StoryResult<PlacedAnnotation> {
    spec.validate()?;
    let config = config.validate()?;

    let note_origin = PathPoint {
        x: spec.anchor.x + spec.dx,
        y: spec.anchor.y + spec.dy,
    };

    let subject = spec.callout_radius.map(|radius| {
        CirclePrimitive::outline(
            spec.anchor.x,
            spec.anchor.y,
            radius,
            config.stroke_width,
            config.color,
        )
    });

    let connector_start = match spec.callout_radius {
        Some(radius) => {
            let distance = spec.dx.hypot(spec.dy);
            let reach = radius + spec.radius_padding;
            if distance > reach {
                PathPoint {
                    x: spec.anchor.x + spec.dx / distance * reach,
                    y: spec.anchor.y + spec.dy / distance * reach,
                }
            } else {
                note_origin
            }
        }
        None => spec.anchor,
    };
    let connector = LinePrimitive::new(
        connector_start.x,
        connector_start.y,
        note_origin.x,
        note_origin.y,
        config.stroke_width,
        config.color,
    );

    let title_lines = wrap_label(&spec.title, config.wrap_width_px, config.label_char_width_px);
    let body_lines = wrap_label(&spec.body, config.wrap_width_px, config.label_char_width_px);
    let longest_chars = title_lines
        .iter()
        .chain(body_lines.iter())
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let note_width = (longest_chars as f64 * config.label_char_width_px).min(config.wrap_width_px);

    let (h_align, line_end_x) = if spec.dx >= 0.0 {
        (TextHAlign::Left, note_origin.x + note_width)
    } else {
        (TextHAlign::Right, note_origin.x - note_width)
    };
    let note_line = LinePrimitive::new(
        note_origin.x,
        note_origin.y,
        line_end_x,
        note_origin.y,
        config.stroke_width,
        config.color,
    );

    let line_count = title_lines.len() + body_lines.len();
    let block_height = line_count as f64 * config.line_height_px;
    let block_top = if spec.dy < 0.0 {
        note_origin.y - config.note_padding_px - block_height
    } else {
        note_origin.y + config.note_padding_px
    };

    let mut texts = Vec::with_capacity(line_count);
    let mut row = 0usize;
    for line in title_lines {
        texts.push(
            TextPrimitive::new(
                line,
                note_origin.x,
                baseline(block_top, row, config),
                config.title_font_px,
                config.color,
                h_align,
            )
            .bold(),
        );
        row += 1;
    }
    for line in body_lines {
        texts.push(TextPrimitive::new(
            line,
            note_origin.x,
            baseline(block_top, row, config),
            config.body_font_px,
            config.color,
            h_align,
        ));
        row += 1;
    }

    Ok(PlacedAnnotation {
        title: spec.title.clone(),
        anchor: spec.anchor,
        note_origin,
        subject,
        connector,
        note_line,
        texts,
    })
}

fn baseline(block_top: f64, row: usize, config: AnnotationLayoutConfig) -> f64 {
    block_top + config.line_height_px * (row as f64 + 1.0) - config.line_height_px * 0.25
}
