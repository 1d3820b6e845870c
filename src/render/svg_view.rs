use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::core::line_series::format_coordinate;
use crate::core::{LinePath, PathPoint};
use crate::error::{StoryError, StoryResult};
use crate::extensions::PlacedAnnotation;
use crate::interaction::{TooltipContent, TooltipState};
use crate::render::transition::Transition;
use crate::render::{
    CirclePrimitive, Color, DotClass, DotStyle, DotUpdate, LinePrimitive, LineStrokeStyle, NavControl,
    RenderFrame, StoryView, TextPrimitive, TransitionSpec,
};

const LINE_COLOR: Color = Color::rgb(0.275, 0.510, 0.706);
const LINE_STROKE_WIDTH: f64 = 2.0;
const DASH_PATTERN: &str = "4 4";

#[derive(Debug, Clone, PartialEq)]
struct DotNode {
    center: PathPoint,
    radius: Transition<f64>,
    style: Transition<DotStyle>,
    class: DotClass,
    tooltip: TooltipContent,
}

/// Retained SVG scene graph with clock-driven transitions.
///
/// Every animated attribute is its own [`Transition`] keyed by element
/// (the line path, each dot's radius and paint). A new render call retargets
/// them from whatever is on screen at the current clock instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgStoryView {
    clock_ms: f64,
    chrome: Option<RenderFrame>,
    narrative: String,
    indicator: String,
    previous_enabled: bool,
    next_enabled: bool,
    line: Option<Transition<LinePath>>,
    dots: IndexMap<i32, DotNode>,
    annotations: Vec<PlacedAnnotation>,
    tooltip: TooltipState,
}

impl Default for SvgStoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgStoryView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock_ms: 0.0,
            chrome: None,
            narrative: String::new(),
            indicator: String::new(),
            previous_enabled: true,
            next_enabled: true,
            line: None,
            dots: IndexMap::new(),
            annotations: Vec::new(),
            tooltip: TooltipState::default(),
        }
    }

    #[must_use]
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn advance_clock(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.clock_ms += delta_ms;
        }
    }

    /// Completes every running transition at once.
    pub fn settle(&mut self) {
        if let Some(line) = self.line.as_mut() {
            line.finish();
        }
        for dot in self.dots.values_mut() {
            dot.radius.finish();
            dot.style.finish();
        }
    }

    /// Stops every running transition at the value currently on screen.
    pub fn cancel_transitions(&mut self) {
        let now = self.clock_ms;
        if let Some(line) = self.line.as_mut() {
            line.cancel(now);
        }
        for dot in self.dots.values_mut() {
            dot.radius.cancel(now);
            dot.style.cancel(now);
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        let now = self.clock_ms;
        self.line.as_ref().is_none_or(|line| line.is_settled_at(now))
            && self
                .dots
                .values()
                .all(|dot| dot.radius.is_settled_at(now) && dot.style.is_settled_at(now))
    }

    #[must_use]
    pub fn narrative_text(&self) -> &str {
        &self.narrative
    }

    #[must_use]
    pub fn scene_indicator(&self) -> &str {
        &self.indicator
    }

    #[must_use]
    pub fn is_control_enabled(&self, control: NavControl) -> bool {
        match control {
            NavControl::Previous => self.previous_enabled,
            NavControl::Next => self.next_enabled,
        }
    }

    #[must_use]
    pub fn chrome(&self) -> Option<&RenderFrame> {
        self.chrome.as_ref()
    }

    /// Line geometry shown at the current clock instant.
    #[must_use]
    pub fn line_path(&self) -> Option<LinePath> {
        self.line.as_ref().map(|line| line.value_at(self.clock_ms))
    }

    /// Line geometry the path is heading to.
    #[must_use]
    pub fn line_target(&self) -> Option<&LinePath> {
        self.line.as_ref().map(Transition::target)
    }

    #[must_use]
    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    #[must_use]
    pub fn dot_class(&self, year: i32) -> Option<DotClass> {
        self.dots.get(&year).map(|dot| dot.class)
    }

    /// Year-ordered class assignment of every dot.
    #[must_use]
    pub fn dot_classes(&self) -> IndexMap<i32, DotClass> {
        self.dots
            .iter()
            .map(|(year, dot)| (*year, dot.class))
            .collect()
    }

    #[must_use]
    pub fn dot_radius(&self, year: i32) -> Option<f64> {
        self.dots
            .get(&year)
            .map(|dot| dot.radius.value_at(self.clock_ms))
    }

    #[must_use]
    pub fn dot_style(&self, year: i32) -> Option<DotStyle> {
        self.dots
            .get(&year)
            .map(|dot| dot.style.value_at(self.clock_ms))
    }

    #[must_use]
    pub fn dot_tooltip(&self, year: i32) -> Option<TooltipContent> {
        self.dots.get(&year).map(|dot| dot.tooltip)
    }

    #[must_use]
    pub fn annotations(&self) -> &[PlacedAnnotation] {
        &self.annotations
    }

    #[must_use]
    pub fn tooltip(&self) -> TooltipState {
        self.tooltip
    }

    /// Serializes the chart as it looks at the current clock instant.
    pub fn to_svg_string(&self) -> StoryResult<String> {
        let chrome = self.chrome.as_ref().ok_or_else(|| {
            StoryError::InvalidData("static chrome has not been drawn".to_owned())
        })?;
        let width = chrome.viewport.width;
        let height = chrome.viewport.height;
        let now = self.clock_ms;

        let mut svg = String::with_capacity(16 * 1024);
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
        );
        let _ = writeln!(
            svg,
            r#"<g transform="translate({},{})">"#,
            fmt_num(chrome.origin.0),
            fmt_num(chrome.origin.1)
        );

        svg.push_str("<g class=\"chrome\">\n");
        for line in &chrome.lines {
            write_line(&mut svg, line);
        }
        for text in &chrome.texts {
            write_text(&mut svg, text);
        }
        svg.push_str("</g>\n");

        if let Some(line) = &self.line {
            let path = line.value_at(now);
            let _ = writeln!(
                svg,
                r#"<path class="line" d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                path.to_svg_path_data(),
                LINE_COLOR.to_hex(),
                fmt_num(LINE_STROKE_WIDTH)
            );
        }

        svg.push_str("<g class=\"dots\">\n");
        for dot in self.dots.values() {
            let style = dot.style.value_at(now);
            let _ = writeln!(
                svg,
                r#"<circle class="{}" cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"><title>{}&#10;{}</title></circle>"#,
                dot.class.class_name(),
                fmt_num(dot.center.x),
                fmt_num(dot.center.y),
                fmt_num(dot.radius.value_at(now)),
                style.fill.to_hex(),
                fmt_num(style.opacity * style.fill.alpha),
                escape_xml(&dot.tooltip.year_line()),
                escape_xml(&dot.tooltip.anomaly_line())
            );
        }
        svg.push_str("</g>\n");

        svg.push_str("<g class=\"annotation-group\">\n");
        for annotation in &self.annotations {
            if let Some(subject) = &annotation.subject {
                write_circle(&mut svg, subject);
            }
            write_line(&mut svg, &annotation.connector);
            write_line(&mut svg, &annotation.note_line);
            for text in &annotation.texts {
                write_text(&mut svg, text);
            }
        }
        svg.push_str("</g>\n</g>\n");

        if let Some(content) = self.tooltip.content.filter(|_| self.tooltip.is_visible()) {
            let _ = writeln!(
                svg,
                r##"<g class="tooltip" transform="translate({},{})" opacity="{}"><rect width="130" height="38" rx="4" fill="#ffffff" stroke="#999999"/><text x="8" y="15" font-size="12">{}</text><text x="8" y="31" font-size="12">{}</text></g>"##,
                fmt_num(self.tooltip.left_px),
                fmt_num(self.tooltip.top_px),
                fmt_num(self.tooltip.opacity),
                escape_xml(&content.year_line()),
                escape_xml(&content.anomaly_line())
            );
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

impl StoryView for SvgStoryView {
    fn draw_static_chrome(&mut self, chrome: &RenderFrame) -> StoryResult<()> {
        chrome.validate()?;
        self.chrome = Some(chrome.clone());
        Ok(())
    }

    fn set_narrative_text(&mut self, text: &str) {
        text.clone_into(&mut self.narrative);
    }

    fn set_scene_indicator(&mut self, text: &str) {
        text.clone_into(&mut self.indicator);
    }

    fn set_control_enabled(&mut self, control: NavControl, enabled: bool) {
        match control {
            NavControl::Previous => self.previous_enabled = enabled,
            NavControl::Next => self.next_enabled = enabled,
        }
    }

    fn draw_line(&mut self, path: &LinePath, transition: TransitionSpec) -> StoryResult<()> {
        if path
            .points
            .iter()
            .any(|point| !point.x.is_finite() || !point.y.is_finite())
        {
            return Err(StoryError::InvalidData(
                "line path coordinates must be finite".to_owned(),
            ));
        }
        let now = self.clock_ms;
        match self.line.as_mut() {
            Some(line) => line.retarget(path.clone(), now, transition.duration_ms),
            None => {
                // A fresh path has nothing to morph from.
                self.line = Some(Transition::settled(path.clone()));
            }
        }
        Ok(())
    }

    fn reconcile_dots(
        &mut self,
        dots: &[DotUpdate],
        transition: TransitionSpec,
    ) -> StoryResult<()> {
        let now = self.clock_ms;
        for update in dots {
            if !update.center.x.is_finite()
                || !update.center.y.is_finite()
                || !update.radius.is_finite()
                || update.radius < 0.0
            {
                return Err(StoryError::InvalidData(format!(
                    "dot geometry for year {} must be finite",
                    update.year
                )));
            }
            let target_style = update.class.style();
            match self.dots.get_mut(&update.year) {
                Some(node) => {
                    node.center = update.center;
                    node.class = update.class;
                    node.tooltip = update.tooltip;
                    node.radius
                        .retarget(update.radius, now, transition.duration_ms);
                    node.style
                        .retarget(target_style, now, transition.duration_ms);
                }
                None => {
                    self.dots.insert(
                        update.year,
                        DotNode {
                            center: update.center,
                            radius: Transition::new(0.0, update.radius, now, transition.duration_ms),
                            style: Transition::settled(target_style),
                            class: update.class,
                            tooltip: update.tooltip,
                        },
                    );
                }
            }
        }
        Ok(())
    }

    fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    fn draw_annotation(&mut self, annotation: &PlacedAnnotation) -> StoryResult<()> {
        annotation.connector.validate()?;
        annotation.note_line.validate()?;
        if let Some(subject) = annotation.subject {
            subject.validate()?;
        }
        for text in &annotation.texts {
            text.validate()?;
        }
        self.annotations.push(annotation.clone());
        Ok(())
    }

    fn update_tooltip(&mut self, tooltip: &TooltipState) {
        self.tooltip = *tooltip;
    }
}

fn write_line(svg: &mut String, line: &LinePrimitive) {
    let dash = match line.stroke_style {
        LineStrokeStyle::Solid => String::new(),
        LineStrokeStyle::Dashed => format!(r#" stroke-dasharray="{DASH_PATTERN}""#),
    };
    let _ = writeln!(
        svg,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}"{dash}/>"#,
        fmt_num(line.x1),
        fmt_num(line.y1),
        fmt_num(line.x2),
        fmt_num(line.y2),
        line.color.to_hex(),
        fmt_num(line.color.alpha),
        fmt_num(line.stroke_width)
    );
}

fn write_circle(svg: &mut String, circle: &CirclePrimitive) {
    let fill = circle
        .fill
        .map(Color::to_hex)
        .unwrap_or_else(|| "none".to_owned());
    let _ = writeln!(
        svg,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}" stroke="{}" stroke-width="{}"/>"#,
        fmt_num(circle.cx),
        fmt_num(circle.cy),
        fmt_num(circle.radius),
        circle.stroke.to_hex(),
        fmt_num(circle.stroke_width)
    );
}

fn write_text(svg: &mut String, text: &TextPrimitive) {
    let transform = if text.rotation_deg != 0.0 {
        format!(r#" transform="rotate({})""#, fmt_num(text.rotation_deg))
    } else {
        String::new()
    };
    let weight = if text.bold {
        r#" font-weight="bold""#
    } else {
        ""
    };
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{}"{transform}{weight}>{}</text>"#,
        fmt_num(text.x),
        fmt_num(text.y),
        fmt_num(text.font_size_px),
        text.color.to_hex(),
        text.h_align.svg_anchor(),
        escape_xml(&text.text)
    );
}

fn fmt_num(value: f64) -> String {
    format_coordinate(value)
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
