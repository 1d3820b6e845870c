use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    ChartLayout, Dataset, Observation, PathPoint, TimeScale, ValueScale, project_point,
};
use crate::error::{StoryError, StoryResult};
use crate::render::{Color, LinePrimitive, LineStrokeStyle, RenderFrame, TextHAlign, TextPrimitive};

use super::StoryConfig;
use super::axis_label_format::{format_time_tick, format_value_tick};

const AXIS_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);
const ZERO_LINE_COLOR: Color = Color::rgba(0.4, 0.4, 0.4, 0.8);
const TICK_SIZE_PX: f64 = 6.0;
const TICK_LABEL_GAP_PX: f64 = 3.0;
const TICK_FONT_PX: f64 = 10.0;
const AXIS_TITLE_FONT_PX: f64 = 14.0;

pub const TIME_AXIS_TITLE: &str = "Year";
pub const VALUE_AXIS_TITLE: &str = "Temperature Anomaly (°C)";

/// One labelled axis tick at a plot-area pixel position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub position_px: f64,
    pub label: String,
}

/// Scales plus the static chart chrome, configured once per session.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryAxes {
    layout: ChartLayout,
    time_scale: TimeScale,
    value_scale: ValueScale,
    time_ticks: SmallVec<[AxisTick; 16]>,
    value_ticks: SmallVec<[AxisTick; 16]>,
    chrome: RenderFrame,
}

impl StoryAxes {
    /// Derives both domains from the dataset and builds axes, axis titles and
    /// the zero reference line.
    pub fn configure(dataset: &Dataset, config: &StoryConfig) -> StoryResult<Self> {
        if dataset.is_empty() {
            return Err(StoryError::InvalidData(
                "cannot configure axes without observations".to_owned(),
            ));
        }
        let layout = config.layout()?;
        let time_scale = TimeScale::from_dataset(dataset)?;
        let value_scale = ValueScale::from_dataset(dataset, config.value_tick_count)?;

        let mut time_ticks = SmallVec::new();
        for year in time_scale.year_ticks(config.time_tick_count) {
            time_ticks.push(AxisTick {
                position_px: time_scale.year_to_pixel(year, layout.x_range())?,
                label: format_time_tick(year),
            });
        }

        let value_step = value_scale.tick_step(config.value_tick_count);
        let mut value_ticks = SmallVec::new();
        for value in value_scale.ticks(config.value_tick_count) {
            value_ticks.push(AxisTick {
                position_px: value_scale.value_to_pixel(value, layout.y_range())?,
                label: format_value_tick(value, value_step),
            });
        }

        let zero_y = value_scale.value_to_pixel(0.0, layout.y_range())?;
        let chrome = build_chrome(layout, &time_ticks, &value_ticks, zero_y);
        chrome.validate()?;

        debug!(
            time_domain = ?time_scale.year_extent(),
            value_domain = ?value_scale.domain(),
            time_ticks = time_ticks.len(),
            value_ticks = value_ticks.len(),
            "configured story axes"
        );

        Ok(Self {
            layout,
            time_scale,
            value_scale,
            time_ticks,
            value_ticks,
            chrome,
        })
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    #[must_use]
    pub fn value_scale(&self) -> ValueScale {
        self.value_scale
    }

    #[must_use]
    pub fn time_ticks(&self) -> &[AxisTick] {
        &self.time_ticks
    }

    #[must_use]
    pub fn value_ticks(&self) -> &[AxisTick] {
        &self.value_ticks
    }

    #[must_use]
    pub fn chrome(&self) -> &RenderFrame {
        &self.chrome
    }

    pub fn project(&self, observation: Observation) -> StoryResult<PathPoint> {
        project_point(observation, self.time_scale, self.value_scale, self.layout)
    }

    /// Chart point of a calendar year and value that need not be in the data.
    pub fn project_calendar_point(&self, year: i32, value: f64) -> StoryResult<PathPoint> {
        Ok(PathPoint {
            x: self.time_scale.year_to_pixel(year, self.layout.x_range())?,
            y: self.value_scale.value_to_pixel(value, self.layout.y_range())?,
        })
    }
}

fn build_chrome(
    layout: ChartLayout,
    time_ticks: &[AxisTick],
    value_ticks: &[AxisTick],
    zero_y: f64,
) -> RenderFrame {
    let width = layout.inner_width();
    let height = layout.inner_height();
    let mut frame = RenderFrame::new(layout.viewport, (layout.margins.left, layout.margins.top));

    frame = frame.with_line(
        LinePrimitive::new(0.0, zero_y, width, zero_y, 1.0, ZERO_LINE_COLOR)
            .with_stroke_style(LineStrokeStyle::Dashed),
    );

    frame = frame.with_line(LinePrimitive::new(0.0, height, width, height, 1.0, AXIS_COLOR));
    for tick in time_ticks {
        frame = frame
            .with_line(LinePrimitive::new(
                tick.position_px,
                height,
                tick.position_px,
                height + TICK_SIZE_PX,
                1.0,
                AXIS_COLOR,
            ))
            .with_text(TextPrimitive::new(
                tick.label.clone(),
                tick.position_px,
                height + TICK_SIZE_PX + TICK_LABEL_GAP_PX + TICK_FONT_PX,
                TICK_FONT_PX,
                AXIS_COLOR,
                TextHAlign::Center,
            ));
    }

    frame = frame.with_line(LinePrimitive::new(0.0, 0.0, 0.0, height, 1.0, AXIS_COLOR));
    for tick in value_ticks {
        frame = frame
            .with_line(LinePrimitive::new(
                -TICK_SIZE_PX,
                tick.position_px,
                0.0,
                tick.position_px,
                1.0,
                AXIS_COLOR,
            ))
            .with_text(TextPrimitive::new(
                tick.label.clone(),
                -(TICK_SIZE_PX + TICK_LABEL_GAP_PX),
                tick.position_px + TICK_FONT_PX * 0.32,
                TICK_FONT_PX,
                AXIS_COLOR,
                TextHAlign::Right,
            ));
    }

    frame
        .with_text(TextPrimitive::new(
            TIME_AXIS_TITLE,
            width / 2.0,
            height + layout.margins.bottom - 10.0,
            AXIS_TITLE_FONT_PX,
            AXIS_COLOR,
            TextHAlign::Center,
        ))
        .with_text(
            TextPrimitive::new(
                VALUE_AXIS_TITLE,
                -height / 2.0,
                -layout.margins.left + 20.0,
                AXIS_TITLE_FONT_PX,
                AXIS_COLOR,
                TextHAlign::Center,
            )
            .rotated(-90.0),
        )
}
