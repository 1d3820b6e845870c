use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, Observation, TimeScale, ValueScale};
use crate::error::StoryResult;

/// Projected polyline vertex in plot-area pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

/// Line path of one scene, in plot-area pixel coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinePath {
    pub points: Vec<PathPoint>,
}

impl LinePath {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// SVG path data: `M x,y L x,y ...`. Empty paths yield an empty string.
    #[must_use]
    pub fn to_svg_path_data(&self) -> String {
        let mut data = String::with_capacity(self.points.len() * 16);
        for (index, point) in self.points.iter().enumerate() {
            let command = if index == 0 { 'M' } else { 'L' };
            let _ = write!(
                data,
                "{command}{},{}",
                format_coordinate(point.x),
                format_coordinate(point.y)
            );
        }
        data
    }
}

/// Fixed three-decimal coordinate text with trailing zeros trimmed.
pub(crate) fn format_coordinate(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" || text.is_empty() {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}

/// Projects observations into a line path.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// same geometry.
pub fn project_line_path(
    observations: &[Observation],
    time_scale: TimeScale,
    value_scale: ValueScale,
    layout: ChartLayout,
) -> StoryResult<LinePath> {
    let mut points = Vec::with_capacity(observations.len());
    for observation in observations {
        points.push(project_point(*observation, time_scale, value_scale, layout)?);
    }
    Ok(LinePath { points })
}

pub fn project_point(
    observation: Observation,
    time_scale: TimeScale,
    value_scale: ValueScale,
    layout: ChartLayout,
) -> StoryResult<PathPoint> {
    Ok(PathPoint {
        x: time_scale.year_to_pixel(observation.year, layout.x_range())?,
        y: value_scale.value_to_pixel(observation.anomaly, layout.y_range())?,
    })
}

#[cfg(test)]
mod tests {
    use super::{LinePath, PathPoint};

    #[test]
    fn path_data_uses_move_then_line_commands() {
        let path = LinePath {
            points: vec![
                PathPoint { x: 0.0, y: 10.5 },
                PathPoint { x: 2.25, y: -0.0 },
                PathPoint { x: 4.0, y: 3.1234 },
            ],
        };
        assert_eq!(path.to_svg_path_data(), "M0,10.5L2.25,0L4,3.123");
    }

    #[test]
    fn empty_path_has_no_data() {
        assert_eq!(LinePath::default().to_svg_path_data(), "");
    }
}
