use serde::{Deserialize, Serialize};

use crate::core::Dataset;
use crate::core::primitives::year_to_unix_seconds;
use crate::error::{StoryError, StoryResult};
use crate::extensions::AnnotationSpec;

use super::StoryAxes;

pub const MODERN_ERA_START_YEAR: i32 = 1970;
pub const RECORD_YEAR_COUNT: usize = 10;

/// Which observations feed the line of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineWindow {
    All,
    FromYear { year: i32 },
    YearRange { start: i32, end: i32 },
}

/// How dots are classed in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DotRule {
    AllNormal,
    /// Years before `year` are faded, the rest normal.
    FadeBefore { year: i32 },
    /// The `count` largest anomalies are highlighted, the rest faded.
    HighlightTopAnomalies { count: usize },
}

/// Where an annotation points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationAnchor {
    CalendarPoint { year: i32, value: f64 },
    LatestObservation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationTemplate {
    pub title: String,
    pub body: String,
    pub anchor: AnnotationAnchor,
    pub dx: f64,
    pub dy: f64,
    #[serde(default)]
    pub callout_radius: Option<f64>,
    #[serde(default)]
    pub radius_padding: f64,
}

impl AnnotationTemplate {
    /// Checks everything the callout layout would reject later, so a
    /// catalog that loads can always be placed.
    pub fn validate(&self) -> StoryResult<()> {
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
        if let AnnotationAnchor::CalendarPoint { year, value } = self.anchor {
            if !value.is_finite() {
                return Err(StoryError::InvalidData(
                    "annotation anchor value must be finite".to_owned(),
                ));
            }
            year_to_unix_seconds(year)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDefinition {
    pub narrative: String,
    pub line_window: LineWindow,
    pub dot_rule: DotRule,
    pub annotation: AnnotationTemplate,
}

/// Scene text plus its annotation resolved against the loaded data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub index: usize,
    pub narrative: String,
    pub annotation: AnnotationSpec,
}

/// Ordered, immutable list of scenes. Scene indices are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCatalog {
    scenes: Vec<SceneDefinition>,
}

impl Default for SceneCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SceneCatalog {
    /// The three-scene warming story.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            scenes: vec![
                SceneDefinition {
                    narrative: "This chart shows global annual temperature changes from 1880 to today, measured as deviations (anomalies) from a 1951-1980 baseline. Early years show fluctuations, but a clear long-term warming trend is visible.".to_owned(),
                    line_window: LineWindow::All,
                    dot_rule: DotRule::AllNormal,
                    annotation: AnnotationTemplate {
                        title: "Long-Term Trend".to_owned(),
                        body: "A clear warming trend is visible over the long term.".to_owned(),
                        anchor: AnnotationAnchor::CalendarPoint {
                            year: 1940,
                            value: -0.1,
                        },
                        dx: 50.0,
                        dy: -50.0,
                        callout_radius: None,
                        radius_padding: 0.0,
                    },
                },
                SceneDefinition {
                    narrative: "Let's focus on the period from 1970 onwards. The rate of temperature increase sharpens dramatically in this modern era, indicating an acceleration in global warming.".to_owned(),
                    line_window: LineWindow::FromYear {
                        year: MODERN_ERA_START_YEAR,
                    },
                    dot_rule: DotRule::FadeBefore {
                        year: MODERN_ERA_START_YEAR,
                    },
                    annotation: AnnotationTemplate {
                        title: "The Acceleration".to_owned(),
                        body: "From 1970 onwards, the rate of warming accelerates significantly."
                            .to_owned(),
                        anchor: AnnotationAnchor::CalendarPoint {
                            year: 1995,
                            value: 0.4,
                        },
                        dx: -50.0,
                        dy: 50.0,
                        callout_radius: None,
                        radius_padding: 0.0,
                    },
                },
                SceneDefinition {
                    narrative: "The last decade contains the hottest years ever recorded. These points, highlighted in red, starkly illustrate the unprecedented heat extremes we are now experiencing.".to_owned(),
                    line_window: LineWindow::All,
                    dot_rule: DotRule::HighlightTopAnomalies {
                        count: RECORD_YEAR_COUNT,
                    },
                    annotation: AnnotationTemplate {
                        title: "Record Heat".to_owned(),
                        body: "The most recent years are consistently the warmest on record."
                            .to_owned(),
                        anchor: AnnotationAnchor::LatestObservation,
                        dx: -50.0,
                        dy: -50.0,
                        callout_radius: Some(60.0),
                        radius_padding: 5.0,
                    },
                },
            ],
        }
    }

    pub fn from_definitions(scenes: Vec<SceneDefinition>) -> StoryResult<Self> {
        if scenes.is_empty() {
            return Err(StoryError::InvalidData(
                "scene catalog must contain at least one scene".to_owned(),
            ));
        }
        for (offset, scene) in scenes.iter().enumerate() {
            let index = offset + 1;
            scene.annotation.validate().map_err(|e| match e {
                StoryError::InvalidData(reason) => {
                    StoryError::InvalidData(format!("scene {index}: {reason}"))
                }
                other => other,
            })?;
        }
        Ok(Self { scenes })
    }

    pub fn from_json_str(input: &str) -> StoryResult<Self> {
        let scenes: Vec<SceneDefinition> = serde_json::from_str(input)
            .map_err(|e| StoryError::InvalidData(format!("failed to parse scene catalog: {e}")))?;
        Self::from_definitions(scenes)
    }

    pub fn to_json_pretty(&self) -> StoryResult<String> {
        serde_json::to_string_pretty(&self.scenes)
            .map_err(|e| StoryError::InvalidData(format!("failed to serialize scene catalog: {e}")))
    }

    #[must_use]
    pub fn total_scenes(&self) -> usize {
        self.scenes.len()
    }

    pub fn definition(&self, index: usize) -> StoryResult<&SceneDefinition> {
        index
            .checked_sub(1)
            .and_then(|offset| self.scenes.get(offset))
            .ok_or(StoryError::SceneOutOfRange {
                index,
                total: self.scenes.len(),
            })
    }

    /// Looks up the narrative and resolves the annotation anchor to chart
    /// pixels. Anchors on the latest observation follow the data; calendar
    /// anchors are fixed.
    pub fn describe(
        &self,
        index: usize,
        dataset: &Dataset,
        axes: &StoryAxes,
    ) -> StoryResult<SceneDescriptor> {
        let definition = self.definition(index)?;
        let template = &definition.annotation;
        let anchor = match template.anchor {
            AnnotationAnchor::CalendarPoint { year, value } => {
                axes.project_calendar_point(year, value)?
            }
            AnnotationAnchor::LatestObservation => {
                let latest = dataset.latest().ok_or_else(|| {
                    StoryError::InvalidData(
                        "latest-observation anchor needs a non-empty dataset".to_owned(),
                    )
                })?;
                axes.project(latest)?
            }
        };

        Ok(SceneDescriptor {
            index,
            narrative: definition.narrative.clone(),
            annotation: AnnotationSpec {
                title: template.title.clone(),
                body: template.body.clone(),
                anchor,
                dx: template.dx,
                dy: template.dy,
                callout_radius: template.callout_radius,
                radius_padding: template.radius_padding,
            },
        })
    }
}
