use indexmap::IndexMap;

use crate::core::{Dataset, Observation, observations_from_year, observations_in_year_window};
use crate::render::DotClass;

use super::scene_catalog::{DotRule, LineWindow};

/// Class of every dot in the dataset, keyed by year in source order.
#[must_use]
pub fn classify_dots(rule: DotRule, dataset: &Dataset) -> IndexMap<i32, DotClass> {
    match rule {
        DotRule::AllNormal => dataset
            .observations()
            .iter()
            .map(|observation| (observation.year, DotClass::Normal))
            .collect(),
        DotRule::FadeBefore { year } => dataset
            .observations()
            .iter()
            .map(|observation| {
                let class = if observation.year < year {
                    DotClass::Faded
                } else {
                    DotClass::Normal
                };
                (observation.year, class)
            })
            .collect(),
        DotRule::HighlightTopAnomalies { count } => {
            let top = dataset.top_anomaly_years(count);
            dataset
                .observations()
                .iter()
                .map(|observation| {
                    let class = if top.contains(&observation.year) {
                        DotClass::Highlighted
                    } else {
                        DotClass::Faded
                    };
                    (observation.year, class)
                })
                .collect()
        }
    }
}

/// Observations feeding the line of a scene, in source order.
#[must_use]
pub fn line_observations(window: LineWindow, dataset: &Dataset) -> Vec<Observation> {
    match window {
        LineWindow::All => dataset.observations().to_vec(),
        LineWindow::FromYear { year } => observations_from_year(dataset.observations(), year),
        LineWindow::YearRange { start, end } => {
            observations_in_year_window(dataset.observations(), start, end)
        }
    }
}
