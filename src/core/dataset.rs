use std::cmp::Reverse;

use indexmap::IndexSet;
use ordered_float::OrderedFloat;

use crate::core::Observation;

/// Immutable, chronologically ordered anomaly series.
///
/// Row order of the source is preserved; it is the order the dataset was
/// published in and the order ties are resolved by.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    #[must_use]
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    #[must_use]
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let first = self.observations.first()?.year;
        Some(
            self.observations
                .iter()
                .fold((first, first), |(min, max), observation| {
                    (min.min(observation.year), max.max(observation.year))
                }),
        )
    }

    /// Largest absolute anomaly, the half-height of the symmetric value axis.
    #[must_use]
    pub fn max_abs_anomaly(&self) -> Option<f64> {
        self.observations
            .iter()
            .map(|observation| observation.anomaly.abs())
            .max_by(f64::total_cmp)
    }

    /// Last row of the source, i.e. the most recent observation.
    #[must_use]
    pub fn latest(&self) -> Option<Observation> {
        self.observations.last().copied()
    }

    #[must_use]
    pub fn find_year(&self, year: i32) -> Option<Observation> {
        self.observations
            .iter()
            .copied()
            .find(|observation| observation.year == year)
    }

    /// Years of the `count` largest anomalies.
    ///
    /// Uses a stable descending sort, so equal anomalies keep source order and
    /// the earlier row wins a tie at the cut-off.
    #[must_use]
    pub fn top_anomaly_years(&self, count: usize) -> IndexSet<i32> {
        let mut ranked: Vec<&Observation> = self.observations.iter().collect();
        ranked.sort_by_key(|observation| Reverse(OrderedFloat(observation.anomaly)));
        ranked
            .into_iter()
            .take(count)
            .map(|observation| observation.year)
            .collect()
    }
}

impl From<Vec<Observation>> for Dataset {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}
