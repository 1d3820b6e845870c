use crate::core::{Dataset, LinearScale};
use crate::error::{StoryError, StoryResult};

/// Half-height used when every anomaly is exactly zero.
const FLAT_SERIES_HALF_SPAN: f64 = 1.0;

/// Anomaly axis with a domain symmetric around zero.
///
/// The zero line always sits at the vertical center of the plot so positive
/// and negative deviations share one visual scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    linear: LinearScale,
}

impl ValueScale {
    /// Builds `[-m, m]` from an explicit magnitude and nices it outwards.
    pub fn symmetric(magnitude: f64, tick_count: usize) -> StoryResult<Self> {
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(StoryError::InvalidData(
                "value scale magnitude must be finite and >= 0".to_owned(),
            ));
        }
        let magnitude = if magnitude == 0.0 {
            FLAT_SERIES_HALF_SPAN
        } else {
            magnitude
        };
        let niced = LinearScale::new(-magnitude, magnitude)?.nice(tick_count);
        let (start, end) = niced.domain();
        // Niced bounds are symmetric already; pin them against float drift.
        let half = start.abs().max(end.abs());
        Ok(Self {
            linear: LinearScale::new(-half, half)?,
        })
    }

    pub fn from_dataset(dataset: &Dataset, tick_count: usize) -> StoryResult<Self> {
        let magnitude = dataset.max_abs_anomaly().ok_or_else(|| {
            StoryError::InvalidData("value scale cannot be built from empty data".to_owned())
        })?;
        Self::symmetric(magnitude, tick_count)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        self.linear.ticks(tick_count)
    }

    #[must_use]
    pub fn tick_step(self, tick_count: usize) -> f64 {
        self.linear.tick_step(tick_count)
    }

    pub fn value_to_pixel(self, value: f64, range: (f64, f64)) -> StoryResult<f64> {
        self.linear.domain_to_pixel(value, range)
    }
}
