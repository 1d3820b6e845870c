use crate::core::primitives::{unix_seconds_to_year, year_to_unix_seconds};
use crate::core::scale::tick_increment;
use crate::core::{Dataset, LinearScale};
use crate::error::{StoryError, StoryResult};

/// Time axis over year-granular observations.
///
/// The domain is stored in Unix seconds so positions reflect real calendar
/// spacing; ticks are always whole years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    linear: LinearScale,
    first_year: i32,
    last_year: i32,
}

impl TimeScale {
    pub fn from_years(first_year: i32, last_year: i32) -> StoryResult<Self> {
        let (first_year, last_year) = if first_year <= last_year {
            (first_year, last_year)
        } else {
            (last_year, first_year)
        };
        let start = year_to_unix_seconds(first_year)?;
        let mut end = year_to_unix_seconds(last_year)?;
        if first_year == last_year {
            // Single-year datasets still need a non-empty domain.
            end = year_to_unix_seconds(last_year + 1)?;
        }
        Ok(Self {
            linear: LinearScale::new(start, end)?,
            first_year,
            last_year,
        })
    }

    /// Domain = `[min year, max year]` over the dataset.
    pub fn from_dataset(dataset: &Dataset) -> StoryResult<Self> {
        let (first, last) = dataset.year_extent().ok_or_else(|| {
            StoryError::InvalidData("time scale cannot be built from empty data".to_owned())
        })?;
        Self::from_years(first, last)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn year_extent(self) -> (i32, i32) {
        (self.first_year, self.last_year)
    }

    pub fn time_to_pixel(self, time: f64, range: (f64, f64)) -> StoryResult<f64> {
        self.linear.domain_to_pixel(time, range)
    }

    pub fn year_to_pixel(self, year: i32, range: (f64, f64)) -> StoryResult<f64> {
        self.time_to_pixel(year_to_unix_seconds(year)?, range)
    }

    pub fn pixel_to_time(self, pixel: f64, range: (f64, f64)) -> StoryResult<f64> {
        self.linear.pixel_to_domain(pixel, range)
    }

    #[must_use]
    pub fn pixel_to_year(self, pixel: f64, range: (f64, f64)) -> Option<i32> {
        self.pixel_to_time(pixel, range)
            .ok()
            .and_then(unix_seconds_to_year)
    }

    /// Whole years that are multiples of a round year step inside the domain.
    #[must_use]
    pub fn year_ticks(self, tick_count: usize) -> Vec<i32> {
        let start = f64::from(self.first_year);
        let stop = f64::from(self.last_year);
        let raw_step = tick_increment(start, stop, tick_count);
        let step = if raw_step >= 1.0 { raw_step as i32 } else { 1 };

        let first = self.first_year.div_euclid(step) * step;
        let first = if first < self.first_year {
            first + step
        } else {
            first
        };

        let mut ticks = Vec::new();
        let mut year = first;
        while year <= self.last_year {
            ticks.push(year);
            year += step;
        }
        ticks
    }
}
