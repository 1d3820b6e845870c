use crate::error::{StoryError, StoryResult};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Continuous linear mapping from a domain to a caller-provided pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> StoryResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(StoryError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Extends the domain outwards to multiples of a round tick step.
    ///
    /// Iterates until the step stabilizes, so `[-m, m]` stays symmetric.
    #[must_use]
    pub fn nice(self, tick_count: usize) -> Self {
        let reversed = self.domain_end < self.domain_start;
        let (mut start, mut stop) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        let mut previous_step: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, tick_count);
            if previous_step == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous_step = Some(step);
        }

        if reversed {
            Self {
                domain_start: stop,
                domain_end: start,
            }
        } else {
            Self {
                domain_start: start,
                domain_end: stop,
            }
        }
    }

    /// Round tick values covering the domain, roughly `tick_count` of them.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        let (start, stop) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        if tick_count == 0 {
            return Vec::new();
        }

        let Some((first, last, increment)) = tick_spec(start, stop, tick_count as f64) else {
            return Vec::new();
        };
        if last < first {
            return Vec::new();
        }
        (first..=last)
            .map(|index| {
                if increment < 0.0 {
                    index as f64 / -increment
                } else {
                    index as f64 * increment
                }
            })
            .collect()
    }

    /// Absolute distance between adjacent ticks for `tick_count`.
    #[must_use]
    pub fn tick_step(self, tick_count: usize) -> f64 {
        let (start, stop) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        let step = tick_increment(start, stop, tick_count);
        if step < 0.0 { -1.0 / step } else { step }
    }

    pub fn domain_to_pixel(self, value: f64, range: (f64, f64)) -> StoryResult<f64> {
        if !value.is_finite() {
            return Err(StoryError::InvalidData("value must be finite".to_owned()));
        }
        validate_range(range)?;

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(range.0 + normalized * (range.1 - range.0))
    }

    pub fn pixel_to_domain(self, pixel: f64, range: (f64, f64)) -> StoryResult<f64> {
        if !pixel.is_finite() {
            return Err(StoryError::InvalidData("pixel must be finite".to_owned()));
        }
        validate_range(range)?;

        let span = self.domain_end - self.domain_start;
        let normalized = (pixel - range.0) / (range.1 - range.0);
        Ok(self.domain_start + normalized * span)
    }
}

fn validate_range(range: (f64, f64)) -> StoryResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
        return Err(StoryError::InvalidData(
            "pixel range must be finite and non-empty".to_owned(),
        ));
    }
    Ok(())
}

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Signed tick increment: positive values are the step itself, negative
/// values encode `-1 / step` so fractional steps stay exact.
pub(crate) fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / (count.max(1) as f64);
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10.0_f64.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        factor * 10.0_f64.powf(power)
    } else {
        -(10.0_f64.powf(-power)) / factor
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10.0_f64.powf(power);
    let factor = step_factor(error);

    let (mut first, mut last, increment) = if power < 0.0 {
        let inc = 10.0_f64.powf(-power) / factor;
        let mut first = (start * inc).round();
        let mut last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        (first, last, -inc)
    } else {
        let inc = 10.0_f64.powf(power) * factor;
        let mut first = (start / inc).round();
        let mut last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        (first, last, inc)
    };

    if last < first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if first.abs() > i64::MAX as f64 || last.abs() > i64::MAX as f64 {
        return None;
    }
    first = first.trunc();
    last = last.trunc();
    Some((first as i64, last as i64, increment))
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn nice_rounds_symmetric_domain_outwards() {
        let scale = LinearScale::new(-1.37, 1.37).expect("scale").nice(10);
        let (start, end) = scale.domain();
        assert!((start + 1.4).abs() <= 1e-12);
        assert!((end - 1.4).abs() <= 1e-12);
    }

    #[test]
    fn nice_keeps_already_round_domain() {
        let scale = LinearScale::new(0.0, 100.0).expect("scale").nice(10);
        assert_eq!(scale.domain(), (0.0, 100.0));
    }

    #[test]
    fn ticks_cover_niced_domain() {
        let scale = LinearScale::new(-1.4, 1.4).expect("scale");
        let ticks = scale.ticks(10);
        assert_eq!(ticks.first().copied(), Some(-1.4));
        assert_eq!(ticks.last().copied(), Some(1.4));
        assert_eq!(ticks.len(), 15);
        assert!(ticks.iter().any(|tick| *tick == 0.0));
    }

    #[test]
    fn tick_step_is_positive_for_fractional_steps() {
        let scale = LinearScale::new(-1.4, 1.4).expect("scale");
        assert!((scale.tick_step(10) - 0.2).abs() <= 1e-12);
    }

    #[test]
    fn mapping_uses_inverted_ranges() {
        let scale = LinearScale::new(-1.0, 1.0).expect("scale");
        let px = scale.domain_to_pixel(0.0, (400.0, 0.0)).expect("px");
        assert!((px - 200.0).abs() <= 1e-12);
        let back = scale.pixel_to_domain(0.0, (400.0, 0.0)).expect("value");
        assert!((back - 1.0).abs() <= 1e-12);
    }
}
