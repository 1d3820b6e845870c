use crate::core::{LinePath, PathPoint};
use crate::render::Color;

/// Values a transition can blend between.
pub trait Interpolate: Clone {
    /// Blend at `t` in `[0, 1]`; `t == 1` must return `to` exactly.
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        if t >= 1.0 {
            return *to;
        }
        self + (to - self) * t
    }
}

impl Interpolate for Color {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        Color::rgba(
            self.red.interpolate(&to.red, t),
            self.green.interpolate(&to.green, t),
            self.blue.interpolate(&to.blue, t),
            self.alpha.interpolate(&to.alpha, t),
        )
    }
}

/// Vertices are paired by position. Target vertices without a source
/// partner appear at their final position; surplus source vertices are
/// dropped.
impl Interpolate for LinePath {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        if t >= 1.0 {
            return to.clone();
        }
        let points = to
            .points
            .iter()
            .enumerate()
            .map(|(index, target)| match self.points.get(index) {
                Some(source) => PathPoint {
                    x: source.x.interpolate(&target.x, t),
                    y: source.y.interpolate(&target.y, t),
                },
                None => *target,
            })
            .collect();
        LinePath { points }
    }
}

/// Cubic in-out easing, the default easing of chart transitions.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Timed blend of one visual attribute of one element.
///
/// Time is an explicit millisecond clock supplied by the caller, so sampling
/// is deterministic. Retargeting starts the new blend from the value shown
/// at the retarget instant instead of jumping.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<T> {
    from: T,
    to: T,
    start_ms: f64,
    duration_ms: f64,
}

impl<T: Interpolate> Transition<T> {
    /// A transition that already rests at `value`.
    #[must_use]
    pub fn settled(value: T) -> Self {
        Self {
            from: value.clone(),
            to: value,
            start_ms: 0.0,
            duration_ms: 0.0,
        }
    }

    #[must_use]
    pub fn new(from: T, to: T, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: sanitize_duration(duration_ms),
        }
    }

    #[must_use]
    pub fn target(&self) -> &T {
        &self.to
    }

    /// Normalized, eased progress at `now_ms`.
    #[must_use]
    pub fn progress_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let raw = (now_ms - self.start_ms) / self.duration_ms;
        if !raw.is_finite() {
            return 1.0;
        }
        ease_cubic_in_out(raw)
    }

    #[must_use]
    pub fn value_at(&self, now_ms: f64) -> T {
        let progress = self.progress_at(now_ms);
        if progress >= 1.0 {
            return self.to.clone();
        }
        self.from.interpolate(&self.to, progress)
    }

    #[must_use]
    pub fn is_settled_at(&self, now_ms: f64) -> bool {
        self.progress_at(now_ms) >= 1.0
    }

    /// Points the transition at a new target, starting from the value shown
    /// at `now_ms`.
    pub fn retarget(&mut self, to: T, now_ms: f64, duration_ms: f64) {
        self.from = self.value_at(now_ms);
        self.to = to;
        self.start_ms = now_ms;
        self.duration_ms = sanitize_duration(duration_ms);
    }

    /// Freezes the element at the value shown at `now_ms`.
    pub fn cancel(&mut self, now_ms: f64) {
        let current = self.value_at(now_ms);
        *self = Self::settled(current);
    }

    /// Jumps to the target immediately.
    pub fn finish(&mut self) {
        let target = self.to.clone();
        *self = Self::settled(target);
    }
}

fn sanitize_duration(duration_ms: f64) -> f64 {
    if duration_ms.is_finite() && duration_ms > 0.0 {
        duration_ms
    } else {
        0.0
    }
}
