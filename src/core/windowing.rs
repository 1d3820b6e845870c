use crate::core::Observation;

/// Returns observations whose year falls inside an inclusive year window.
#[must_use]
pub fn observations_in_year_window(
    observations: &[Observation],
    start: i32,
    end: i32,
) -> Vec<Observation> {
    let (min_year, max_year) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    observations
        .iter()
        .copied()
        .filter(|observation| observation.year >= min_year && observation.year <= max_year)
        .collect()
}

/// Returns observations from `first_year` onwards, keeping source order.
#[must_use]
pub fn observations_from_year(observations: &[Observation], first_year: i32) -> Vec<Observation> {
    observations
        .iter()
        .copied()
        .filter(|observation| observation.year >= first_year)
        .collect()
}
