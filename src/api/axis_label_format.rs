use crate::core::primitives::format_year;

/// Decimal places needed to show a tick step without rounding it away.
pub(super) fn precision_from_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 2;
    }
    let text = format!("{:.12}", step.abs());
    let Some((_, fraction)) = text.split_once('.') else {
        return 0;
    };
    fraction.trim_end_matches('0').len().clamp(0, 12)
}

/// Value-axis label with a precision derived from the tick step.
pub(super) fn format_value_tick(value: f64, tick_step: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let precision = precision_from_step(tick_step);
    let text = format!("{value:.precision$}");
    // Avoid "-0.0" on the zero tick.
    if text.trim_start_matches('-').chars().all(|ch| ch == '0' || ch == '.') {
        text.trim_start_matches('-').to_owned()
    } else {
        text
    }
}

pub(super) fn format_time_tick(year: i32) -> String {
    format_year(year)
}

#[cfg(test)]
mod tests {
    use super::{format_time_tick, format_value_tick, precision_from_step};

    #[test]
    fn precision_follows_step_magnitude() {
        assert_eq!(precision_from_step(0.2), 1);
        assert_eq!(precision_from_step(0.05), 2);
        assert_eq!(precision_from_step(1.0), 0);
        assert_eq!(precision_from_step(f64::NAN), 2);
    }

    #[test]
    fn value_ticks_drop_negative_zero() {
        assert_eq!(format_value_tick(-0.0, 0.2), "0.0");
        assert_eq!(format_value_tick(-1.4, 0.2), "-1.4");
        assert_eq!(format_value_tick(0.6000000000000001, 0.2), "0.6");
    }

    #[test]
    fn time_ticks_are_years() {
        assert_eq!(format_time_tick(1900), "1900");
    }
}
