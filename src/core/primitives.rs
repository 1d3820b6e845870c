use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::{StoryError, StoryResult};

/// Unix seconds of January 1st, 00:00 UTC of `year`.
pub fn year_to_unix_seconds(year: i32) -> StoryResult<f64> {
    let date = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| StoryError::InvalidData(format!("year {year} is out of range")))?;
    let start = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| StoryError::InvalidData(format!("year {year} has no midnight")))?;
    Ok(datetime_to_unix_seconds(start.and_utc()))
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Calendar year containing the instant; `None` for non-finite or
/// unrepresentable inputs.
#[must_use]
pub fn unix_seconds_to_year(seconds: f64) -> Option<i32> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1_000.0).round();
    if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis as i64).map(|time| time.year())
}

/// Parses a `%Y`-style year field: one to four ASCII digits and nothing
/// else. Signed years are rejected.
#[must_use]
pub fn parse_year_field(raw: &str) -> Option<i32> {
    if raw.is_empty() || raw.len() > 4 || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let year: i32 = raw.parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1).map(|_| year)
}

/// Parses a numeric anomaly field. Empty fields and non-finite values
/// (`***`, `NaN`, `inf`) are rejected.
///
/// An empty field deliberately drops the row rather than reading as `0.0`.
#[must_use]
pub fn parse_anomaly_field(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Formats a year the way a `%Y` time format does: zero padded to four digits.
#[must_use]
pub fn format_year(year: i32) -> String {
    match NaiveDate::from_ymd_opt(year, 1, 1) {
        Some(date) => date.format("%Y").to_string(),
        None => format!("{year:04}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        format_year, parse_anomaly_field, parse_year_field, unix_seconds_to_year,
        year_to_unix_seconds,
    };

    #[test]
    fn year_field_accepts_plain_years_only() {
        assert_eq!(parse_year_field("1880"), Some(1880));
        assert_eq!(parse_year_field("880"), Some(880));
        assert_eq!(parse_year_field("Year"), None);
        assert_eq!(parse_year_field("18800"), None);
        assert_eq!(parse_year_field("19a0"), None);
        assert_eq!(parse_year_field(""), None);
        assert_eq!(parse_year_field("-"), None);
        assert_eq!(parse_year_field("+1880"), None);
        assert_eq!(parse_year_field("-12"), None);
    }

    #[test]
    fn anomaly_field_rejects_missing_markers() {
        assert_eq!(parse_anomaly_field("-.16"), Some(-0.16));
        assert_eq!(parse_anomaly_field(" 1.02 "), Some(1.02));
        assert_eq!(parse_anomaly_field("***"), None);
        assert_eq!(parse_anomaly_field(""), None);
        assert_eq!(parse_anomaly_field("NaN"), None);
        assert_eq!(parse_anomaly_field("inf"), None);
    }

    #[test]
    fn year_round_trips_through_unix_seconds() {
        let seconds = year_to_unix_seconds(1970).expect("epoch year");
        assert_eq!(seconds, 0.0);
        let seconds = year_to_unix_seconds(2023).expect("year");
        assert_eq!(unix_seconds_to_year(seconds), Some(2023));
        assert_eq!(unix_seconds_to_year(f64::NAN), None);
    }

    #[test]
    fn year_labels_are_four_digits() {
        assert_eq!(format_year(1880), "1880");
        assert_eq!(format_year(999), "0999");
    }
}
