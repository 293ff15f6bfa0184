//! Tolerant field parsing for the theft dataset.
//!
//! The source data is hand-entered: coordinates carry stray characters,
//! dates appear both as ISO and as dotted `DD.MM.YY`, and clock times
//! may or may not have seconds. Every parser here returns `Option` and
//! the loader skips rows it cannot make sense of.

use chrono::{NaiveDate, NaiveTime};

/// Parses a coordinate that may contain stray non-numeric characters.
///
/// Keeps digits, `.` and `-`, then parses. Returns `None` for missing,
/// unparseable, or zero values — a (0, 0) pair marks a failed geocode,
/// not a theft in the Gulf of Guinea.
#[must_use]
pub fn clean_coordinate(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let value = cleaned.parse::<f64>().ok()?;
    if value == 0.0 {
        return None;
    }
    Some(value)
}

/// Parses an incident date in ISO `YYYY-MM-DD` or dotted `DD.MM.YY` /
/// `DD.MM.YYYY` form. Two-digit years are 2000-based (`25` = 2025).
#[must_use]
pub fn parse_incident_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    let mut parts = raw.split('.');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let mut year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses a clock time with or without seconds.
#[must_use]
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        return Some(time);
    }
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}

/// Treats empty and whitespace-only strings as absent.
#[must_use]
pub fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_coordinates_with_stray_characters() {
        let lat = clean_coordinate("16.705° N").unwrap();
        assert!((lat - 16.705).abs() < f64::EPSILON);
        let lon = clean_coordinate(" 74.2433").unwrap();
        assert!((lon - 74.2433).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_and_garbage_coordinates() {
        assert!(clean_coordinate("0.0").is_none());
        assert!(clean_coordinate("").is_none());
        assert!(clean_coordinate("N/A").is_none());
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_incident_date("2024-03-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }

    #[test]
    fn parses_dotted_dates_with_two_digit_years() {
        assert_eq!(
            parse_incident_date("15.03.25").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
        );
        assert_eq!(
            parse_incident_date("01.12.2023").unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );
    }

    #[test]
    fn rejects_invalid_dates() {
        assert!(parse_incident_date("not-a-date").is_none());
        assert!(parse_incident_date("32.01.25").is_none());
        assert!(parse_incident_date("1.2.3.4").is_none());
    }

    #[test]
    fn parses_clock_times_with_and_without_seconds() {
        assert_eq!(
            parse_clock_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_clock_time("23:05:10").unwrap(),
            NaiveTime::from_hms_opt(23, 5, 10).unwrap()
        );
        assert!(parse_clock_time("midnight").is_none());
    }

    #[test]
    fn non_empty_trims_and_drops_blanks() {
        assert_eq!(non_empty("  KARVIR "), Some("KARVIR"));
        assert!(non_empty("   ").is_none());
        assert!(non_empty("").is_none());
    }
}
