use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use anyhow::{anyhow, Result};

use crate::error::Error;

/// Years accepted from user input. The engine itself takes any year.
pub const SANE_YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

pub fn parse_year(input: &str) -> std::result::Result<i32, Error> {
    let input = input.trim();
    let year: i32 = input.parse().map_err(|_| Error::ParseYear(input.to_string()))?;
    if !SANE_YEARS.contains(&year) {
        return Err(Error::YearOutOfRange(year));
    }
    Ok(year)
}

pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse day: {} (expected YYYY-MM-DD)", input))
}

/// Parses a point in time typed by the user. Times without an offset are local time.
pub fn parse_human_datetime(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    // 1. Reserved keywords
    if input.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }

    // 2. Time of day today (09:30, 17:05:10)
    for format in ["%H:%M", "%H:%M:%S"] {
        if let Ok(time) = NaiveTime::parse_from_str(input, format) {
            return local_to_utc(Local::now().date_naive().and_time(time));
        }
    }

    // 3. Full timestamps
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return local_to_utc(dt);
        }
    }

    Err(anyhow!("Could not parse time: {}", input))
}

fn local_to_utc(local_dt: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&local_dt)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("{} does not exist in the local time zone", local_dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024", 2024)]
    #[case(" 1999 ", 1999)]
    #[case("1000", 1000)]
    #[case("9999", 9999)]
    fn test_parse_year(#[case] input: &str, #[case] expected: i32) {
        assert_eq!(parse_year(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_year_errors() {
        assert!(matches!(parse_year("twenty"), Err(Error::ParseYear(_))));
        assert!(matches!(parse_year(""), Err(Error::ParseYear(_))));
        assert!(matches!(parse_year("999"), Err(Error::YearOutOfRange(999))));
        assert!(matches!(parse_year("10000"), Err(Error::YearOutOfRange(10000))));
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day("2024-06-13").unwrap(), NaiveDate::from_ymd_opt(2024, 6, 13).unwrap());
        assert!(parse_day("13.06.2024").is_err());
    }

    // Local-time formats depend on the machine's zone; only offset-carrying input is pinned here.
    #[test]
    fn test_parse_human_datetime_rfc3339() {
        let parsed = parse_human_datetime("2024-06-13T09:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 6, 13, 7, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_human_datetime_smoke() {
        assert!(parse_human_datetime("now").is_ok());
        assert!(parse_human_datetime("2024-06-13 09:30").is_ok());
        assert!(parse_human_datetime("tomorrow-ish").is_err());
    }
}
