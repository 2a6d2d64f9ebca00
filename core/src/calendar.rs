use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc, Weekday};

use crate::model::public_holiday::PublicHoliday;

// Seconds between 0001-01-01T00:00:00Z and the Unix epoch.
const SECONDS_BEFORE_EPOCH: i64 = 62_135_596_800;

/// Years the calendar can represent with a following year to spare.
pub const MIN_YEAR: i32 = -262_000;
pub const MAX_YEAR: i32 = 262_000;

/// The "unset" timestamp, 0001-01-01T00:00:00Z, used by stored records for missing times.
pub fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH - TimeDelta::seconds(SECONDS_BEFORE_EPOCH)
}

/// Monday to Friday are workdays.
pub fn is_workday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn is_holiday(date: NaiveDate, holidays: &[PublicHoliday]) -> bool {
    holidays.iter().any(|h| h.date() == date)
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Jan 1, 00:00:00 UTC. Years outside the representable range are clamped.
pub fn first_day_of_year(year: i32) -> DateTime<Utc> {
    let year = year.clamp(MIN_YEAR, MAX_YEAR);
    NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Dec 31, 23:59:59 UTC, i.e. one second before the next year starts.
pub fn last_day_of_year(year: i32) -> DateTime<Utc> {
    let year = year.clamp(MIN_YEAR, MAX_YEAR);
    first_day_of_year(year + 1) - TimeDelta::seconds(1)
}
