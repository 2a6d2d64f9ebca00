use std::collections::BTreeMap;
use std::io::Read;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::zero_time;
use crate::error::Result;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PublicHoliday {
    #[serde(rename = "ID", default = "Uuid::nil")]
    pub id: Uuid,
    // Only the date part matters, the time of day is ignored.
    #[serde(rename = "Day", default = "zero_time")]
    pub day: DateTime<Utc>,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "HalfDay", default)]
    pub half_day: bool,
    #[serde(rename = "CreatedAt", default = "zero_time")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "ModifiedAt", default = "zero_time")]
    pub modified_at: DateTime<Utc>,
}

impl PublicHoliday {
    pub fn new(day: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            day: day.and_time(chrono::NaiveTime::MIN).and_utc(),
            name: name.into(),
            half_day: false,
            created_at: zero_time(),
            modified_at: zero_time(),
        }
    }

    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn date(&self) -> NaiveDate {
        self.day.date_naive()
    }

    pub fn year(&self) -> i32 {
        self.day.year()
    }
}

/// Holidays keyed by the year they fall in.
pub type PublicHolidaysByYear = BTreeMap<i32, Vec<PublicHoliday>>;

/// Groups holidays by year. Every year that has timelogs gets an entry even without holidays,
/// and when the latest timelog year is `current_year` the following year is offered as well.
pub fn group_by_year(
    holidays: Vec<PublicHoliday>,
    timelog_years: &[i32],
    current_year: i32,
) -> PublicHolidaysByYear {
    let mut by_year = PublicHolidaysByYear::new();

    for holiday in holidays {
        by_year.entry(holiday.year()).or_default().push(holiday);
    }
    for list in by_year.values_mut() {
        list.sort_by_key(|h| h.day);
    }

    for (i, &year) in timelog_years.iter().enumerate() {
        by_year.entry(year).or_default();

        if i == timelog_years.len() - 1 && year == current_year {
            by_year.entry(year + 1).or_default();
        }
    }

    by_year
}
