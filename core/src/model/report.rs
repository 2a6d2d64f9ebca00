use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::{day_key, first_day_of_year, is_workday, last_day_of_year};
use crate::error::Result;
use crate::model::public_holiday::PublicHoliday;
use crate::model::timelog::{Location, Reason, Timelog};

pub const WARNING_NO_STOP_TIME: &str = "no stop time";

/// Yearly attendance report.
///
/// Built with [`Report::new`] and filled once by [`Report::calculate`]. Maps are ordered so that
/// the same input always serializes to the same JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    pub year: i32,
    pub days: u32,
    pub work_days: u32,
    pub days_on_weekend: u32,
    pub public_holidays: u32,
    pub public_holidays_on_workdays: u32,
    pub first_day: DateTime<Utc>,
    pub last_day: DateTime<Utc>,
    pub work_days_per_reason: BTreeMap<Reason, u32>,
    pub works_days_per_location: BTreeMap<Location, u32>,
    pub warnings: BTreeMap<String, Vec<String>>, // Key: "YYYY-MM-DD"
}

/// What happened on one calendar day, collected in timelog order.
#[derive(Debug, Default)]
struct DayBucket {
    // Distinct non-break reasons in order of first appearance.
    reasons: Vec<Reason>,
    // Location of the first work entry of the day.
    work_location: Option<Location>,
}

impl DayBucket {
    fn record(&mut self, timelog: &Timelog) {
        if timelog.reason == Reason::Work && self.work_location.is_none() {
            self.work_location = Some(timelog.location);
        }
        if timelog.reason != Reason::Break && !self.reasons.contains(&timelog.reason) {
            self.reasons.push(timelog.reason);
        }
    }
}

impl Report {
    pub fn new(year: i32) -> Self {
        let first_day = first_day_of_year(year);
        let last_day = last_day_of_year(year);

        Self {
            year: first_day.year(),
            days: 0,
            work_days: 0,
            days_on_weekend: 0,
            public_holidays: 0,
            public_holidays_on_workdays: 0,
            first_day,
            last_day,
            work_days_per_reason: BTreeMap::new(),
            works_days_per_location: BTreeMap::new(),
            warnings: BTreeMap::new(),
        }
    }

    /// Fills the report from the given holidays and timelogs.
    ///
    /// The inputs are read only and must not change while this runs. Inconsistent timelogs are
    /// reported in `warnings` rather than rejected.
    pub fn calculate(
        &mut self,
        public_holidays: &[PublicHoliday],
        timelogs: &[Timelog],
    ) -> Result<()> {
        self.count_public_holidays(public_holidays);
        self.count_days();

        let buckets = self.group_by_day(timelogs);
        self.warn_about_reasons(&buckets);
        self.tally(&buckets);

        debug!(
            year = self.year,
            days = self.days,
            work_days = self.work_days,
            warnings = self.warnings.len(),
            "report calculated"
        );
        Ok(())
    }

    // `public_holidays` counts records. The workday offset counts each weekday date once.
    fn count_public_holidays(&mut self, public_holidays: &[PublicHoliday]) {
        let mut on_workdays = BTreeSet::new();
        for holiday in public_holidays {
            self.public_holidays += 1;
            if is_workday(holiday.date()) {
                on_workdays.insert(holiday.date());
            }
        }
        self.public_holidays_on_workdays = on_workdays.len() as u32;
    }

    // A holiday on a weekday leaves `work_days` but is never added to `days_on_weekend`.
    fn count_days(&mut self) {
        let mut day = self.first_day;
        while day < self.last_day {
            self.days += 1;
            if is_workday(day.date_naive()) {
                self.work_days += 1;
            } else {
                self.days_on_weekend += 1;
            }
            day += TimeDelta::days(1);
        }

        self.work_days = self.work_days.saturating_sub(self.public_holidays_on_workdays);
    }

    fn group_by_day(&mut self, timelogs: &[Timelog]) -> BTreeMap<NaiveDate, DayBucket> {
        let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

        for timelog in timelogs {
            if timelog.is_open() {
                self.warn(timelog.day(), WARNING_NO_STOP_TIME.to_string());
                continue;
            }
            buckets.entry(timelog.day()).or_default().record(timelog);
        }

        buckets
    }

    fn warn_about_reasons(&mut self, buckets: &BTreeMap<NaiveDate, DayBucket>) {
        for (day, bucket) in buckets {
            if bucket.reasons.len() > 1 {
                let reasons: Vec<&str> = bucket.reasons.iter().map(Reason::as_str).collect();
                self.warn(*day, format!("too many reasons: \"{}\"", reasons.join(", ")));
            }
        }
    }

    fn tally(&mut self, buckets: &BTreeMap<NaiveDate, DayBucket>) {
        for bucket in buckets.values() {
            for reason in &bucket.reasons {
                *self.work_days_per_reason.entry(*reason).or_default() += 1;
            }
            if let Some(location) = bucket.work_location {
                *self.works_days_per_location.entry(location).or_default() += 1;
            }
        }
    }

    fn warn(&mut self, day: NaiveDate, message: String) {
        self.warnings.entry(day_key(day)).or_default().push(message);
    }
}
