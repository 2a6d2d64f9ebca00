use chrono::{DateTime, Utc};
use anyhow::Result;
use uuid::Uuid;

use crate::model::public_holiday::PublicHoliday;
use crate::model::timelog::Timelog;

pub trait TimelogRepository {
    /// Stores a new timelog, assigning its ID and timestamps.
    fn create(&self, timelog: Timelog) -> Result<Timelog>;
    fn get(&self, id: &Uuid) -> Result<Timelog>;
    fn update(&self, timelog: Timelog) -> Result<Timelog>;
    fn delete(&self, id: &Uuid) -> Result<()>;
    fn list(&self) -> Result<Vec<Timelog>>;
    /// Timelogs starting at or after `start` which stopped before `stop` or are still open.
    fn load_by_date_range(&self, start: DateTime<Utc>, stop: DateTime<Utc>) -> Result<Vec<Timelog>>;
    /// Sorted distinct years of all start and stop times.
    fn unique_years(&self) -> Result<Vec<i32>>;
}

pub trait PublicHolidayRepository {
    fn create(&self, holiday: PublicHoliday) -> Result<PublicHoliday>;
    fn get(&self, id: &Uuid) -> Result<PublicHoliday>;
    fn update(&self, holiday: PublicHoliday) -> Result<PublicHoliday>;
    fn delete(&self, id: &Uuid) -> Result<()>;
    /// All holidays ordered by day.
    fn list(&self) -> Result<Vec<PublicHoliday>>;
    fn load_by_year(&self, year: i32) -> Result<Vec<PublicHoliday>>;
}
