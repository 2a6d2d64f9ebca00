use anyhow::{Context, Result};
use tracing::info;
use uuid::Uuid;

use crate::model::public_holiday::{group_by_year, PublicHoliday, PublicHolidaysByYear};
use crate::repository::{PublicHolidayRepository, TimelogRepository};

pub struct PublicHolidayService<R: PublicHolidayRepository> {
    repo: R,
}

impl<R: PublicHolidayRepository> PublicHolidayService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn save(&self, holiday: PublicHoliday) -> Result<PublicHoliday> {
        let saved = if holiday.id.is_nil() {
            self.repo.create(holiday).context("failed to save public holiday")?
        } else {
            self.repo.update(holiday).context("failed to save public holiday")?
        };
        info!(id = %saved.id, day = %saved.date(), "public holiday saved");
        Ok(saved)
    }

    pub fn delete(&self, id: &Uuid) -> Result<()> {
        self.repo.delete(id).context("failed to delete public holiday")
    }

    pub fn list(&self) -> Result<Vec<PublicHoliday>> {
        self.repo.list()
    }

    pub fn load_by_year(&self, year: i32) -> Result<Vec<PublicHoliday>> {
        self.repo.load_by_year(year)
    }

    /// All holidays grouped by year, with an entry for every year that has timelogs.
    pub fn load_all<T: TimelogRepository>(
        &self,
        timelogs: &T,
        current_year: i32,
    ) -> Result<PublicHolidaysByYear> {
        let holidays = self.repo.list().context("failed to load public holidays")?;
        let timelog_years = timelogs.unique_years().context("failed to load timelog years")?;
        Ok(group_by_year(holidays, &timelog_years, current_year))
    }
}
