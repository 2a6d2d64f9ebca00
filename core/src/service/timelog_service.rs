use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::calendar::{first_day_of_year, last_day_of_year};
use crate::error::Error;
use crate::model::timelog::{Location, Reason, Timelog};
use crate::repository::TimelogRepository;

pub struct TimelogService<R: TimelogRepository> {
    repo: R,
}

impl<R: TimelogRepository> TimelogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists the timelog. A nil ID creates a new record, anything else updates.
    pub fn save(&self, timelog: Timelog) -> Result<Timelog> {
        timelog.validate()?;

        let saved = if timelog.id.is_nil() {
            self.repo.create(timelog).context("failed to save timelog")?
        } else {
            self.repo.update(timelog).context("failed to save timelog")?
        };
        info!(id = %saved.id, reason = %saved.reason, "timelog saved");
        Ok(saved)
    }

    pub fn start(&self, at: DateTime<Utc>, reason: Reason, location: Location) -> Result<Timelog> {
        self.save(Timelog::new(at, reason, location))
    }

    /// Closes the given timelog, or the most recently started open one.
    pub fn stop(&self, id: Option<Uuid>, at: DateTime<Utc>) -> Result<Timelog> {
        let mut timelog = match id {
            Some(id) => self.repo.get(&id)?,
            None => self
                .repo
                .list()?
                .into_iter()
                .filter(Timelog::is_open)
                .max_by_key(|t| t.start)
                .ok_or(Error::NothingToStop)?,
        };

        timelog.stop = Some(at);
        self.save(timelog)
    }

    pub fn get(&self, id: &Uuid) -> Result<Timelog> {
        self.repo.get(id)
    }

    pub fn delete(&self, id: &Uuid) -> Result<()> {
        self.repo.delete(id).context("failed to delete timelog")?;
        info!(id = %id, "timelog deleted");
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Timelog>> {
        self.repo.list()
    }

    pub fn list_by_year(&self, year: i32) -> Result<Vec<Timelog>> {
        let next_year = last_day_of_year(year) + chrono::TimeDelta::seconds(1);
        self.repo.load_by_date_range(first_day_of_year(year), next_year)
    }

    pub fn unique_years(&self) -> Result<Vec<i32>> {
        self.repo.unique_years()
    }
}
