use tracing::{info, warn};

use crate::calendar::{first_day_of_year, last_day_of_year};
use crate::model::report::Report;
use crate::repository::{PublicHolidayRepository, TimelogRepository};
use crate::service::dto::{
    ErrorPayload, CODE_CALCULATE, CODE_NO_PARAM, CODE_OPTIONS, CODE_PUBLIC_HOLIDAYS, CODE_TIMELOGS,
    CODE_WRONG_PARAM,
};
use crate::time::parse_year;

pub struct ReportUseCase<'a, T: TimelogRepository, H: PublicHolidayRepository> {
    timelog_repo: &'a T,
    holiday_repo: &'a H,
}

impl<'a, T: TimelogRepository, H: PublicHolidayRepository> ReportUseCase<'a, T, H> {
    pub fn new(timelog_repo: &'a T, holiday_repo: &'a H) -> Self {
        Self {
            timelog_repo,
            holiday_repo,
        }
    }

    /// Builds the attendance report for the year given as text, e.g. a path or CLI argument.
    pub fn yearly_report(&self, year: &str) -> Result<Report, ErrorPayload> {
        if year.trim().is_empty() {
            return Err(ErrorPayload::new(CODE_NO_PARAM, "no year defined", "no year defined"));
        }

        let year = parse_year(year)
            .map_err(|e| ErrorPayload::new(CODE_WRONG_PARAM, "cannot parse year", e.to_string()))?;

        self.report_for(year)
    }

    pub fn report_for(&self, year: i32) -> Result<Report, ErrorPayload> {
        info!(year, "calculating yearly report");

        let public_holidays = self.holiday_repo.load_by_year(year).map_err(|e| {
            warn!(year, error = %e, "failed to load public holidays");
            let e = e.context("failed to load public holidays");
            ErrorPayload::from_error(CODE_PUBLIC_HOLIDAYS, "failed to calculate report", &e)
        })?;

        // Half-open range: everything starting in the year and stopped before the next one begins.
        let next_year = last_day_of_year(year) + chrono::TimeDelta::seconds(1);
        let timelogs = self
            .timelog_repo
            .load_by_date_range(first_day_of_year(year), next_year)
            .map_err(|e| {
                warn!(year, error = %e, "failed to load timelogs");
                let e = e.context("failed to load timelogs");
                ErrorPayload::from_error(CODE_TIMELOGS, "failed to calculate report", &e)
            })?;

        let mut report = Report::new(year);
        report.calculate(&public_holidays, &timelogs).map_err(|e| {
            ErrorPayload::new(CODE_CALCULATE, "failed to calculate report", e.to_string())
        })?;

        info!(
            year,
            public_holidays = public_holidays.len(),
            timelogs = timelogs.len(),
            warnings = report.warnings.len(),
            "yearly report ready"
        );
        Ok(report)
    }

    /// Years a report can be requested for.
    pub fn options(&self) -> Result<Vec<i32>, ErrorPayload> {
        self.timelog_repo.unique_years().map_err(|e| {
            let e = e.context("failed to load options");
            ErrorPayload::from_error(CODE_OPTIONS, "failed to load report options", &e)
        })
    }
}
