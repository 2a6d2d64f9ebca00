use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::calendar::{first_day_of_year, last_day_of_year};
use crate::error::Error;
use crate::model::public_holiday::PublicHoliday;
use crate::repository::file::{init_store, read_records, write_records};
use crate::repository::traits::PublicHolidayRepository;

const PUBLIC_HOLIDAY_FILE_NAME: &str = "public_holidays.json";

#[derive(Clone)]
pub struct FilePublicHolidayRepository {
    file_path: PathBuf,
}

impl FilePublicHolidayRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let file_path = init_store::<PublicHoliday>(base_dir, PUBLIC_HOLIDAY_FILE_NAME)?;
        Ok(FilePublicHolidayRepository { file_path })
    }

    fn read_holidays(&self) -> Result<Vec<PublicHoliday>> {
        read_records(&self.file_path)
    }

    fn write_holidays(&self, holidays: &[PublicHoliday]) -> Result<()> {
        write_records(&self.file_path, holidays)
    }
}

fn not_found(id: &Uuid) -> anyhow::Error {
    Error::NotFound { kind: "Public holiday", id: *id }.into()
}

impl PublicHolidayRepository for FilePublicHolidayRepository {
    fn create(&self, mut holiday: PublicHoliday) -> Result<PublicHoliday> {
        let now = Utc::now();
        holiday.id = Uuid::new_v4();
        holiday.created_at = now;
        holiday.modified_at = now;

        let mut holidays = self.read_holidays()?;
        holidays.push(holiday.clone());
        self.write_holidays(&holidays)?;
        Ok(holiday)
    }

    fn get(&self, id: &Uuid) -> Result<PublicHoliday> {
        self.read_holidays()?
            .into_iter()
            .find(|h| h.id == *id)
            .ok_or_else(|| not_found(id))
    }

    fn update(&self, mut holiday: PublicHoliday) -> Result<PublicHoliday> {
        let mut holidays = self.read_holidays()?;
        let pos = holidays
            .iter()
            .position(|h| h.id == holiday.id)
            .ok_or_else(|| not_found(&holiday.id))?;

        holiday.created_at = holidays[pos].created_at;
        holiday.modified_at = Utc::now();
        holidays[pos] = holiday.clone();
        self.write_holidays(&holidays)?;
        Ok(holiday)
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut holidays = self.read_holidays()?;
        let initial_len = holidays.len();
        holidays.retain(|h| h.id != *id);

        if holidays.len() == initial_len {
            return Err(not_found(id));
        }

        self.write_holidays(&holidays)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<PublicHoliday>> {
        let mut holidays = self.read_holidays()?;
        holidays.sort_by_key(|h| h.day);
        Ok(holidays)
    }

    fn load_by_year(&self, year: i32) -> Result<Vec<PublicHoliday>> {
        let (first, last) = (first_day_of_year(year), last_day_of_year(year));
        let holidays = self
            .list()?
            .into_iter()
            .filter(|h| h.day >= first && h.day <= last)
            .collect();
        Ok(holidays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("ttrack-test-{}", Uuid::new_v4()))
    }

    fn holiday(y: i32, m: u32, d: u32, name: &str) -> PublicHoliday {
        PublicHoliday::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), name)
    }

    #[test]
    fn test_list_is_ordered_by_day() {
        let dir = temp_dir();
        let repo = FilePublicHolidayRepository::new(Some(dir.clone())).unwrap();

        repo.create(holiday(2024, 12, 25, "Christmas")).unwrap();
        repo.create(holiday(2024, 1, 1, "New Year")).unwrap();

        let names: Vec<_> = repo.list().unwrap().into_iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["New Year", "Christmas"]);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_by_year() {
        let dir = temp_dir();
        let repo = FilePublicHolidayRepository::new(Some(dir.clone())).unwrap();

        repo.create(holiday(2023, 12, 31, "New Year's Eve")).unwrap();
        repo.create(holiday(2024, 6, 13, "Corpus Christi")).unwrap();
        repo.create(holiday(2025, 1, 1, "New Year")).unwrap();

        let loaded = repo.load_by_year(2024).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Corpus Christi");
        assert!(repo.load_by_year(1999).unwrap().is_empty());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_update_get_delete() {
        let dir = temp_dir();
        let repo = FilePublicHolidayRepository::new(Some(dir.clone())).unwrap();

        let mut created = repo.create(holiday(2024, 12, 24, "Christmas Eve")).unwrap();
        created.half_day = true;
        repo.update(created.clone()).unwrap();
        assert!(repo.get(&created.id).unwrap().half_day);

        repo.delete(&created.id).unwrap();
        let err = repo.get(&created.id).unwrap_err();
        assert_eq!(err.to_string(), format!("Public holiday with ID {} not found", created.id));

        fs::remove_dir_all(dir).unwrap();
    }
}
