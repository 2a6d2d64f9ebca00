use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::calendar::zero_time;
use crate::error::Error;
use crate::model::timelog::Timelog;
use crate::repository::traits::TimelogRepository;

const DEFAULT_DIR_NAME: &str = ".ttrack";
const TIMELOG_FILE_NAME: &str = "timelogs.json";

/// Resolves the data directory (`~/.ttrack` unless given) and makes sure it exists.
pub fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let path = match base_dir {
        Some(dir) => dir,
        None => {
            let home_dir = dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?;
            home_dir.join(DEFAULT_DIR_NAME)
        }
    };
    fs::create_dir_all(&path)
        .with_context(|| format!("Could not create data directory {}", path.display()))?;
    Ok(path)
}

/// Returns the path of a JSON array file in the data directory, creating an empty one if missing.
pub(crate) fn init_store<T: Serialize>(
    base_dir: Option<PathBuf>,
    file_name: &str,
) -> Result<PathBuf> {
    let mut path = data_dir(base_dir)?;
    path.push(file_name);

    if !path.exists() {
        write_records(&path, &Vec::<T>::new())?;
        debug!(path = %path.display(), "created empty store");
    }

    Ok(path)
}

pub(crate) fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let records = serde_json::from_reader(reader)
        .with_context(|| format!("Could not read {}", path.display()))?;
    Ok(records)
}

pub(crate) fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

#[derive(Clone)]
pub struct FileTimelogRepository {
    file_path: PathBuf,
}

impl FileTimelogRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let file_path = init_store::<Timelog>(base_dir, TIMELOG_FILE_NAME)?;
        Ok(FileTimelogRepository { file_path })
    }

    fn read_timelogs(&self) -> Result<Vec<Timelog>> {
        read_records(&self.file_path)
    }

    fn write_timelogs(&self, timelogs: &[Timelog]) -> Result<()> {
        write_records(&self.file_path, timelogs)
    }
}

fn not_found(id: &Uuid) -> anyhow::Error {
    Error::NotFound { kind: "Timelog", id: *id }.into()
}

impl TimelogRepository for FileTimelogRepository {
    fn create(&self, mut timelog: Timelog) -> Result<Timelog> {
        let now = Utc::now();
        timelog.id = Uuid::new_v4();
        timelog.created_at = now;
        timelog.modified_at = now;

        let mut timelogs = self.read_timelogs()?;
        timelogs.push(timelog.clone());
        self.write_timelogs(&timelogs)?;
        Ok(timelog)
    }

    fn get(&self, id: &Uuid) -> Result<Timelog> {
        self.read_timelogs()?
            .into_iter()
            .find(|t| t.id == *id)
            .ok_or_else(|| not_found(id))
    }

    fn update(&self, mut timelog: Timelog) -> Result<Timelog> {
        let mut timelogs = self.read_timelogs()?;
        let pos = timelogs
            .iter()
            .position(|t| t.id == timelog.id)
            .ok_or_else(|| not_found(&timelog.id))?;

        timelog.created_at = timelogs[pos].created_at;
        timelog.modified_at = Utc::now();
        timelogs[pos] = timelog.clone();
        self.write_timelogs(&timelogs)?;
        Ok(timelog)
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut timelogs = self.read_timelogs()?;
        let initial_len = timelogs.len();
        timelogs.retain(|t| t.id != *id);

        if timelogs.len() == initial_len {
            return Err(not_found(id));
        }

        self.write_timelogs(&timelogs)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<Timelog>> {
        let mut timelogs = self.read_timelogs()?;
        timelogs.sort_by_key(|t| t.start);
        Ok(timelogs)
    }

    fn load_by_date_range(
        &self,
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
    ) -> Result<Vec<Timelog>> {
        let timelogs: Vec<Timelog> = self
            .list()?
            .into_iter()
            .filter(|t| t.start >= start && t.stop.map_or(true, |s| s < stop))
            .collect();
        Ok(timelogs)
    }

    fn unique_years(&self) -> Result<Vec<i32>> {
        let mut years = BTreeSet::new();
        for timelog in self.read_timelogs()? {
            years.insert(timelog.start.year());
            if let Some(stop) = timelog.stop.filter(|s| *s != zero_time()) {
                years.insert(stop.year());
            }
        }
        Ok(years.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::timelog::{Location, Reason};
    use chrono::{Duration, TimeZone};

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("ttrack-test-{}", Uuid::new_v4()))
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let dir = temp_dir();
        let repo = FileTimelogRepository::new(Some(dir.clone())).unwrap();

        let timelog = Timelog::new(at(2024, 1, 2, 8), Reason::Work, Location::Office);
        let created = repo.create(timelog).unwrap();
        assert!(!created.id.is_nil());
        assert_eq!(created.created_at, created.modified_at);
        assert_eq!(repo.get(&created.id).unwrap(), created);
        assert!(dir.join(TIMELOG_FILE_NAME).exists());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_update_and_delete() {
        let dir = temp_dir();
        let repo = FileTimelogRepository::new(Some(dir.clone())).unwrap();

        let timelog = Timelog::new(at(2024, 1, 2, 8), Reason::Work, Location::Office);
        let mut timelog = repo.create(timelog).unwrap();
        timelog.stop = Some(at(2024, 1, 2, 16));
        let updated = repo.update(timelog.clone()).unwrap();
        assert_eq!(updated.created_at, timelog.created_at);
        assert_eq!(repo.get(&timelog.id).unwrap().stop, Some(at(2024, 1, 2, 16)));

        repo.delete(&timelog.id).unwrap();
        assert!(repo.list().unwrap().is_empty());

        let err = repo.delete(&timelog.id).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NotFound { .. })));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_load_by_date_range() {
        let dir = temp_dir();
        let repo = FileTimelogRepository::new(Some(dir.clone())).unwrap();

        let inside = Timelog::new(at(2024, 3, 1, 8), Reason::Work, Location::Home)
            .with_stop(at(2024, 3, 1, 12));
        let open = Timelog::new(at(2024, 12, 31, 20), Reason::Work, Location::Home);
        let before = Timelog::new(at(2023, 12, 31, 8), Reason::Work, Location::Home)
            .with_stop(at(2023, 12, 31, 9));
        let crossing = Timelog::new(at(2024, 12, 31, 22), Reason::Work, Location::Home)
            .with_stop(at(2024, 12, 31, 22) + Duration::hours(3));
        for timelog in [inside, open, before, crossing] {
            repo.create(timelog).unwrap();
        }

        let loaded = repo.load_by_date_range(at(2024, 1, 1, 0), at(2025, 1, 1, 0)).unwrap();
        let starts: Vec<_> = loaded.iter().map(|t| t.start).collect();
        assert_eq!(starts, vec![at(2024, 3, 1, 8), at(2024, 12, 31, 20)]);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_unique_years() {
        let dir = temp_dir();
        let repo = FileTimelogRepository::new(Some(dir.clone())).unwrap();
        assert!(repo.unique_years().unwrap().is_empty());

        let crossing = Timelog::new(at(2022, 12, 31, 23), Reason::Work, Location::Home)
            .with_stop(at(2023, 1, 1, 1));
        let open = Timelog::new(at(2021, 5, 5, 8), Reason::Work, Location::Home);
        let zero_stop =
            Timelog::new(at(2022, 6, 6, 8), Reason::Work, Location::Home).with_stop(zero_time());
        for timelog in [crossing, open, zero_stop] {
            repo.create(timelog).unwrap();
        }

        assert_eq!(repo.unique_years().unwrap(), vec![2021, 2022, 2023]);

        fs::remove_dir_all(dir).unwrap();
    }
}
