use std::fmt;
use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{day_key, zero_time};
use crate::error::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reason {
    #[serde(rename = "work")]
    Work,
    #[serde(rename = "break")]
    Break,
    #[serde(rename = "vacation")]
    Vacation,
    #[serde(rename = "sick leave")]
    SickLeave,
}

impl Reason {
    pub const ALL: [Reason; 4] = [Reason::Work, Reason::Break, Reason::Vacation, Reason::SickLeave];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Work => "work",
            Reason::Break => "break",
            Reason::Vacation => "vacation",
            Reason::SickLeave => "sick leave",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Reason {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Reason::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| Error::InvalidReason(join_names(Reason::ALL.iter().map(Reason::as_str))))
    }
}

/// Where a timelog happened. `Absence` is a pseudo-location for days not spent anywhere.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    #[serde(rename = "absence")]
    Absence,
    #[serde(rename = "home")]
    Home,
    #[serde(rename = "office")]
    Office,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Absence, Location::Home, Location::Office];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Absence => "absence",
            Location::Home => "home",
            Location::Office => "office",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Location::ALL
            .into_iter()
            .find(|l| l.as_str() == wanted)
            .ok_or_else(|| {
                Error::InvalidLocation(join_names(Location::ALL.iter().map(Location::as_str)))
            })
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// A punch: one start/stop interval tagged with a reason and a location.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Timelog {
    #[serde(rename = "ID", default = "Uuid::nil")]
    pub id: Uuid,
    #[serde(rename = "Start", default = "zero_time")]
    pub start: DateTime<Utc>,
    // A missing stop means the interval is still running.
    #[serde(rename = "Stop", default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<DateTime<Utc>>,
    #[serde(rename = "Reason")]
    pub reason: Reason,
    #[serde(rename = "Location")]
    pub location: Location,
    #[serde(rename = "CreatedAt", default = "zero_time")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "ModifiedAt", default = "zero_time")]
    pub modified_at: DateTime<Utc>,
}

impl Timelog {
    pub fn new(start: DateTime<Utc>, reason: Reason, location: Location) -> Self {
        Self {
            id: Uuid::nil(),
            start,
            stop: None,
            reason,
            location,
            created_at: zero_time(),
            modified_at: zero_time(),
        }
    }

    pub fn with_stop(mut self, stop: DateTime<Utc>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start == zero_time() {
            return Err(Error::StartMandatory);
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        match self.stop {
            None => true,
            Some(stop) => stop == zero_time(),
        }
    }

    /// UTC calendar day the interval started on.
    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn day_key(&self) -> String {
        day_key(self.day())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_json_success() {
        let json = r#"
        {
            "ID": "1cbe5ff0-332a-4118-baf3-877cb70e984e",
            "Start": "2022-01-09T22:21:59.5218364+01:00",
            "Stop": "2022-01-09T23:21:59+01:00",
            "Reason": "sick leave",
            "Location": "home",
            "CreatedAt": "2019-12-31T03:36:57.9167778+01:00",
            "ModifiedAt": "2020-01-01T15:44:57.9168378+01:00"
        }"#;

        let timelog = Timelog::from_json(json.as_bytes()).unwrap();
        assert_eq!(timelog.id.to_string(), "1cbe5ff0-332a-4118-baf3-877cb70e984e");
        assert_eq!(timelog.reason, Reason::SickLeave);
        assert_eq!(timelog.location, Location::Home);
        assert_eq!(timelog.stop, Some(Utc.with_ymd_and_hms(2022, 1, 9, 22, 21, 59).unwrap()));
        assert_eq!(timelog.day_key(), "2022-01-09");
    }

    #[test]
    fn test_from_json_no_json() {
        let err = Timelog::from_json("no JSON".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DecodeJson(_)));
    }

    #[test]
    fn test_from_json_unknown_reason() {
        let json = r#"{"Start": "2022-01-09T08:00:00Z", "Reason": "party", "Location": "home"}"#;
        assert!(matches!(Timelog::from_json(json.as_bytes()), Err(Error::DecodeJson(_))));
    }

    #[test]
    fn test_from_json_missing_reason_or_location() {
        let no_reason = r#"{
            "Start": "2024-03-04T08:00:00Z",
            "Stop": "2024-03-04T12:00:00Z",
            "Location": "home"
        }"#;
        assert!(matches!(Timelog::from_json(no_reason.as_bytes()), Err(Error::DecodeJson(_))));

        let no_location = r#"{
            "Start": "2024-03-04T08:00:00Z",
            "Stop": "2024-03-04T12:00:00Z",
            "Reason": "work"
        }"#;
        assert!(matches!(Timelog::from_json(no_location.as_bytes()), Err(Error::DecodeJson(_))));
    }

    #[test]
    fn test_validate_requires_start() {
        let json = r#"{"Reason": "work", "Location": "office"}"#;
        let empty = Timelog::from_json(json.as_bytes()).unwrap();
        assert!(matches!(empty.validate(), Err(Error::StartMandatory)));

        let start = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
        assert!(Timelog::new(start, Reason::Work, Location::Office).validate().is_ok());
    }

    #[test]
    fn test_is_open() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
        let timelog = Timelog::new(start, Reason::Work, Location::Office);
        assert!(timelog.is_open());
        assert!(timelog.clone().with_stop(zero_time()).is_open());
        assert!(!timelog.with_stop(start + chrono::Duration::hours(8)).is_open());
    }

    #[test]
    fn test_stop_is_omitted_when_open() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap();
        let timelog = Timelog::new(start, Reason::Break, Location::Home);
        let json = serde_json::to_string(&timelog).unwrap();
        assert!(!json.contains("\"Stop\""));
        assert!(json.contains("\"Reason\":\"break\""));
    }

    #[test]
    fn test_parse_reason_and_location() {
        assert_eq!("Sick Leave".parse::<Reason>().unwrap(), Reason::SickLeave);
        assert_eq!("office".parse::<Location>().unwrap(), Location::Office);

        let err = "party".parse::<Reason>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "reason must be one of the following values: work, break, vacation, sick leave"
        );
        assert!(matches!("moon".parse::<Location>(), Err(Error::InvalidLocation(_))));
    }
}
