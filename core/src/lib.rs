pub mod calendar;
pub mod error;
pub mod model;
pub mod repository;
pub mod input;
pub mod time;
pub mod service;
pub mod usecase;

pub use error::{Error, Result};
pub use model::public_holiday::{PublicHoliday, PublicHolidaysByYear};
pub use model::report::Report;
pub use model::timelog::{Location, Reason, Timelog};
pub use repository::{
    data_dir, FilePublicHolidayRepository, FileTimelogRepository, PublicHolidayRepository,
    TimelogRepository,
};
pub use input::{parse_location, parse_reason};
pub use time::{parse_day, parse_human_datetime, parse_year};
pub use service::dto::ErrorPayload;
pub use service::public_holiday_service::PublicHolidayService;
pub use service::timelog_service::TimelogService;
pub use usecase::report::ReportUseCase;
