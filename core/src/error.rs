use thiserror::Error;
use uuid::Uuid;

/// Domain errors raised by models, the calendar helpers and the report engine.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode JSON: {0}")]
    DecodeJson(#[from] serde_json::Error),

    #[error("start time should not be empty")]
    StartMandatory,

    #[error("location must be one of the following values: {0}")]
    InvalidLocation(String),

    #[error("reason must be one of the following values: {0}")]
    InvalidReason(String),

    #[error("cannot parse year: {0:?}")]
    ParseYear(String),

    #[error("year {0} is out of range")]
    YearOutOfRange(i32),

    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("no open timelog to stop")]
    NothingToStop,
}

pub type Result<T> = std::result::Result<T, Error>;
