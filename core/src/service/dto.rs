use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CODE_NO_PARAM: &str = "RPT-NOPARAM";
pub const CODE_WRONG_PARAM: &str = "RPT-WRONGPARAM";
pub const CODE_PUBLIC_HOLIDAYS: &str = "RPT-PHL";
pub const CODE_TIMELOGS: &str = "RPT-TL";
pub const CODE_CALCULATE: &str = "RPT-CALC";
pub const CODE_OPTIONS: &str = "RPT-OPT";
pub const CODE_VALIDATION: &str = "VALIDATION";
pub const CODE_SAVE: &str = "SAVE";
pub const CODE_HOLIDAYS_ALL: &str = "PHL-ALL";
pub const CODE_HOLIDAY_SAVE: &str = "PHL-SAVE";

/// Error body handed to the outer surface: a stable code, a message for the user and
/// the underlying cause for the log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Error)]
#[serde(rename_all = "PascalCase")]
#[error("{code}: {external}")]
pub struct ErrorPayload {
    pub code: String,
    pub external: String,
    pub internal: String,
}

impl ErrorPayload {
    pub fn new(code: &str, external: impl Into<String>, internal: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            external: external.into(),
            internal: internal.into(),
        }
    }

    /// Payload whose internal message is the full error chain.
    pub fn from_error(code: &str, external: &str, err: &anyhow::Error) -> Self {
        Self::new(code, external, format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_error_payload_json() {
        let payload = ErrorPayload::new(CODE_WRONG_PARAM, "cannot parse year", "invalid digit");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["Code"], "RPT-WRONGPARAM");
        assert_eq!(json["External"], "cannot parse year");
        assert_eq!(json["Internal"], "invalid digit");
        assert_eq!(payload.to_string(), "RPT-WRONGPARAM: cannot parse year");
    }

    #[test]
    fn test_from_error_keeps_context() {
        let err = anyhow!("disk full").context("failed to save timelog");
        let payload = ErrorPayload::from_error(CODE_SAVE, "failed to save timelog", &err);
        assert_eq!(payload.internal, "failed to save timelog: disk full");
    }
}
