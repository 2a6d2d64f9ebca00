pub mod public_holiday;
pub mod report;
pub mod timelog;
