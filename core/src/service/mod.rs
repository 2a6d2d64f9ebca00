pub mod dto;
pub mod public_holiday_service;
pub mod timelog_service;
