pub mod file;
pub mod public_holiday;
pub mod traits;

// Re-export
pub use file::{data_dir, FileTimelogRepository};
pub use public_holiday::FilePublicHolidayRepository;
pub use traits::{PublicHolidayRepository, TimelogRepository};
