//! Business logic services for the Microgreens Cultivation Tracker

pub mod coach;
pub mod crop;
pub mod harvest;
pub mod log;
pub mod prediction;
pub mod seed;
pub mod stats;
pub mod user;

pub use coach::CoachService;
pub use crop::CropService;
pub use harvest::HarvestService;
pub use log::LogService;
pub use prediction::PredictionService;
pub use seed::SeedService;
pub use stats::StatsService;
pub use user::UserService;
