//! HTTP request handlers for the Microgreens Cultivation Tracker

pub mod coach;
pub mod crop;
pub mod harvest;
pub mod health;
pub mod log;
pub mod prediction;
pub mod schedule;
pub mod seed;
pub mod stats;
pub mod user;

pub use coach::*;
pub use crop::*;
pub use harvest::*;
pub use health::*;
pub use log::*;
pub use prediction::*;
pub use schedule::*;
pub use seed::*;
pub use stats::*;
pub use user::*;
