//! Domain models for the Microgreens Cultivation Tracker

mod crop;
mod harvest;
mod log;
mod prediction;
mod seed;
mod user;

pub use crop::*;
pub use harvest::*;
pub use log::*;
pub use prediction::*;
pub use seed::*;
pub use user::*;
