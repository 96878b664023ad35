//! External API integrations

pub mod growth_coach;

pub use growth_coach::GrowthCoachClient;
