//! Shared types and models for the Microgreens Cultivation Tracker
//!
//! This crate contains types shared between the backend, frontend (via WASM),
//! and other components of the system.

pub mod models;
pub mod schedule;
pub mod validation;

pub use models::*;
pub use schedule::*;
pub use validation::*;
