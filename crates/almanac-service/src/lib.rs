//! Appointment logic for the agent dashboard: occurrence expansion and the
//! views derived from it.

pub mod agenda;
pub mod briefing;
pub mod error;
pub mod model;
pub mod normalize;
pub mod occurrence;
pub mod summary;

pub use occurrence::{GenerateOptions, generate_occurrences};
