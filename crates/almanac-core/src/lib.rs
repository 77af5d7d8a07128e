//! Shared building blocks for the almanac workspace: configuration, error
//! types, route constants and the categorical enums carried by appointments.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
