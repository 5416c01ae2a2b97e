//! Shared configuration, constants and error types for the Almanac crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
