//! Configuration system for the chatdock workspace layout engine.
//!
//! This crate provides configuration loading, saving, and default values:
//!
//! - `LayoutConfig`: resize floor, drop-zone geometry, drag threshold,
//!   workspace naming and the persistence key
//! - `defaults`: serde default functions for every field
//! - `ConfigError`: typed load/save failures

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::LayoutConfig;
pub use error::ConfigError;
pub use types::LogLevel;
