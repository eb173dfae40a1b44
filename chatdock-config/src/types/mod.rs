//! Enum types used by `LayoutConfig` fields.

mod log_level;

pub use log_level::LogLevel;
