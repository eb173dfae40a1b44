//! Layout configuration.
//!
//! Re-exports all configuration types from the `chatdock-config` crate.
//! All configuration types, defaults, and utilities are defined in `chatdock-config`.

pub use chatdock_config::*;
