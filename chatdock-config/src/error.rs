//! Typed error variants for the chatdock-config crate.
//!
//! `LayoutConfig::load` and `LayoutConfig::save` return `anyhow::Result` for
//! convenience; the underlying failures are `ConfigError` values and can be
//! recovered with `downcast_ref`.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatdock_config::ConfigError;
//!
//! fn check_load_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io(io) => eprintln!("I/O error: {io}"),
//!             ConfigError::Parse(p) => eprintln!("YAML parse error: {p}"),
//!             ConfigError::Serialize(s) => eprintln!("YAML write error: {s}"),
//!             ConfigError::Validation(msg) => eprintln!("Validation: {msg}"),
//!         }
//!     }
//! }
//! ```

use thiserror::Error;

/// Errors that can occur when loading or saving the layout configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    /// The config could not be rendered back to YAML.
    #[error("YAML serialization error: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string names the field and the reason.
    #[error("Config validation error: {0}")]
    Validation(String),
}
