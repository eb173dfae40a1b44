//! `LayoutConfig`: tunables for the workspace layout engine.
//!
//! Covers:
//! - resize floor and drop-zone geometry used by the renderer and drag coordinator
//! - the name given to a freshly created workspace
//! - the key under which the workspace blob is persisted
//! - YAML load/save with atomic write and XDG-style path helpers

use crate::defaults;
use crate::error::ConfigError;
use crate::types::LogLevel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Layout engine configuration, stored at `~/.config/chatdock/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Smallest size (percent of the parent group) a panel may be resized to
    #[serde(default = "crate::defaults::min_panel_size")]
    pub min_panel_size: f32,

    /// Fraction of a hovered panel's width/height that counts as an edge drop zone
    #[serde(default = "crate::defaults::drop_edge_threshold")]
    pub drop_edge_threshold: f32,

    /// Pointer travel (pixels) required before a tab press becomes a drag
    #[serde(default = "crate::defaults::drag_activation_distance")]
    pub drag_activation_distance: f32,

    /// Width of the resize handle placed between sibling panels (pixels)
    #[serde(default = "crate::defaults::resize_handle_width")]
    pub resize_handle_width: f32,

    /// Sizes given to the two children of a freshly split panel
    #[serde(default = "crate::defaults::default_split_sizes")]
    pub default_split_sizes: [f32; 2],

    /// Display name of a freshly created workspace
    #[serde(default = "crate::defaults::workspace_name")]
    pub workspace_name: String,

    /// Key under which the workspace blob is persisted
    #[serde(default = "crate::defaults::storage_key")]
    pub storage_key: String,

    /// Verbosity of the debug log file
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_panel_size: defaults::min_panel_size(),
            drop_edge_threshold: defaults::drop_edge_threshold(),
            drag_activation_distance: defaults::drag_activation_distance(),
            resize_handle_width: defaults::resize_handle_width(),
            default_split_sizes: defaults::default_split_sizes(),
            workspace_name: defaults::workspace_name(),
            storage_key: defaults::storage_key(),
            log_level: LogLevel::default(),
        }
    }
}

impl LayoutConfig {
    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// A missing or empty file yields the defaults. Out-of-range values are
    /// clamped with a warning rather than rejected.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Config path: {:?}", path);

        if !path.exists() {
            log::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: LayoutConfig =
            serde_yaml_ng::from_str(&contents).map_err(ConfigError::Parse)?;

        if let Err(e) = config.validate() {
            log::warn!("{e}; clamping out-of-range values");
            config.clamp_to_valid_ranges();
        }

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }

        let yaml = serde_yaml_ng::to_string(self).map_err(ConfigError::Serialize)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(ConfigError::Io)?;
        fs::rename(&temp_path, path).map_err(ConfigError::Io)?;

        log::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check every field against its allowed range.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !(1.0..=45.0).contains(&self.min_panel_size) {
            return Err(ConfigError::Validation(format!(
                "min_panel_size must be within 1..=45, got {}",
                self.min_panel_size
            )));
        }
        if !(self.drop_edge_threshold > 0.0 && self.drop_edge_threshold < 0.5) {
            return Err(ConfigError::Validation(format!(
                "drop_edge_threshold must be within (0, 0.5), got {}",
                self.drop_edge_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.drag_activation_distance) {
            return Err(ConfigError::Validation(format!(
                "drag_activation_distance must be within 0..=100, got {}",
                self.drag_activation_distance
            )));
        }
        if self.resize_handle_width < 0.0 {
            return Err(ConfigError::Validation(format!(
                "resize_handle_width must not be negative, got {}",
                self.resize_handle_width
            )));
        }
        if !self.split_sizes_valid() {
            return Err(ConfigError::Validation(format!(
                "default_split_sizes must each be >= min_panel_size and sum to 100, got {:?}",
                self.default_split_sizes
            )));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Pull every out-of-range field back to the nearest valid value.
    pub fn clamp_to_valid_ranges(&mut self) {
        if !self.min_panel_size.is_finite() {
            self.min_panel_size = defaults::min_panel_size();
        }
        self.min_panel_size = self.min_panel_size.clamp(1.0, 45.0);

        if !(self.drop_edge_threshold > 0.0 && self.drop_edge_threshold < 0.5) {
            self.drop_edge_threshold = defaults::drop_edge_threshold();
        }
        if !self.drag_activation_distance.is_finite() {
            self.drag_activation_distance = defaults::drag_activation_distance();
        }
        self.drag_activation_distance = self.drag_activation_distance.clamp(0.0, 100.0);

        if self.resize_handle_width.is_nan() || self.resize_handle_width < 0.0 {
            self.resize_handle_width = defaults::resize_handle_width();
        }
        if !self.split_sizes_valid() {
            self.default_split_sizes = defaults::default_split_sizes();
        }
        if self.storage_key.trim().is_empty() {
            self.storage_key = defaults::storage_key();
        }
    }

    fn split_sizes_valid(&self) -> bool {
        let [a, b] = self.default_split_sizes;
        a >= self.min_panel_size && b >= self.min_panel_size && ((a + b) - 100.0).abs() < 0.01
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir()
                .map(|dir| dir.join("chatdock"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
        #[cfg(not(target_os = "windows"))]
        {
            // Use XDG convention on all platforms: ~/.config/chatdock
            dirs::home_dir()
                .map(|home| home.join(".config").join("chatdock"))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Directory holding persisted workspace state
    pub fn state_dir() -> PathBuf {
        Self::config_dir().join("state")
    }
}
