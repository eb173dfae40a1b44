//! Default value functions for configuration.
//!
//! Each function backs a `#[serde(default = "crate::defaults::...")]`
//! attribute on a `LayoutConfig` field, so that a partial YAML file still
//! yields a complete config.

mod layout;
mod misc;

// ── Panel layout & drag-and-drop ───────────────────────────────────────────
pub use layout::{
    default_split_sizes, drag_activation_distance, drop_edge_threshold, min_panel_size,
    resize_handle_width,
};

// ── Workspace & persistence ────────────────────────────────────────────────
pub use misc::{storage_key, workspace_name};
