//! Layout renderer geometry.
//!
//! Turns the layout tree into pixel rectangles for panels and resize
//! handles, and converts handle drags into `update_panel_sizes` calls. No
//! drawing happens here; the host UI paints from a [`LayoutFrame`].

mod layout;
mod resize;

pub use layout::{LayoutFrame, LayoutRenderer, PanelContent, PanelFrame, ResizeHandle};
pub use resize::{ResizeDrag, compute_resized_sizes, effective_sizes};

use crate::config::LayoutConfig;

/// Renderer tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Width of the handle between siblings, in pixels
    pub handle_width: f32,
    /// Resize floor, in percent of the parent group
    pub min_panel_size: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            handle_width: chatdock_config::defaults::resize_handle_width(),
            min_panel_size: chatdock_config::defaults::min_panel_size(),
        }
    }
}

impl From<&LayoutConfig> for RenderSettings {
    fn from(config: &LayoutConfig) -> Self {
        Self {
            handle_width: config.resize_handle_width,
            min_panel_size: config.min_panel_size,
        }
    }
}
