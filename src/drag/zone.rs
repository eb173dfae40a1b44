//! Drop-zone geometry for a hovered panel.

use crate::layout::{Bounds, Point, SplitDirection};
use serde::{Deserialize, Serialize};

/// Region of a hovered panel a tab would be dropped on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    Left,
    Right,
    Top,
    Bottom,
    /// Add to the panel's tab bar instead of splitting
    Center,
}

impl DropZone {
    /// Split a drop on this zone performs; `None` for center
    pub fn split_direction(self) -> Option<SplitDirection> {
        match self {
            DropZone::Left | DropZone::Right => Some(SplitDirection::Horizontal),
            DropZone::Top | DropZone::Bottom => Some(SplitDirection::Vertical),
            DropZone::Center => None,
        }
    }

    pub fn is_edge(self) -> bool {
        self != DropZone::Center
    }
}

/// Classify a pointer position inside a panel rectangle
///
/// A pointer within `threshold` (a fraction of the width or height) of an
/// edge selects that edge. Left and right are checked before top and bottom,
/// so corners resolve horizontally. Degenerate rectangles are all center.
pub fn compute_drop_zone(rect: Bounds, pointer: Point, threshold: f32) -> DropZone {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return DropZone::Center;
    }
    let rel_x = (pointer.x - rect.x) / rect.width;
    let rel_y = (pointer.y - rect.y) / rect.height;

    if rel_x < threshold {
        DropZone::Left
    } else if rel_x > 1.0 - threshold {
        DropZone::Right
    } else if rel_y < threshold {
        DropZone::Top
    } else if rel_y > 1.0 - threshold {
        DropZone::Bottom
    } else {
        DropZone::Center
    }
}

/// Ghost rectangle shown while hovering a zone
///
/// Edge zones cover the half of the panel the new panel would occupy.
pub fn drop_zone_preview(rect: Bounds, zone: Option<DropZone>) -> Option<Bounds> {
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let preview = match zone? {
        DropZone::Left => Bounds::new(rect.x, rect.y, half_w, rect.height),
        DropZone::Right => Bounds::new(rect.x + half_w, rect.y, half_w, rect.height),
        DropZone::Top => Bounds::new(rect.x, rect.y, rect.width, half_h),
        DropZone::Bottom => Bounds::new(rect.x, rect.y + half_h, rect.width, half_h),
        DropZone::Center => rect,
    };
    Some(preview)
}
