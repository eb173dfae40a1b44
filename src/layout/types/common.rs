//! Shared identifiers and enums for the layout tree.

use uuid::Uuid;

/// Unique identifier for a leaf panel
pub type PanelId = Uuid;

/// Unique identifier for a panel group (split container)
pub type GroupId = Uuid;

/// Unique identifier for a tab
pub type TabId = Uuid;

/// Unique identifier for a workspace
pub type WorkspaceId = Uuid;

/// Identifier of an externally owned conversation.
///
/// The layout engine only references conversations, it never creates them.
pub type ConversationId = String;

/// Direction of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    /// Children are laid out side by side (left to right)
    Horizontal,
    /// Children are stacked (top to bottom)
    Vertical,
}

impl SplitDirection {
    /// Pick the component of a 2D quantity that runs along this direction
    pub fn along(self, x: f32, y: f32) -> f32 {
        match self {
            SplitDirection::Horizontal => x,
            SplitDirection::Vertical => y,
        }
    }
}
