//! `Tab`: one conversation placed in a panel's tab bar.

use super::common::{ConversationId, TabId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A UI handle referencing exactly one conversation
///
/// `title` and `owner_id` are denormalised from the conversation provider
/// for display. Only `title` (and the pin flag) change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Unique identifier, generated at creation
    pub id: TabId,
    /// Conversation shown by this tab
    pub conversation_id: ConversationId,
    /// Display title (synced from the conversation)
    pub title: String,
    /// Assistant/app the conversation belongs to
    pub owner_id: String,
    /// Pinned tabs are kept at the user's request; purely informational here
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_pinned: bool,
}

impl Tab {
    /// Create a new tab with a fresh ID
    pub fn new(
        conversation_id: impl Into<ConversationId>,
        title: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id: conversation_id.into(),
            title: title.into(),
            owner_id: owner_id.into(),
            is_pinned: false,
        }
    }
}
