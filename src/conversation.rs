//! Conversation lookups used when opening tabs.
//!
//! Conversations are owned by the chat client. The layout engine only reads
//! their title and owner to denormalise them onto tabs.

use crate::layout::ConversationId;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Display fields of a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationInfo {
    pub id: ConversationId,
    pub title: String,
    /// Assistant/app the conversation belongs to
    pub owner_id: String,
}

impl ConversationInfo {
    pub fn new(
        id: impl Into<ConversationId>,
        title: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            owner_id: owner_id.into(),
        }
    }
}

/// Source of conversation metadata
pub trait ConversationProvider {
    /// Look up a conversation by ID
    fn conversation(&self, id: &str) -> Option<ConversationInfo>;
}

/// In-memory provider, used by the CLI and tests
#[derive(Debug, Default)]
pub struct InMemoryConversations {
    entries: RwLock<HashMap<ConversationId, ConversationInfo>>,
}

impl InMemoryConversations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a conversation
    pub fn insert(&self, info: ConversationInfo) {
        self.entries.write().insert(info.id.clone(), info);
    }

    /// Forget a conversation. Returns the removed entry.
    pub fn remove(&self, id: &str) -> Option<ConversationInfo> {
        self.entries.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ConversationProvider for InMemoryConversations {
    fn conversation(&self, id: &str) -> Option<ConversationInfo> {
        self.entries.read().get(id).cloned()
    }
}

impl FromIterator<ConversationInfo> for InMemoryConversations {
    fn from_iter<I: IntoIterator<Item = ConversationInfo>>(iter: I) -> Self {
        let provider = Self::new();
        for info in iter {
            provider.insert(info);
        }
        provider
    }
}
