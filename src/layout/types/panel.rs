//! `Panel`: a leaf of the layout tree holding an ordered tab bar.

use super::common::{ConversationId, PanelId, TabId};
use super::tab::Tab;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A leaf layout node: ordered tabs plus the active one
///
/// `active_tab_id` is `None` only when `tabs` is empty, and otherwise names
/// a tab contained in `tabs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: PanelId,
    /// Tab bar order, left to right
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub active_tab_id: Option<TabId>,
}

impl Panel {
    /// Create an empty panel with a fresh ID
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Create an empty panel with a known ID
    pub fn with_id(id: PanelId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active_tab_id: None,
        }
    }

    /// Check if the panel has no tabs
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Get a tab by ID
    pub fn find_tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// Position of a tab in the tab bar
    pub fn tab_index(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    /// Get the tab showing a conversation
    pub fn find_conversation(&self, conversation_id: &str) -> Option<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.conversation_id == conversation_id)
    }

    /// Get the active tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.find_tab(id))
    }

    /// Conversation shown by the active tab
    pub fn active_conversation_id(&self) -> Option<&ConversationId> {
        self.active_tab().map(|t| &t.conversation_id)
    }

    /// Make a tab active. Returns false if the tab is not in this panel.
    pub fn activate(&mut self, id: TabId) -> bool {
        if self.find_tab(id).is_some() {
            self.active_tab_id = Some(id);
            true
        } else {
            false
        }
    }

    /// Append a tab and make it active
    pub fn push_tab(&mut self, tab: Tab) {
        self.active_tab_id = Some(tab.id);
        self.tabs.push(tab);
    }

    /// Insert a tab at `index` (clamped to the tab count) and make it active
    pub fn insert_tab(&mut self, tab: Tab, index: usize) {
        let clamped = index.min(self.tabs.len());
        self.active_tab_id = Some(tab.id);
        self.tabs.insert(clamped, tab);
    }

    /// Remove a tab, returning it
    ///
    /// If the removed tab was active, the new last tab becomes active (or
    /// none when the panel is now empty).
    pub fn remove_tab(&mut self, id: TabId) -> Option<Tab> {
        let index = self.tab_index(id)?;
        let tab = self.tabs.remove(index);
        if self.active_tab_id == Some(id) {
            self.active_tab_id = self.tabs.last().map(|t| t.id);
        }
        Some(tab)
    }

    /// Check the active-tab invariant
    pub fn is_consistent(&self) -> bool {
        match self.active_tab_id {
            None => self.tabs.is_empty(),
            Some(id) => self.find_tab(id).is_some(),
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}
