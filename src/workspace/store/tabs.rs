//! Tab lifecycle, activation and keyboard navigation.

use super::WorkspaceStore;
use crate::conversation::{ConversationInfo, ConversationProvider};
use crate::layout::{LayoutNode, Panel, PanelId, Tab, TabId};

impl WorkspaceStore {
    /// Open a conversation as a tab
    ///
    /// An existing tab for the conversation is activated instead of creating
    /// a duplicate. New tabs go to `panel_id`, else the active panel, else the
    /// first panel. The tab's panel becomes the active panel.
    pub fn open_tab(&mut self, conversation: &ConversationInfo, panel_id: Option<PanelId>) -> Tab {
        let mut next = self.draft();

        if let Some((panel, tab)) = next.workspace.root.find_conversation(&conversation.id) {
            let (panel_id, tab) = (panel.id, tab.clone());
            crate::debug_info!(
                "TAB_OPEN",
                "Conversation {} already open in panel {}, activating",
                conversation.id,
                panel_id
            );
            if let Some(panel) = next.workspace.root.find_panel_mut(panel_id) {
                panel.activate(tab.id);
            }
            next.active_panel_id = Some(panel_id);
            self.commit("open_tab", next);
            return tab;
        }

        let root = &next.workspace.root;
        let target = panel_id
            .filter(|id| root.find_panel(*id).is_some())
            .or(next.active_panel_id.filter(|id| root.find_panel(*id).is_some()))
            .or_else(|| root.flatten_panels().first().map(|p| p.id));

        let target = match target {
            Some(id) => id,
            None => {
                let panel = Panel::new();
                let id = panel.id;
                log::warn!("Workspace has no panel; creating root panel {}", id);
                next.workspace.root = LayoutNode::panel(panel);
                id
            }
        };

        let tab = Tab::new(
            conversation.id.clone(),
            conversation.title.clone(),
            conversation.owner_id.clone(),
        );
        if let Some(panel) = next.workspace.root.find_panel_mut(target) {
            panel.push_tab(tab.clone());
        }
        next.active_panel_id = Some(target);

        log::info!(
            "Opened conversation {} as tab {} in panel {}",
            conversation.id,
            tab.id,
            target
        );
        self.commit("open_tab", next);
        tab
    }

    /// Look a conversation up through `provider` and open it
    ///
    /// Returns `None` when the provider does not know the conversation.
    pub fn open_conversation(
        &mut self,
        provider: &dyn ConversationProvider,
        conversation_id: &str,
        panel_id: Option<PanelId>,
    ) -> Option<Tab> {
        let Some(info) = provider.conversation(conversation_id) else {
            log::debug!("Unknown conversation {}, not opening", conversation_id);
            return None;
        };
        Some(self.open_tab(&info, panel_id))
    }

    /// Close a tab in a panel
    ///
    /// If the tab was active, the panel's new last tab becomes active. The
    /// panel stays in the tree even when emptied.
    pub fn close_tab(&mut self, tab_id: TabId, panel_id: PanelId) {
        let contains = self
            .state
            .workspace
            .root
            .find_panel(panel_id)
            .is_some_and(|p| p.find_tab(tab_id).is_some());
        if !contains {
            crate::debug_info!(
                "TAB_CLOSE",
                "Tab {} not found in panel {}, ignoring",
                tab_id,
                panel_id
            );
            return;
        }

        let mut next = self.draft();
        next.workspace.root = next.workspace.root.update_panel(panel_id, |panel| {
            let mut panel = panel.clone();
            panel.remove_tab(tab_id);
            panel
        });
        log::info!("Closed tab {} in panel {}", tab_id, panel_id);
        self.commit("close_tab", next);
    }

    /// Close the active panel's active tab
    pub fn close_active_tab(&mut self) {
        let Some(panel) = self.state.active_panel() else {
            return;
        };
        let Some(tab_id) = panel.active_tab_id else {
            return;
        };
        let panel_id = panel.id;
        self.close_tab(tab_id, panel_id);
    }

    /// Close the tab of a conversation that no longer exists
    pub fn close_conversation_tabs(&mut self, conversation_id: &str) {
        let found = self
            .state
            .workspace
            .root
            .find_conversation(conversation_id)
            .map(|(panel, tab)| (panel.id, tab.id));
        if let Some((panel_id, tab_id)) = found {
            self.close_tab(tab_id, panel_id);
        }
    }

    /// Make a tab active in its panel and make the panel active
    pub fn set_active_tab(&mut self, tab_id: TabId, panel_id: PanelId) {
        let mut next = self.draft();
        let Some(panel) = next.workspace.root.find_panel_mut(panel_id) else {
            return;
        };
        if !panel.activate(tab_id) {
            return;
        }
        next.active_panel_id = Some(panel_id);
        self.commit("set_active_tab", next);
    }

    /// Move a tab between panels or reorder within one
    ///
    /// The tab is inserted at `index` (clamped) or appended, and becomes the
    /// target panel's active tab. The source panel follows the close rule.
    /// When `from == to` the index refers to the order after removal.
    pub fn move_tab(&mut self, tab_id: TabId, from: PanelId, to: PanelId, index: Option<usize>) {
        let root = &self.state.workspace.root;
        let Some(tab) = root.find_panel(from).and_then(|p| p.find_tab(tab_id)) else {
            crate::debug_info!("TAB_MOVE", "Tab {} not in panel {}, ignoring", tab_id, from);
            return;
        };
        if root.find_panel(to).is_none() {
            crate::debug_info!("TAB_MOVE", "Target panel {} not found, ignoring", to);
            return;
        }

        let tab = tab.clone();
        let mut next = self.draft();
        if let Some(source) = next.workspace.root.find_panel_mut(from) {
            source.remove_tab(tab_id);
        }
        if let Some(target) = next.workspace.root.find_panel_mut(to) {
            let at = index.unwrap_or(target.tabs.len());
            target.insert_tab(tab, at);
        }

        log::info!("Moved tab {} from panel {} to panel {}", tab_id, from, to);
        self.commit("move_tab", next);
    }

    /// Activate tab `n` (1-based) of the active panel; `9` means the last tab
    pub fn switch_to_tab_index(&mut self, n: usize) {
        let Some(panel) = self.state.active_panel() else {
            return;
        };
        let tab = if n == 9 {
            panel.tabs.last()
        } else {
            n.checked_sub(1).and_then(|i| panel.tabs.get(i))
        };
        if let Some(tab) = tab {
            let (tab_id, panel_id) = (tab.id, panel.id);
            self.set_active_tab(tab_id, panel_id);
        }
    }

    /// Activate the next tab of the active panel, wrapping around
    pub fn next_tab(&mut self) {
        self.cycle_tab(1);
    }

    /// Activate the previous tab of the active panel, wrapping around
    pub fn prev_tab(&mut self) {
        self.cycle_tab(-1);
    }

    fn cycle_tab(&mut self, step: isize) {
        let Some(panel) = self.state.active_panel() else {
            return;
        };
        let count = panel.tabs.len();
        if count < 2 {
            return;
        }
        let current = panel
            .active_tab_id
            .and_then(|id| panel.tab_index(id))
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(count as isize) as usize;
        let (tab_id, panel_id) = (panel.tabs[next].id, panel.id);
        self.set_active_tab(tab_id, panel_id);
    }

    /// Update the displayed title of a conversation's tab
    pub fn sync_tab_title(&mut self, conversation_id: &str, title: &str) {
        let found = self
            .state
            .workspace
            .root
            .find_conversation(conversation_id)
            .filter(|(_, tab)| tab.title != title)
            .map(|(panel, tab)| (panel.id, tab.id));
        let Some((panel_id, tab_id)) = found else {
            return;
        };

        let mut next = self.draft();
        if let Some(tab) = next
            .workspace
            .root
            .find_panel_mut(panel_id)
            .and_then(|p| p.tabs.iter_mut().find(|t| t.id == tab_id))
        {
            tab.title = title.to_string();
        }
        self.commit("sync_tab_title", next);
    }

    /// Pin or unpin a tab
    pub fn set_tab_pinned(&mut self, tab_id: TabId, pinned: bool) {
        let mut next = self.draft();
        let Some(tab) = next
            .workspace
            .root
            .flatten_panels_mut()
            .into_iter()
            .find_map(|p| p.tabs.iter_mut().find(|t| t.id == tab_id))
        else {
            return;
        };
        tab.is_pinned = pinned;
        self.commit("set_tab_pinned", next);
    }

    /// Every open tab, in panel pre-order then tab-bar order
    pub fn open_tabs(&self) -> Vec<&Tab> {
        self.state
            .workspace
            .root
            .flatten_panels()
            .into_iter()
            .flat_map(|p| p.tabs.iter())
            .collect()
    }

    /// The active panel's active tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.state.active_tab()
    }

    /// Conversation shown by the active tab
    pub fn current_conversation_id(&self) -> Option<&str> {
        self.active_tab().map(|t| t.conversation_id.as_str())
    }

    /// Check whether a conversation has a tab anywhere
    pub fn is_open(&self, conversation_id: &str) -> bool {
        self.state
            .workspace
            .root
            .find_conversation(conversation_id)
            .is_some()
    }
}
