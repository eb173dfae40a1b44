//! Panel split, close, resize and focus.

use super::WorkspaceStore;
use crate::layout::{
    GroupId, LayoutNode, Panel, PanelGroup, PanelId, RemoveResult, SplitDirection, TabId,
};

impl WorkspaceStore {
    /// Split a panel in two
    ///
    /// The panel is replaced by a group holding `[original, new empty panel]`
    /// with the configured sizes. The new panel is always second and becomes
    /// the active panel. Returns its ID, or `None` for an unknown panel.
    pub fn split_panel(&mut self, panel_id: PanelId, direction: SplitDirection) -> Option<PanelId> {
        crate::debug_info!(
            "PANEL_SPLIT",
            "split_panel called for panel {} direction={:?}",
            panel_id,
            direction
        );

        let mut next = self.draft();
        let new_panel = Panel::new();
        let new_id = new_panel.id;
        let sizes = self.split_sizes.to_vec();

        let replaced = next.workspace.root.replace_panel(panel_id, |original| {
            LayoutNode::Group(PanelGroup::new(
                direction,
                vec![LayoutNode::panel(original), LayoutNode::panel(new_panel)],
                sizes,
            ))
        });
        if !replaced {
            crate::debug_info!("PANEL_SPLIT", "Panel {} not found in tree", panel_id);
            return None;
        }

        next.active_panel_id = Some(new_id);
        log::info!(
            "Split panel {} {:?}, created panel {}",
            panel_id,
            direction,
            new_id
        );
        self.commit("split_panel", next);
        Some(new_id)
    }

    /// Split a panel and move a tab into the new panel as one commit
    ///
    /// Listeners only ever see the finished layout. Returns the new panel's
    /// ID, or `None` (and changes nothing) when the tab is not in `from` or
    /// the target panel is unknown.
    pub fn split_and_move(
        &mut self,
        target: PanelId,
        direction: SplitDirection,
        tab_id: TabId,
        from: PanelId,
    ) -> Option<PanelId> {
        let root = &self.state.workspace.root;
        let Some(tab) = root.find_panel(from).and_then(|p| p.find_tab(tab_id)) else {
            crate::debug_info!("PANEL_SPLIT", "Tab {} not in panel {}, ignoring", tab_id, from);
            return None;
        };
        let tab = tab.clone();

        let mut next = self.draft();
        let new_panel = Panel::new();
        let new_id = new_panel.id;
        let sizes = self.split_sizes.to_vec();

        let replaced = next.workspace.root.replace_panel(target, |original| {
            LayoutNode::Group(PanelGroup::new(
                direction,
                vec![LayoutNode::panel(original), LayoutNode::panel(new_panel)],
                sizes,
            ))
        });
        if !replaced {
            crate::debug_info!("PANEL_SPLIT", "Panel {} not found in tree", target);
            return None;
        }

        if let Some(source) = next.workspace.root.find_panel_mut(from) {
            source.remove_tab(tab_id);
        }
        if let Some(created) = next.workspace.root.find_panel_mut(new_id) {
            created.insert_tab(tab, 0);
        }
        next.active_panel_id = Some(new_id);

        log::info!(
            "Split panel {} {:?} and moved tab {} into new panel {}",
            target,
            direction,
            tab_id,
            new_id
        );
        self.commit("split_and_move", next);
        Some(new_id)
    }

    /// Close a panel and its tabs
    ///
    /// Refused when it is the last panel. Groups left with one child collapse
    /// and the first remaining panel becomes active.
    pub fn close_panel(&mut self, panel_id: PanelId) {
        crate::debug_info!("PANEL_CLOSE", "close_panel called for panel {}", panel_id);

        if !self.can_close_panels() {
            crate::debug_info!("PANEL_CLOSE", "Refusing to close the last panel");
            return;
        }

        let mut next = self.draft();
        let root = std::mem::take(&mut next.workspace.root);
        match root.remove_panel(panel_id) {
            RemoveResult::Removed(new_root) => {
                next.workspace.root = new_root.unwrap_or_default();
                next.active_panel_id = next.workspace.root.flatten_panels().first().map(|p| p.id);

                for panel in next.workspace.root.flatten_panels() {
                    crate::debug_info!(
                        "PANEL_CLOSE",
                        "Remaining panel {} with {} tab(s)",
                        panel.id,
                        panel.tabs.len()
                    );
                }
                log::info!("Closed panel {}", panel_id);
                self.commit("close_panel", next);
            }
            RemoveResult::NotFound(_) => {
                crate::debug_info!("PANEL_CLOSE", "Panel {} not found in tree", panel_id);
            }
        }
    }

    /// Replace a group's sizes wholesale
    ///
    /// Ignored when the group is unknown, the length does not match its
    /// children, or a value is not finite.
    pub fn update_panel_sizes(&mut self, group_id: GroupId, sizes: Vec<f32>) {
        let Some(group) = self.state.workspace.root.find_group(group_id) else {
            crate::debug_info!("PANEL_RESIZE", "Group {} not found in tree", group_id);
            return;
        };
        if sizes.len() != group.children.len() {
            log::debug!(
                "Rejected sizes for group {}: {} values for {} children",
                group_id,
                sizes.len(),
                group.children.len()
            );
            return;
        }
        if sizes.iter().any(|s| !s.is_finite()) {
            log::debug!("Rejected non-finite sizes for group {}", group_id);
            return;
        }

        let mut next = self.draft();
        next.workspace.root = next.workspace.root.update_group(group_id, |group| PanelGroup {
            sizes,
            ..group.clone()
        });
        self.commit("update_panel_sizes", next);
    }

    /// Promote a panel to active (click-to-focus)
    pub fn set_active_panel(&mut self, panel_id: PanelId) {
        if self.state.workspace.root.find_panel(panel_id).is_none() {
            return;
        }
        let mut next = self.draft();
        next.active_panel_id = Some(panel_id);
        self.commit("set_active_panel", next);
    }

    /// The active panel
    pub fn active_panel(&self) -> Option<&Panel> {
        self.state.active_panel()
    }

    /// Number of panels in the tree
    pub fn panel_count(&self) -> usize {
        self.state.workspace.root.count_panels()
    }

    /// Whether closing a panel is allowed (more than one exists)
    pub fn can_close_panels(&self) -> bool {
        self.panel_count() > 1
    }
}
