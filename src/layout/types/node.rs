//! `LayoutNode`: n-ary tree of panel groups with leaf panels.

use super::common::{GroupId, PanelId, SplitDirection, TabId};
use super::panel::Panel;
use super::tab::Tab;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tree node for the panel layout
///
/// The layout is an n-ary tree where:
/// - Leaf nodes are panels holding tabs
/// - Group nodes lay two or more children out along one direction, each
///   child taking `sizes[i]` percent of the group's extent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutNode {
    /// A leaf panel
    Panel(Panel),
    /// A split container
    Group(PanelGroup),
}

/// Internal node of the layout tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelGroup {
    pub id: GroupId,
    pub direction: SplitDirection,
    /// Percent of the group's extent given to each child, same length as `children`
    #[serde(default)]
    pub sizes: Vec<f32>,
    pub children: Vec<LayoutNode>,
}

impl PanelGroup {
    /// Create a group with a fresh ID
    pub fn new(direction: SplitDirection, children: Vec<LayoutNode>, sizes: Vec<f32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            direction,
            sizes,
            children,
        }
    }

    /// Size of child `index`, falling back to an equal share when missing
    pub fn size_at(&self, index: usize) -> f32 {
        match self.sizes.get(index) {
            Some(size) if size.is_finite() => *size,
            _ => 100.0 / self.children.len().max(1) as f32,
        }
    }
}

/// Result of removing a panel from a subtree
pub enum RemoveResult {
    /// The panel was removed. `None` means the whole subtree went away.
    Removed(Option<LayoutNode>),
    /// The panel was not in this subtree; the subtree is handed back intact.
    NotFound(LayoutNode),
}

impl LayoutNode {
    /// Create a leaf node from a panel
    pub fn panel(panel: Panel) -> Self {
        LayoutNode::Panel(panel)
    }

    /// Check if this is a group node
    pub fn is_group(&self) -> bool {
        matches!(self, LayoutNode::Group(_))
    }

    /// ID of this node, whether panel or group
    pub fn id(&self) -> Uuid {
        match self {
            LayoutNode::Panel(panel) => panel.id,
            LayoutNode::Group(group) => group.id,
        }
    }

    /// Get the panel if this is a leaf node
    pub fn as_panel(&self) -> Option<&Panel> {
        match self {
            LayoutNode::Panel(panel) => Some(panel),
            LayoutNode::Group(_) => None,
        }
    }

    /// Find a panel by ID (depth-first)
    pub fn find_panel(&self, id: PanelId) -> Option<&Panel> {
        match self {
            LayoutNode::Panel(panel) => (panel.id == id).then_some(panel),
            LayoutNode::Group(group) => group.children.iter().find_map(|c| c.find_panel(id)),
        }
    }

    /// Find a mutable panel by ID (depth-first)
    pub fn find_panel_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        match self {
            LayoutNode::Panel(panel) => (panel.id == id).then_some(panel),
            LayoutNode::Group(group) => group
                .children
                .iter_mut()
                .find_map(|c| c.find_panel_mut(id)),
        }
    }

    /// Build a new tree with the matched panel replaced by `updater(panel)`
    ///
    /// Returns an unchanged copy when no panel matches.
    pub fn update_panel(&self, id: PanelId, updater: impl FnOnce(&Panel) -> Panel) -> LayoutNode {
        let mut next = self.clone();
        if let Some(panel) = next.find_panel_mut(id) {
            *panel = updater(panel);
        }
        next
    }

    /// Find a group by ID (depth-first)
    pub fn find_group(&self, id: GroupId) -> Option<&PanelGroup> {
        match self {
            LayoutNode::Panel(_) => None,
            LayoutNode::Group(group) => {
                if group.id == id {
                    Some(group)
                } else {
                    group.children.iter().find_map(|c| c.find_group(id))
                }
            }
        }
    }

    /// Find a mutable group by ID (depth-first)
    pub fn find_group_mut(&mut self, id: GroupId) -> Option<&mut PanelGroup> {
        match self {
            LayoutNode::Panel(_) => None,
            LayoutNode::Group(group) => {
                if group.id == id {
                    Some(group)
                } else {
                    group
                        .children
                        .iter_mut()
                        .find_map(|c| c.find_group_mut(id))
                }
            }
        }
    }

    /// Build a new tree with the matched group replaced by `updater(group)`
    pub fn update_group(
        &self,
        id: GroupId,
        updater: impl FnOnce(&PanelGroup) -> PanelGroup,
    ) -> LayoutNode {
        let mut next = self.clone();
        if let Some(group) = next.find_group_mut(id) {
            *group = updater(group);
        }
        next
    }

    /// All panels in this subtree, pre-order
    pub fn flatten_panels(&self) -> Vec<&Panel> {
        let mut panels = Vec::new();
        self.collect_panels(&mut panels);
        panels
    }

    fn collect_panels<'a>(&'a self, out: &mut Vec<&'a Panel>) {
        match self {
            LayoutNode::Panel(panel) => out.push(panel),
            LayoutNode::Group(group) => {
                for child in &group.children {
                    child.collect_panels(out);
                }
            }
        }
    }

    /// All mutable panels in this subtree, pre-order
    pub fn flatten_panels_mut(&mut self) -> Vec<&mut Panel> {
        match self {
            LayoutNode::Panel(panel) => vec![panel],
            LayoutNode::Group(group) => group
                .children
                .iter_mut()
                .flat_map(|c| c.flatten_panels_mut())
                .collect(),
        }
    }

    /// Get all panel IDs in this subtree
    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.flatten_panels().iter().map(|p| p.id).collect()
    }

    /// Count total number of panels
    pub fn count_panels(&self) -> usize {
        match self {
            LayoutNode::Panel(_) => 1,
            LayoutNode::Group(group) => group.children.iter().map(|c| c.count_panels()).sum(),
        }
    }

    /// Find a tab and the panel containing it
    pub fn find_tab(&self, id: TabId) -> Option<(&Panel, &Tab)> {
        self.flatten_panels()
            .into_iter()
            .find_map(|p| p.find_tab(id).map(|t| (p, t)))
    }

    /// Find the tab showing a conversation and the panel containing it
    pub fn find_conversation(&self, conversation_id: &str) -> Option<(&Panel, &Tab)> {
        self.flatten_panels()
            .into_iter()
            .find_map(|p| p.find_conversation(conversation_id).map(|t| (p, t)))
    }

    /// Replace the matched panel leaf with the node built by `build`
    ///
    /// Returns false when no panel matches.
    pub fn replace_panel(&mut self, id: PanelId, build: impl FnOnce(Panel) -> LayoutNode) -> bool {
        let Some(slot) = self.find_leaf_slot(id) else {
            return false;
        };
        let placeholder = LayoutNode::Panel(Panel::with_id(id));
        let LayoutNode::Panel(panel) = std::mem::replace(slot, placeholder) else {
            return false;
        };
        *slot = build(panel);
        true
    }

    fn find_leaf_slot(&mut self, id: PanelId) -> Option<&mut LayoutNode> {
        if matches!(self, LayoutNode::Panel(panel) if panel.id == id) {
            return Some(self);
        }
        match self {
            LayoutNode::Panel(_) => None,
            LayoutNode::Group(group) => group
                .children
                .iter_mut()
                .find_map(|c| c.find_leaf_slot(id)),
        }
    }

    /// Remove a panel from the tree, returning the new tree structure
    ///
    /// Siblings of the removed panel are rescaled to fill 100 percent. A
    /// group left with a single child collapses into that child.
    pub fn remove_panel(self, target_id: PanelId) -> RemoveResult {
        match self {
            LayoutNode::Panel(panel) => {
                if panel.id == target_id {
                    RemoveResult::Removed(None)
                } else {
                    RemoveResult::NotFound(LayoutNode::Panel(panel))
                }
            }
            LayoutNode::Group(group) => {
                let PanelGroup {
                    id,
                    direction,
                    sizes,
                    children,
                } = group;
                let count = children.len();
                let mut kept = Vec::with_capacity(count);
                let mut kept_sizes = Vec::with_capacity(count);
                let mut removed = false;

                for (index, child) in children.into_iter().enumerate() {
                    let size = sizes
                        .get(index)
                        .copied()
                        .filter(|s| s.is_finite())
                        .unwrap_or(100.0 / count.max(1) as f32);
                    if removed {
                        kept.push(child);
                        kept_sizes.push(size);
                        continue;
                    }
                    match child.remove_panel(target_id) {
                        RemoveResult::Removed(None) => removed = true,
                        RemoveResult::Removed(Some(node)) => {
                            removed = true;
                            kept.push(node);
                            kept_sizes.push(size);
                        }
                        RemoveResult::NotFound(node) => {
                            kept.push(node);
                            kept_sizes.push(size);
                        }
                    }
                }

                if !removed {
                    return RemoveResult::NotFound(LayoutNode::Group(PanelGroup {
                        id,
                        direction,
                        sizes,
                        children: kept,
                    }));
                }

                match kept.len() {
                    0 => RemoveResult::Removed(None),
                    1 => RemoveResult::Removed(kept.pop()),
                    _ => RemoveResult::Removed(Some(LayoutNode::Group(PanelGroup {
                        id,
                        direction,
                        sizes: rescale_to_hundred(&kept_sizes),
                        children: kept,
                    }))),
                }
            }
        }
    }
}

impl Default for LayoutNode {
    fn default() -> Self {
        LayoutNode::Panel(Panel::new())
    }
}

/// Scale sizes proportionally so they sum to 100
///
/// Falls back to an equal split when the input sums to zero or less.
pub(crate) fn rescale_to_hundred(sizes: &[f32]) -> Vec<f32> {
    let total: f32 = sizes.iter().sum();
    if sizes.is_empty() {
        return Vec::new();
    }
    if total <= 0.0 || !total.is_finite() {
        return vec![100.0 / sizes.len() as f32; sizes.len()];
    }
    sizes.iter().map(|s| s * 100.0 / total).collect()
}
