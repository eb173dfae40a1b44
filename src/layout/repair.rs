//! Load-time repair of malformed layout trees.
//!
//! A persisted tree can be damaged by older builds, hand edits or partial
//! writes. Rather than rejecting it, [`repair_tree`] rewrites it into a tree
//! that satisfies every structural invariant and reports what it changed:
//!
//! - groups with zero children are dropped, groups with one child collapse
//! - `sizes` that do not match `children` (length, non-finite, non-positive,
//!   sum away from 100) are rescaled or replaced by an equal split
//! - duplicate panel/group IDs are regenerated
//! - a conversation or tab ID seen twice keeps only its first (pre-order) tab
//! - dangling `active_tab_id` pointers move to the panel's last tab

use super::types::{ConversationId, GroupId, LayoutNode, PanelGroup, PanelId, TabId};
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

/// Sum tolerance before sizes are considered broken
const SIZE_SUM_TOLERANCE: f32 = 0.5;

/// One repair applied to a tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RepairAction {
    RemoveEmptyGroup {
        group_id: GroupId,
    },
    CollapseGroup {
        group_id: GroupId,
    },
    NormalizeSizes {
        group_id: GroupId,
        before: Vec<f32>,
        after: Vec<f32>,
    },
    RegenerateId {
        before: Uuid,
        after: Uuid,
    },
    DropDuplicateTab {
        panel_id: PanelId,
        tab_id: TabId,
        conversation_id: ConversationId,
    },
    FixActiveTab {
        panel_id: PanelId,
        before: Option<TabId>,
        after: Option<TabId>,
    },
    FixActivePanel {
        before: Option<PanelId>,
        after: Option<PanelId>,
    },
}

/// A repaired tree plus the actions that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct RepairOutcome {
    pub root: LayoutNode,
    pub actions: Vec<RepairAction>,
}

impl RepairOutcome {
    /// True when the input already satisfied every invariant
    pub fn is_clean(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Repair a layout tree. Repairing an already valid tree is a no-op.
pub fn repair_tree(root: LayoutNode) -> RepairOutcome {
    let mut actions = Vec::new();
    let mut root = collapse(root, &mut actions).unwrap_or_default();

    let mut seen = Seen::default();
    dedupe(&mut root, &mut seen, &mut actions);

    if !actions.is_empty() {
        log::debug!("Layout repair applied {} action(s)", actions.len());
    }
    RepairOutcome { root, actions }
}

/// Post-order structural pass. `None` means the subtree held no panel.
fn collapse(node: LayoutNode, actions: &mut Vec<RepairAction>) -> Option<LayoutNode> {
    let group = match node {
        LayoutNode::Panel(_) => return Some(node),
        LayoutNode::Group(group) => group,
    };
    let PanelGroup {
        id,
        direction,
        sizes,
        children,
    } = group;

    let aligned = sizes.len() == children.len();
    let mut kept = Vec::with_capacity(children.len());
    let mut kept_sizes = Vec::with_capacity(children.len());
    for (index, child) in children.into_iter().enumerate() {
        if let Some(child) = collapse(child, actions) {
            kept.push(child);
            if aligned {
                kept_sizes.push(sizes[index]);
            }
        }
    }

    match kept.len() {
        0 => {
            actions.push(RepairAction::RemoveEmptyGroup { group_id: id });
            None
        }
        1 => {
            actions.push(RepairAction::CollapseGroup { group_id: id });
            kept.pop()
        }
        n => {
            let candidate = if aligned { kept_sizes } else { sizes };
            let fixed = normalize_sizes(&candidate, n);
            if fixed != candidate || !aligned {
                actions.push(RepairAction::NormalizeSizes {
                    group_id: id,
                    before: candidate,
                    after: fixed.clone(),
                });
            }
            Some(LayoutNode::Group(PanelGroup {
                id,
                direction,
                sizes: fixed,
                children: kept,
            }))
        }
    }
}

/// Return `sizes` unchanged when valid for `count` children, otherwise a
/// proportional rescale or an equal split.
fn normalize_sizes(sizes: &[f32], count: usize) -> Vec<f32> {
    let usable = sizes.len() == count && sizes.iter().all(|s| s.is_finite() && *s > 0.0);
    if !usable {
        return vec![100.0 / count as f32; count];
    }
    let total: f32 = sizes.iter().sum();
    if (total - 100.0).abs() <= SIZE_SUM_TOLERANCE {
        return sizes.to_vec();
    }
    sizes.iter().map(|s| s * 100.0 / total).collect()
}

#[derive(Default)]
struct Seen {
    nodes: HashSet<Uuid>,
    tabs: HashSet<TabId>,
    conversations: HashSet<ConversationId>,
}

/// Pre-order identity pass
fn dedupe(node: &mut LayoutNode, seen: &mut Seen, actions: &mut Vec<RepairAction>) {
    match node {
        LayoutNode::Group(group) => {
            if !seen.nodes.insert(group.id) {
                let fresh = Uuid::new_v4();
                actions.push(RepairAction::RegenerateId {
                    before: group.id,
                    after: fresh,
                });
                group.id = fresh;
                seen.nodes.insert(fresh);
            }
            for child in &mut group.children {
                dedupe(child, seen, actions);
            }
        }
        LayoutNode::Panel(panel) => {
            if !seen.nodes.insert(panel.id) {
                let fresh = Uuid::new_v4();
                actions.push(RepairAction::RegenerateId {
                    before: panel.id,
                    after: fresh,
                });
                panel.id = fresh;
                seen.nodes.insert(fresh);
            }

            let panel_id = panel.id;
            panel.tabs.retain(|tab| {
                let fresh_tab = !seen.tabs.contains(&tab.id);
                let fresh_conv = !seen.conversations.contains(&tab.conversation_id);
                if fresh_tab && fresh_conv {
                    seen.tabs.insert(tab.id);
                    seen.conversations.insert(tab.conversation_id.clone());
                    true
                } else {
                    actions.push(RepairAction::DropDuplicateTab {
                        panel_id,
                        tab_id: tab.id,
                        conversation_id: tab.conversation_id.clone(),
                    });
                    false
                }
            });

            if !panel.is_consistent() {
                let before = panel.active_tab_id;
                panel.active_tab_id = panel.tabs.last().map(|t| t.id);
                actions.push(RepairAction::FixActiveTab {
                    panel_id,
                    before,
                    after: panel.active_tab_id,
                });
            }
        }
    }
}
