//! Shared integration test helpers for chatdock.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{conversation, split_store};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use chatdock::conversation::ConversationInfo;
use chatdock::layout::{LayoutNode, PanelId, SplitDirection};
use chatdock::persistence::{FileStore, WorkspacePersistence};
use chatdock::workspace::{WorkspaceState, WorkspaceStore};
use tempfile::TempDir;

/// Conversation `id` titled after it, owned by a fixed assistant
pub fn conversation(id: &str) -> ConversationInfo {
    ConversationInfo::new(id, format!("Chat {id}"), "assistant-1")
}

/// First panel of the store's tree
pub fn first_panel(store: &WorkspaceStore) -> PanelId {
    store.state().root().panel_ids()[0]
}

/// Store whose root was split once; returns `(store, left, right)`
pub fn split_store(direction: SplitDirection) -> (WorkspaceStore, PanelId, PanelId) {
    let mut store = WorkspaceStore::default();
    let left = first_panel(&store);
    let right = store
        .split_panel(left, direction)
        .expect("split of the root panel");
    (store, left, right)
}

/// Conversation ids of a panel's tabs, in tab-bar order
pub fn tab_conversations(store: &WorkspaceStore, panel_id: PanelId) -> Vec<String> {
    store
        .state()
        .root()
        .find_panel(panel_id)
        .map(|p| p.tabs.iter().map(|t| t.conversation_id.clone()).collect())
        .unwrap_or_default()
}

/// File-backed persistence rooted in a fresh temp dir
///
/// The `TempDir` must outlive every load/save made through the returned value.
pub fn file_persistence() -> (WorkspacePersistence<FileStore>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let persistence = WorkspacePersistence::new(
        FileStore::new(temp_dir.path().join("state")),
        "workspace-store",
    );
    (persistence, temp_dir)
}

/// Assert the structural invariants every committed tree must satisfy
pub fn assert_tree_invariants(state: &WorkspaceState) {
    let root = state.root();
    assert!(root.count_panels() >= 1, "tree has no panel");
    assert_groups_well_formed(root);

    let mut conversations = std::collections::HashSet::new();
    let mut panel_ids = std::collections::HashSet::new();
    for panel in root.flatten_panels() {
        assert!(panel_ids.insert(panel.id), "panel {} visited twice", panel.id);
        assert!(panel.is_consistent(), "panel {} has a dangling active tab", panel.id);
        for tab in &panel.tabs {
            assert!(
                conversations.insert(tab.conversation_id.clone()),
                "conversation {} open twice",
                tab.conversation_id
            );
        }
    }
    assert_eq!(panel_ids.len(), root.count_panels());

    let active = state.active_panel_id.expect("active panel is set");
    assert!(root.find_panel(active).is_some(), "active panel is dangling");
}

fn assert_groups_well_formed(node: &LayoutNode) {
    if let LayoutNode::Group(group) = node {
        assert!(group.children.len() >= 2, "group {} has < 2 children", group.id);
        assert_eq!(group.sizes.len(), group.children.len(), "sizes mismatch");
        for child in &group.children {
            assert_groups_well_formed(child);
        }
    }
}
