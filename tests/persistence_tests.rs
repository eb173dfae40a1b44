//! File-backed persistence tests.
//!
//! The workspace is written as one JSON blob; loading must always produce a
//! usable workspace, repairing or replacing whatever is on disk.

mod common;

use chatdock::config::LayoutConfig;
use chatdock::layout::{LayoutNode, Panel, PanelGroup, SplitDirection, Tab};
use chatdock::persistence::{
    FileStore, KeyValueStore, LoadSource, SNAPSHOT_VERSION, WorkspacePersistence,
    WorkspaceSnapshot,
};
use chatdock::workspace::{Workspace, WorkspaceStore};
use common::{assert_tree_invariants, conversation, file_persistence, first_panel};
use std::sync::Arc;

fn blob_path(temp: &tempfile::TempDir) -> std::path::PathBuf {
    temp.path().join("state").join("workspace-store.json")
}

#[test]
fn test_first_run_uses_default_workspace() {
    let (persistence, temp) = file_persistence();
    let loaded = persistence.load().unwrap();

    assert_eq!(loaded.source, LoadSource::Default);
    assert_eq!(loaded.state.root().count_panels(), 1);
    assert!(!blob_path(&temp).exists());
}

#[test]
fn test_roundtrip_of_built_layout() {
    let (persistence, temp) = file_persistence();
    let mut store = WorkspaceStore::default();
    let p0 = first_panel(&store);
    store.open_tab(&conversation("a"), None);
    let p1 = store.split_panel(p0, SplitDirection::Horizontal).unwrap();
    store.open_tab(&conversation("b"), None);
    let p2 = store.split_panel(p1, SplitDirection::Vertical).unwrap();
    let group = store.state().root().id();
    store.update_panel_sizes(group, vec![35.0, 65.0]);
    store.set_active_panel(p2);
    let tab_b = store.state().root().find_conversation("b").unwrap().1.id;
    store.set_tab_pinned(tab_b, true);

    persistence.save(store.state()).unwrap();
    assert!(blob_path(&temp).exists());

    let loaded = persistence.load().unwrap();
    assert_eq!(loaded.source, LoadSource::Restored);
    assert!(loaded.repairs.is_empty());
    assert_eq!(&loaded.state, store.state());
}

#[test]
fn test_save_on_change_then_restart() {
    let (persistence, _temp) = file_persistence();
    let persistence = Arc::new(persistence);

    let expected = {
        let mut store = WorkspaceStore::new(persistence.load().unwrap().state);
        Arc::clone(&persistence).attach(&mut store);
        let p0 = first_panel(&store);
        store.open_tab(&conversation("a"), None);
        store.split_panel(p0, SplitDirection::Vertical);
        store.open_tab(&conversation("b"), None);
        store.snapshot()
    };

    let restored = persistence.load().unwrap();
    assert_eq!(restored.source, LoadSource::Restored);
    assert_eq!(restored.state, *expected);
    assert_eq!(
        restored.state.active_tab().map(|t| t.conversation_id.as_str()),
        Some("b")
    );
}

#[test]
fn test_truncated_blob_recovers_to_default() {
    let (persistence, temp) = file_persistence();
    persistence.save(WorkspaceStore::default().state()).unwrap();
    let json = std::fs::read_to_string(blob_path(&temp)).unwrap();
    std::fs::write(blob_path(&temp), &json[..json.len() / 2]).unwrap();

    let loaded = persistence.load().unwrap();
    assert!(matches!(loaded.source, LoadSource::Recovered { .. }));
    assert_tree_invariants(&loaded.state);
}

#[test]
fn test_newer_snapshot_version_loads_default_read_only() {
    let (persistence, _temp) = file_persistence();
    let mut snapshot = WorkspaceSnapshot::from_state(WorkspaceStore::default().state());
    snapshot.version = SNAPSHOT_VERSION + 1;
    persistence
        .backend()
        .store("workspace-store", &snapshot.to_json().unwrap())
        .unwrap();

    let loaded = persistence.load().unwrap();
    assert!(matches!(loaded.source, LoadSource::NewerVersion { .. }));
    assert!(!loaded.is_writable());
    assert_tree_invariants(&loaded.state);
}

#[test]
fn test_malformed_tree_is_repaired_on_load() {
    let (persistence, _temp) = file_persistence();

    let mut left = Panel::new();
    let a = Tab::new("a", "Chat a", "assistant-1");
    left.push_tab(a.clone());
    let mut right = Panel::new();
    // Same conversation twice, and an active tab that is not in the panel
    right.push_tab(Tab::new("a", "Chat a again", "assistant-1"));
    right.push_tab(Tab::new("b", "Chat b", "assistant-1"));
    right.active_tab_id = Some(uuid::Uuid::new_v4());

    let lonely = PanelGroup::new(
        SplitDirection::Vertical,
        vec![LayoutNode::panel(right)],
        vec![100.0],
    );
    let mut workspace = Workspace::new("Hand edited");
    workspace.root = LayoutNode::Group(PanelGroup::new(
        SplitDirection::Horizontal,
        vec![LayoutNode::panel(left), LayoutNode::Group(lonely)],
        vec![10.0, 10.0],
    ));
    let snapshot = WorkspaceSnapshot {
        version: SNAPSHOT_VERSION,
        workspace,
        active_panel_id: None,
    };
    persistence
        .backend()
        .store("workspace-store", &snapshot.to_json().unwrap())
        .unwrap();

    let loaded = persistence.load().unwrap();
    assert_eq!(loaded.source, LoadSource::Restored);
    assert!(!loaded.repairs.is_empty());
    assert_tree_invariants(&loaded.state);

    let LayoutNode::Group(root) = loaded.state.root() else {
        panic!("expected group root");
    };
    assert_eq!(root.sizes, vec![50.0, 50.0]);
    assert!(root.children.iter().all(|c| !c.is_group()));
    // The first tab for a conversation (pre-order) wins
    let (panel, tab) = loaded.state.root().find_conversation("a").unwrap();
    assert_eq!(tab.id, a.id);
    assert_eq!(panel.tabs.len(), 1);

    // Repaired state saves clean and reloads without further fixes
    persistence.save(&loaded.state).unwrap();
    assert!(persistence.load().unwrap().repairs.is_empty());
}

#[test]
fn test_config_controls_key_and_default_name() {
    let temp = tempfile::tempdir().unwrap();
    let config = LayoutConfig {
        storage_key: "team-layout".to_string(),
        workspace_name: "Team".to_string(),
        ..LayoutConfig::default()
    };
    let persistence = WorkspacePersistence::from_config(FileStore::new(temp.path()), &config);

    let loaded = persistence.load().unwrap();
    assert_eq!(loaded.state.workspace.name, "Team");

    persistence.save(&loaded.state).unwrap();
    assert!(temp.path().join("team-layout.json").exists());
}
