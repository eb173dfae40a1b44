//! Unit tests for WorkspaceStore operations.

use super::WorkspaceStore;
use crate::conversation::{ConversationInfo, InMemoryConversations};
use crate::layout::{LayoutNode, PanelId, SplitDirection};
use crate::workspace::WorkspaceState;
use std::cell::Cell;
use std::rc::Rc;
use uuid::Uuid;

fn conv(id: &str) -> ConversationInfo {
    ConversationInfo::new(id, format!("Title {id}"), "assistant-1")
}

fn root_panel_id(store: &WorkspaceStore) -> PanelId {
    store.state().root().flatten_panels()[0].id
}

#[test]
fn test_open_tab_in_empty_root() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);

    let tab = store.open_tab(&conv("conv-1"), None);

    let state = store.state();
    let panel = state.root().as_panel().expect("root stays a single panel");
    assert_eq!(panel.id, p0);
    assert_eq!(panel.tabs.len(), 1);
    assert_eq!(panel.active_tab_id, Some(tab.id));
    assert_eq!(state.active_panel_id, Some(p0));
    assert_eq!(tab.title, "Title conv-1");
    assert_eq!(tab.owner_id, "assistant-1");
}

#[test]
fn test_open_same_conversation_reuses_tab() {
    let mut store = WorkspaceStore::default();
    let first = store.open_tab(&conv("conv-1"), None);
    let revision = store.revision();

    let again = store.open_tab(&conv("conv-1"), None);

    assert_eq!(again.id, first.id);
    assert_eq!(store.open_tabs().len(), 1);
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_open_existing_conversation_activates_its_panel() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let tab = store.open_tab(&conv("conv-1"), None);
    store.open_tab(&conv("conv-2"), None);
    let p1 = store.split_panel(p0, SplitDirection::Horizontal).unwrap();
    assert_eq!(store.state().active_panel_id, Some(p1));

    store.open_tab(&conv("conv-1"), Some(p1));

    let state = store.state();
    assert_eq!(state.active_panel_id, Some(p0));
    assert_eq!(state.active_tab().map(|t| t.id), Some(tab.id));
    assert!(state.root().find_panel(p1).unwrap().is_empty());
}

#[test]
fn test_open_tab_with_stale_panel_falls_back_to_active() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let p1 = store.split_panel(p0, SplitDirection::Vertical).unwrap();

    store.open_tab(&conv("conv-1"), Some(Uuid::new_v4()));

    assert_eq!(store.state().root().find_panel(p1).unwrap().tabs.len(), 1);
}

#[test]
fn test_open_conversation_through_provider() {
    let provider: InMemoryConversations = [conv("known")].into_iter().collect();
    let mut store = WorkspaceStore::default();

    assert!(store.open_conversation(&provider, "missing", None).is_none());
    let tab = store.open_conversation(&provider, "known", None).unwrap();
    assert_eq!(tab.conversation_id, "known");
    assert!(store.is_open("known"));
}

#[test]
fn test_split_panel_creates_group() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    store.open_tab(&conv("conv-1"), None);

    let p1 = store.split_panel(p0, SplitDirection::Horizontal).unwrap();

    let state = store.state();
    let LayoutNode::Group(group) = state.root() else {
        panic!("root should be a group after split");
    };
    assert_eq!(group.direction, SplitDirection::Horizontal);
    assert_eq!(group.sizes, vec![50.0, 50.0]);
    assert_eq!(group.children[0].id(), p0);
    assert_eq!(group.children[1].id(), p1);
    assert!(group.children[1].as_panel().unwrap().is_empty());
    assert_eq!(state.active_panel_id, Some(p1));
}

#[test]
fn test_split_unknown_panel_returns_none() {
    let mut store = WorkspaceStore::default();
    assert!(store
        .split_panel(Uuid::new_v4(), SplitDirection::Vertical)
        .is_none());
    assert_eq!(store.revision(), 0);
}

#[test]
fn test_move_tab_between_panels() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let tab = store.open_tab(&conv("conv-1"), None);
    let p1 = store.split_panel(p0, SplitDirection::Horizontal).unwrap();

    store.move_tab(tab.id, p0, p1, None);

    let root = store.state().root();
    let source = root.find_panel(p0).unwrap();
    let target = root.find_panel(p1).unwrap();
    assert!(source.tabs.is_empty());
    assert_eq!(source.active_tab_id, None);
    assert_eq!(target.tabs.len(), 1);
    assert_eq!(target.active_tab_id, Some(tab.id));
}

#[test]
fn test_close_panel_collapses_group() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let tab = store.open_tab(&conv("conv-1"), None);
    let p1 = store.split_panel(p0, SplitDirection::Horizontal).unwrap();
    store.move_tab(tab.id, p0, p1, None);
    let expected = store.state().root().find_panel(p1).unwrap().clone();

    store.close_panel(p0);

    let state = store.state();
    assert_eq!(state.root(), &LayoutNode::panel(expected));
    assert_eq!(state.root().count_panels(), 1);
    assert_eq!(state.active_panel_id, Some(p1));
}

#[test]
fn test_close_panel_refused_for_last_panel() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    store.open_tab(&conv("only"), None);
    let p1 = store.split_panel(p0, SplitDirection::Vertical).unwrap();
    store.open_tab(&conv("other"), Some(p1));
    assert!(store.can_close_panels());

    store.close_panel(p0);
    assert_eq!(store.panel_count(), 1);
    assert_eq!(store.state().active_panel_id, Some(p1));
    assert!(!store.can_close_panels());

    let revision = store.revision();
    store.close_panel(p1);
    assert_eq!(store.panel_count(), 1);
    assert_eq!(store.revision(), revision);
}

#[test]
fn test_close_tab_selects_last_and_is_idempotent() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let a = store.open_tab(&conv("a"), None);
    store.open_tab(&conv("b"), None);
    let c = store.open_tab(&conv("c"), None);
    store.set_active_tab(a.id, p0);

    store.close_tab(a.id, p0);
    assert_eq!(store.active_tab().map(|t| t.id), Some(c.id));

    let after_first = store.snapshot();
    store.close_tab(a.id, p0);
    assert_eq!(*store.snapshot(), *after_first);
}

#[test]
fn test_close_tab_keeps_empty_panel() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let tab = store.open_tab(&conv("a"), None);

    store.close_tab(tab.id, p0);

    let panel = store.state().root().find_panel(p0).unwrap();
    assert!(panel.is_empty());
    assert_eq!(panel.active_tab_id, None);
}

#[test]
fn test_reorder_within_panel() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let a = store.open_tab(&conv("a"), None);
    let b = store.open_tab(&conv("b"), None);
    let c = store.open_tab(&conv("c"), None);

    store.move_tab(c.id, p0, p0, Some(0));

    let ids: Vec<_> = store.open_tabs().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
    assert_eq!(store.active_tab().map(|t| t.id), Some(c.id));
}

#[test]
fn test_move_tab_with_wrong_source_is_noop() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let tab = store.open_tab(&conv("a"), None);
    let p1 = store.split_panel(p0, SplitDirection::Horizontal).unwrap();
    let revision = store.revision();

    store.move_tab(tab.id, p1, p0, None);
    store.move_tab(tab.id, p0, Uuid::new_v4(), None);

    assert_eq!(store.revision(), revision);
}

#[test]
fn test_update_panel_sizes_rejects_length_mismatch() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    store.split_panel(p0, SplitDirection::Horizontal);
    let group_id = store.state().root().id();

    store.update_panel_sizes(group_id, vec![30.0, 30.0, 40.0]);
    store.update_panel_sizes(group_id, vec![f32::NAN, 50.0]);
    let LayoutNode::Group(group) = store.state().root() else {
        panic!("expected group");
    };
    assert_eq!(group.sizes, vec![50.0, 50.0]);

    store.update_panel_sizes(group_id, vec![30.0, 70.0]);
    let LayoutNode::Group(group) = store.state().root() else {
        panic!("expected group");
    };
    assert_eq!(group.sizes, vec![30.0, 70.0]);
}

#[test]
fn test_snapshot_survives_mutation() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    store.open_tab(&conv("a"), None);
    let before = store.snapshot();

    store.split_panel(p0, SplitDirection::Vertical);

    assert_eq!(before.root().count_panels(), 1);
    assert_eq!(store.panel_count(), 2);
}

#[test]
fn test_listeners_fire_once_per_commit() {
    let mut store = WorkspaceStore::default();
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    store.subscribe(move |_| counter.set(counter.get() + 1));

    store.open_tab(&conv("a"), None);
    store.open_tab(&conv("a"), None);
    store.close_panel(root_panel_id(&store));

    assert_eq!(calls.get(), 1);
}

#[test]
fn test_switch_to_tab_index() {
    let mut store = WorkspaceStore::default();
    let a = store.open_tab(&conv("a"), None);
    let b = store.open_tab(&conv("b"), None);
    let c = store.open_tab(&conv("c"), None);

    store.switch_to_tab_index(1);
    assert_eq!(store.active_tab().map(|t| t.id), Some(a.id));
    store.switch_to_tab_index(2);
    assert_eq!(store.active_tab().map(|t| t.id), Some(b.id));
    store.switch_to_tab_index(9);
    assert_eq!(store.active_tab().map(|t| t.id), Some(c.id));

    store.switch_to_tab_index(5);
    store.switch_to_tab_index(0);
    assert_eq!(store.active_tab().map(|t| t.id), Some(c.id));
}

#[test]
fn test_next_and_prev_tab_wrap() {
    let mut store = WorkspaceStore::default();
    let a = store.open_tab(&conv("a"), None);
    store.open_tab(&conv("b"), None);

    store.next_tab();
    assert_eq!(store.current_conversation_id(), Some("a"));
    store.prev_tab();
    assert_eq!(store.current_conversation_id(), Some("b"));
    store.prev_tab();
    assert_eq!(store.active_tab().map(|t| t.id), Some(a.id));
}

#[test]
fn test_close_active_tab() {
    let mut store = WorkspaceStore::default();
    store.open_tab(&conv("a"), None);
    store.open_tab(&conv("b"), None);

    store.close_active_tab();
    assert_eq!(store.current_conversation_id(), Some("a"));
    store.close_active_tab();
    assert_eq!(store.current_conversation_id(), None);
    store.close_active_tab();
}

#[test]
fn test_sync_title_and_close_deleted_conversation() {
    let mut store = WorkspaceStore::default();
    store.open_tab(&conv("a"), None);
    store.open_tab(&conv("b"), None);

    store.sync_tab_title("a", "Renamed");
    assert_eq!(store.open_tabs()[0].title, "Renamed");

    store.close_conversation_tabs("a");
    assert!(!store.is_open("a"));
    assert_eq!(store.open_tabs().len(), 1);
}

#[test]
fn test_set_tab_pinned() {
    let mut store = WorkspaceStore::default();
    let tab = store.open_tab(&conv("a"), None);

    store.set_tab_pinned(tab.id, true);
    assert!(store.open_tabs()[0].is_pinned);
    store.set_tab_pinned(Uuid::new_v4(), true);
    store.set_tab_pinned(tab.id, false);
    assert!(!store.open_tabs()[0].is_pinned);
}

#[test]
fn test_set_active_panel_ignores_unknown() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let p1 = store.split_panel(p0, SplitDirection::Horizontal).unwrap();

    store.set_active_panel(p0);
    assert_eq!(store.active_panel().map(|p| p.id), Some(p0));
    store.set_active_panel(Uuid::new_v4());
    assert_eq!(store.active_panel().map(|p| p.id), Some(p0));
    assert_ne!(p0, p1);
}

#[test]
fn test_configured_split_sizes() {
    let config = crate::config::LayoutConfig {
        default_split_sizes: [60.0, 40.0],
        ..Default::default()
    };
    let mut store = WorkspaceStore::with_config(WorkspaceState::default(), &config);
    let p0 = root_panel_id(&store);
    store.split_panel(p0, SplitDirection::Vertical);

    let LayoutNode::Group(group) = store.state().root() else {
        panic!("expected group");
    };
    assert_eq!(group.sizes, vec![60.0, 40.0]);
}

#[test]
fn test_split_and_move_commits_once() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    store.open_tab(&conv("a"), None);
    let b = store.open_tab(&conv("b"), None);
    let notified = Rc::new(Cell::new(0));
    let counter = Rc::clone(&notified);
    store.subscribe(move |_| counter.set(counter.get() + 1));

    let new_id = store
        .split_and_move(p0, SplitDirection::Vertical, b.id, p0)
        .unwrap();

    assert_eq!(notified.get(), 1);
    let new_panel = store.state().root().find_panel(new_id).unwrap();
    assert_eq!(new_panel.tabs.len(), 1);
    assert_eq!(new_panel.active_tab_id, Some(b.id));
    let original = store.state().root().find_panel(p0).unwrap();
    assert_eq!(original.tabs.len(), 1);
    assert_eq!(original.active_tab_id, Some(original.tabs[0].id));
    assert_eq!(store.state().active_panel_id, Some(new_id));
}

#[test]
fn test_split_and_move_rejects_unknown_ids() {
    let mut store = WorkspaceStore::default();
    let p0 = root_panel_id(&store);
    let a = store.open_tab(&conv("a"), None);
    let revision = store.revision();

    assert_eq!(
        store.split_and_move(Uuid::new_v4(), SplitDirection::Horizontal, a.id, p0),
        None
    );
    assert_eq!(
        store.split_and_move(p0, SplitDirection::Horizontal, Uuid::new_v4(), p0),
        None
    );
    assert_eq!(store.revision(), revision);
    assert_eq!(store.panel_count(), 1);
}
