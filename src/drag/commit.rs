//! Applying a released drag to the workspace store.

use super::coordinator::DropCommit;
use super::zone::DropZone;
use crate::layout::PanelId;
use crate::workspace::WorkspaceStore;

/// What a drop did to the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The tab went into an existing panel's tab bar
    Moved { panel_id: PanelId },
    /// The target panel was split and the tab moved into the new panel
    Split { new_panel_id: PanelId },
    /// The tab or target no longer exists; nothing changed
    Ignored,
}

/// Apply a drop to the store in one synchronous step
///
/// IDs are re-resolved against the current tree first: the tab is moved
/// from wherever it lives now, which may differ from the panel recorded
/// when the drag started.
pub fn apply_drop(store: &mut WorkspaceStore, commit: &DropCommit) -> DropOutcome {
    let root = store.state().root();
    let Some(current_panel) = root.find_tab(commit.tab_id).map(|(panel, _)| panel.id) else {
        crate::debug_info!("DROP", "Dragged tab {} no longer exists", commit.tab_id);
        return DropOutcome::Ignored;
    };
    if root.find_panel(commit.target_panel_id).is_none() {
        crate::debug_info!(
            "DROP",
            "Target panel {} no longer exists",
            commit.target_panel_id
        );
        return DropOutcome::Ignored;
    }
    if current_panel != commit.source_panel_id {
        log::debug!(
            "Tab {} moved from panel {} to {} during the drag",
            commit.tab_id,
            commit.source_panel_id,
            current_panel
        );
    }

    match commit.drop_zone.split_direction() {
        None => {
            store.move_tab(
                commit.tab_id,
                current_panel,
                commit.target_panel_id,
                commit.target_index,
            );
            DropOutcome::Moved {
                panel_id: commit.target_panel_id,
            }
        }
        Some(direction) => {
            // Left/top drops land in the new (second) panel as well
            let Some(new_panel_id) = store.split_and_move(
                commit.target_panel_id,
                direction,
                commit.tab_id,
                current_panel,
            ) else {
                return DropOutcome::Ignored;
            };
            crate::debug_info!(
                "DROP",
                "Split {} on {:?}, tab {} now in panel {}",
                commit.target_panel_id,
                commit.drop_zone,
                commit.tab_id,
                new_panel_id
            );
            DropOutcome::Split { new_panel_id }
        }
    }
}

impl DropCommit {
    /// True when the drop only reorders or appends within a tab bar
    pub fn is_tab_bar_drop(&self) -> bool {
        self.drop_zone == DropZone::Center
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ConversationInfo;
    use crate::layout::{LayoutNode, SplitDirection};
    use uuid::Uuid;

    fn store_with_tabs(convs: &[&str]) -> (WorkspaceStore, PanelId) {
        let mut store = WorkspaceStore::default();
        let panel_id = store.state().root().panel_ids()[0];
        for conv in convs {
            store.open_tab(&ConversationInfo::new(*conv, *conv, "a"), None);
        }
        (store, panel_id)
    }

    #[test]
    fn test_center_drop_with_index_reorders() {
        let (mut store, p0) = store_with_tabs(&["a", "b", "c"]);
        let c = store.open_tabs()[2].id;

        let outcome = apply_drop(
            &mut store,
            &DropCommit {
                tab_id: c,
                source_panel_id: p0,
                target_panel_id: p0,
                drop_zone: DropZone::Center,
                target_index: Some(0),
            },
        );

        assert_eq!(outcome, DropOutcome::Moved { panel_id: p0 });
        assert_eq!(store.open_tabs()[0].id, c);
    }

    #[test]
    fn test_edge_drop_splits_and_moves_into_new_panel() {
        for (zone, direction) in [
            (DropZone::Left, SplitDirection::Horizontal),
            (DropZone::Right, SplitDirection::Horizontal),
            (DropZone::Top, SplitDirection::Vertical),
            (DropZone::Bottom, SplitDirection::Vertical),
        ] {
            let (mut store, p0) = store_with_tabs(&["a", "b"]);
            let a = store.open_tabs()[0].id;

            let outcome = apply_drop(
                &mut store,
                &DropCommit {
                    tab_id: a,
                    source_panel_id: p0,
                    target_panel_id: p0,
                    drop_zone: zone,
                    target_index: None,
                },
            );

            let DropOutcome::Split { new_panel_id } = outcome else {
                panic!("expected split for {zone:?}");
            };
            let LayoutNode::Group(group) = store.state().root() else {
                panic!("expected group root");
            };
            assert_eq!(group.direction, direction);
            assert_eq!(group.children[1].id(), new_panel_id);
            let new_panel = store.state().root().find_panel(new_panel_id).unwrap();
            assert_eq!(new_panel.active_tab_id, Some(a));
            assert_eq!(store.state().active_panel_id, Some(new_panel_id));
        }
    }

    #[test]
    fn test_edge_drop_publishes_one_finished_layout() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let (mut store, p0) = store_with_tabs(&["a", "b"]);
        let b = store.open_tabs()[1].id;
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| {
            let panels = state.root().flatten_panels();
            let empty = panels.iter().filter(|p| p.is_empty()).count();
            sink.borrow_mut().push((panels.len(), empty));
        });
        let revision = store.revision();

        let outcome = apply_drop(
            &mut store,
            &DropCommit {
                tab_id: b,
                source_panel_id: p0,
                target_panel_id: p0,
                drop_zone: DropZone::Right,
                target_index: None,
            },
        );

        assert!(matches!(outcome, DropOutcome::Split { .. }));
        assert_eq!(store.revision(), revision + 1);
        assert_eq!(*seen.borrow(), vec![(2, 0)]);
    }

    #[test]
    fn test_stale_tab_or_target_is_ignored() {
        let (mut store, p0) = store_with_tabs(&["a"]);
        let a = store.open_tabs()[0].id;
        let revision = store.revision();

        let stale_tab = DropCommit {
            tab_id: Uuid::new_v4(),
            source_panel_id: p0,
            target_panel_id: p0,
            drop_zone: DropZone::Right,
            target_index: None,
        };
        assert_eq!(apply_drop(&mut store, &stale_tab), DropOutcome::Ignored);

        let stale_target = DropCommit {
            tab_id: a,
            target_panel_id: Uuid::new_v4(),
            ..stale_tab
        };
        assert_eq!(apply_drop(&mut store, &stale_target), DropOutcome::Ignored);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_drop_follows_tab_that_moved_during_drag() {
        let (mut store, p0) = store_with_tabs(&["a"]);
        let a = store.open_tabs()[0].id;
        let p1 = store.split_panel(p0, SplitDirection::Horizontal).unwrap();
        store.move_tab(a, p0, p1, None);

        let outcome = apply_drop(
            &mut store,
            &DropCommit {
                tab_id: a,
                source_panel_id: p0,
                target_panel_id: p0,
                drop_zone: DropZone::Center,
                target_index: None,
            },
        );

        assert_eq!(outcome, DropOutcome::Moved { panel_id: p0 });
        assert_eq!(store.state().root().find_panel(p0).unwrap().tabs.len(), 1);
        assert!(store.state().root().find_panel(p1).unwrap().is_empty());
    }
}
