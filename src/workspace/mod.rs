//! Workspace model and the store that owns it.
//!
//! A [`Workspace`] is the whole persisted layout: one root tree plus the
//! active-panel pointer kept in [`WorkspaceState`]. The [`WorkspaceStore`]
//! is the only writer.

mod store;

pub use store::{ChangeListener, WorkspaceStore};

use crate::layout::{
    LayoutNode, Panel, PanelId, RepairAction, Tab, WorkspaceId, repair_tree,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single layout of a running instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub root: LayoutNode,
}

impl Workspace {
    /// Create a workspace holding one empty panel
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            root: LayoutNode::default(),
        }
    }
}

/// Everything the store owns: the workspace and the focused panel
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceState {
    pub workspace: Workspace,
    pub active_panel_id: Option<PanelId>,
}

impl WorkspaceState {
    /// Default state: one empty panel, which is active
    pub fn new(name: impl Into<String>) -> Self {
        let workspace = Workspace::new(name);
        let active_panel_id = workspace.root.flatten_panels().first().map(|p| p.id);
        Self {
            workspace,
            active_panel_id,
        }
    }

    /// Wrap an existing workspace, repairing it first
    pub fn from_workspace(
        workspace: Workspace,
        active_panel_id: Option<PanelId>,
    ) -> (Self, Vec<RepairAction>) {
        Self {
            workspace,
            active_panel_id,
        }
        .repaired()
    }

    pub fn root(&self) -> &LayoutNode {
        &self.workspace.root
    }

    /// The active panel, if the pointer is valid
    pub fn active_panel(&self) -> Option<&Panel> {
        self.active_panel_id
            .and_then(|id| self.workspace.root.find_panel(id))
    }

    /// The active panel's active tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_panel().and_then(|p| p.active_tab())
    }

    /// Repair the tree and the active-panel pointer
    ///
    /// A dangling or missing active panel falls back to the first panel.
    pub fn repaired(self) -> (Self, Vec<RepairAction>) {
        let outcome = repair_tree(self.workspace.root);
        let mut actions = outcome.actions;
        let root = outcome.root;

        let mut active_panel_id = self.active_panel_id;
        let valid = active_panel_id.is_some_and(|id| root.find_panel(id).is_some());
        if !valid {
            let fallback = root.flatten_panels().first().map(|p| p.id);
            actions.push(RepairAction::FixActivePanel {
                before: active_panel_id,
                after: fallback,
            });
            active_panel_id = fallback;
        }

        (
            Self {
                workspace: Workspace {
                    root,
                    ..self.workspace
                },
                active_panel_id,
            },
            actions,
        )
    }
}

impl Default for WorkspaceState {
    fn default() -> Self {
        Self::new(chatdock_config::defaults::workspace_name())
    }
}
