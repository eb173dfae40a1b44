//! Panel layout tree.
//!
//! The workspace is a recursive tree of panel groups. Every leaf is a
//! [`Panel`] showing chat conversations as tabs, and every internal node is
//! a [`PanelGroup`] splitting its extent between two or more children by
//! percentage.
//!
//! All tree helpers are side-effect free: lookups return `None` for unknown
//! IDs and updates hand back an unchanged copy.

mod repair;
pub mod types;

pub use repair::{RepairAction, RepairOutcome, repair_tree};
pub use types::{
    Bounds, ConversationId, GroupId, LayoutNode, Panel, PanelGroup, PanelId, Point, RemoveResult,
    SplitDirection, Tab, TabId, WorkspaceId,
};
