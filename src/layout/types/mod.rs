//! Core types for the panel layout tree.
//!
//! This module defines the fundamental data structures for split panels:
//! - N-ary tree of panel groups with percentage sizes
//! - Leaf panels holding ordered chat tabs
//! - Pixel-space bounds used by drop-zone and layout geometry
//!
//! Sub-modules:
//! - [`bounds`]: `Bounds` / `Point` pixel-space geometry
//! - [`common`]: ID aliases and `SplitDirection`
//! - [`tab`]: `Tab`, one conversation placed in the UI
//! - [`panel`]: `Panel`, ordered tabs plus the active-tab pointer
//! - [`node`]: `LayoutNode` / `PanelGroup` recursive tree

mod bounds;
mod common;
mod node;
mod panel;
mod tab;


pub use bounds::{Bounds, Point};
pub use common::{ConversationId, GroupId, PanelId, SplitDirection, TabId, WorkspaceId};
pub use node::{LayoutNode, PanelGroup, RemoveResult};
pub use panel::Panel;
pub use tab::Tab;
