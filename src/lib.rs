//! Multi-panel, multi-tab workspace layout engine for a chat client.
//!
//! The workspace is a tree: leaves are [`layout::Panel`]s holding tabs, inner
//! nodes are [`layout::PanelGroup`]s splitting their extent between children.
//! [`workspace::WorkspaceStore`] is the only writer; the drag coordinator,
//! renderer and persistence layer read snapshots and call store operations.
//!
// # Mutex Usage Policy
//
// All locks are `parking_lot` (debug log file, in-memory conversation and
// key-value maps). Nothing here is async, and no lock is held across a call
// back into the store.

/// Crate version, printed by the binary at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod config;
pub mod conversation;
pub mod drag;
pub mod layout;
pub mod persistence;
pub mod render;
pub mod workspace;

pub use conversation::{ConversationInfo, ConversationProvider, InMemoryConversations};
pub use drag::{DragCoordinator, DropZone, apply_drop};
pub use layout::{LayoutNode, Panel, PanelGroup, SplitDirection, Tab};
pub use persistence::{FileStore, MemoryStore, WorkspacePersistence};
pub use render::LayoutRenderer;
pub use workspace::{WorkspaceState, WorkspaceStore};
