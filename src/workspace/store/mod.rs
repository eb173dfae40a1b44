//! Workspace store for coordinating tab and panel operations
//!
//! The WorkspaceStore owns the layout tree and provides operations for:
//! - Opening, closing, activating and moving tabs
//! - Splitting, closing and resizing panels
//! - Tracking the active panel
//!
//! Every mutation builds a new [`WorkspaceState`] and swaps it in whole, so
//! a snapshot taken before a call keeps showing the pre-mutation tree.
//! Operations given unknown or stale IDs are silent no-ops.
//!
//! Sub-modules:
//! - [`tabs`]: tab lifecycle, activation and keyboard navigation.
//! - [`panels`]: split, close, resize and focus of panels.

mod panels;
mod tabs;

use super::WorkspaceState;
use crate::config::LayoutConfig;
use std::sync::Arc;

/// Callback invoked after every committed mutation
pub type ChangeListener = Box<dyn FnMut(&Arc<WorkspaceState>)>;

/// Single writer of the workspace tree
pub struct WorkspaceStore {
    /// Current state; replaced wholesale on every commit
    state: Arc<WorkspaceState>,
    /// Number of committed mutations since construction
    revision: u64,
    /// Sizes given to the two halves of a split
    split_sizes: [f32; 2],
    listeners: Vec<ChangeListener>,
}

impl WorkspaceStore {
    /// Create a store from an existing state
    pub fn new(state: WorkspaceState) -> Self {
        Self {
            state: Arc::new(state),
            revision: 0,
            split_sizes: chatdock_config::defaults::default_split_sizes(),
            listeners: Vec::new(),
        }
    }

    /// Create a store from an existing state using configured split sizes
    pub fn with_config(state: WorkspaceState, config: &LayoutConfig) -> Self {
        let mut store = Self::new(state);
        store.split_sizes = config.default_split_sizes;
        store
    }

    /// Shared handle to the current state
    pub fn snapshot(&self) -> Arc<WorkspaceState> {
        Arc::clone(&self.state)
    }

    /// Borrow the current state
    pub fn state(&self) -> &WorkspaceState {
        &self.state
    }

    /// Number of committed mutations
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a listener called after each committed mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&Arc<WorkspaceState>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replace the whole state (e.g. after a restore) and notify listeners
    pub fn replace_state(&mut self, state: WorkspaceState) {
        self.commit("replace_state", state);
    }

    /// Swap in a new state and notify listeners. Unchanged states are dropped.
    fn commit(&mut self, operation: &str, next: WorkspaceState) {
        if next == *self.state {
            crate::debug_trace!("STORE", "{} left the workspace unchanged", operation);
            return;
        }
        self.state = Arc::new(next);
        self.revision += 1;
        crate::debug_info!(
            "STORE",
            "{} committed revision {} ({} panels)",
            operation,
            self.revision,
            self.state.workspace.root.count_panels()
        );
        let state = Arc::clone(&self.state);
        for listener in &mut self.listeners {
            listener(&state);
        }
    }

    /// Clone of the current state for building the next one
    fn draft(&self) -> WorkspaceState {
        (*self.state).clone()
    }
}

impl Default for WorkspaceStore {
    fn default() -> Self {
        Self::new(WorkspaceState::default())
    }
}

#[cfg(test)]
mod tests;
