//! Workspace persistence.
//!
//! The workspace is stored as one JSON blob under a single key of a
//! [`KeyValueStore`]. Loading never fails on bad data: a missing blob yields
//! the default workspace, a corrupt one is logged and replaced by the
//! default, and a readable one is repaired before use.
//!
//! Sub-modules:
//! - [`kv`]: the key-value backend trait with file and in-memory backends.
//! - [`storage`]: [`WorkspacePersistence`], load/save/clear and save-on-change.

mod kv;
mod storage;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use storage::{LoadSource, LoadedWorkspace, WorkspacePersistence};

use crate::layout::{PanelId, RepairAction};
use crate::workspace::{Workspace, WorkspaceState};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised by persistence backends
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored blob is not a valid snapshot
    #[error("failed to parse workspace snapshot: {0}")]
    Parse(#[source] serde_json::Error),

    /// The workspace could not be encoded
    #[error("failed to serialize workspace snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The blob was written by a newer format
    #[error("unsupported snapshot version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The key cannot be mapped onto the backend
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Serialized form of the workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub workspace: Workspace,
    #[serde(default)]
    pub active_panel_id: Option<PanelId>,
}

impl WorkspaceSnapshot {
    /// Capture the current state
    pub fn from_state(state: &WorkspaceState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            workspace: state.workspace.clone(),
            active_panel_id: state.active_panel_id,
        }
    }

    /// Turn the snapshot into a repaired state
    pub fn into_state(self) -> (WorkspaceState, Vec<RepairAction>) {
        WorkspaceState::from_workspace(self.workspace, self.active_panel_id)
    }

    /// Encode as pretty JSON
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string_pretty(self).map_err(PersistenceError::Serialize)
    }

    /// Decode from JSON, rejecting newer format versions
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let snapshot: Self = serde_json::from_str(json).map_err(PersistenceError::Parse)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }
}
