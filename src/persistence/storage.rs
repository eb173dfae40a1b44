//! Loading and saving the workspace blob.

use super::kv::KeyValueStore;
use super::{PersistenceError, WorkspaceSnapshot};
use crate::config::LayoutConfig;
use crate::layout::RepairAction;
use crate::workspace::{WorkspaceState, WorkspaceStore};
use std::sync::Arc;

/// Where a loaded workspace came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing was stored yet
    Default,
    /// The stored blob was read successfully
    Restored,
    /// The stored blob was unreadable and has been replaced by the default
    Recovered { reason: String },
    /// The stored blob was written by a newer format version. The default
    /// is used in memory; the blob itself must not be overwritten.
    NewerVersion { found: u32, supported: u32 },
}

/// Result of [`WorkspacePersistence::load`]
#[derive(Debug, Clone)]
pub struct LoadedWorkspace {
    pub state: WorkspaceState,
    pub source: LoadSource,
    /// Repairs applied to a restored tree
    pub repairs: Vec<RepairAction>,
}

impl LoadedWorkspace {
    /// Whether saving this state may replace what is stored
    pub fn is_writable(&self) -> bool {
        !matches!(self.source, LoadSource::NewerVersion { .. })
    }
}

/// Reads and writes the workspace under one key of a backend
pub struct WorkspacePersistence<S: KeyValueStore> {
    backend: S,
    key: String,
    default_name: String,
}

impl<S: KeyValueStore> WorkspacePersistence<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            default_name: chatdock_config::defaults::workspace_name(),
        }
    }

    /// Build from config: storage key and default workspace name
    pub fn from_config(backend: S, config: &LayoutConfig) -> Self {
        Self::new(backend, config.storage_key.clone()).with_default_name(&config.workspace_name)
    }

    /// Name given to a freshly created workspace
    pub fn with_default_name(mut self, name: &str) -> Self {
        self.default_name = name.to_string();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Load the workspace
    ///
    /// Only backend I/O failures are errors. Missing, empty, corrupt or
    /// newer-format blobs all produce a usable state.
    pub fn load(&self) -> Result<LoadedWorkspace, PersistenceError> {
        let Some(contents) = self.backend.load(&self.key)? else {
            log::info!("No stored workspace under {:?}, using default", self.key);
            return Ok(self.default_workspace(LoadSource::Default));
        };
        if contents.trim().is_empty() {
            return Ok(self.default_workspace(LoadSource::Default));
        }

        match WorkspaceSnapshot::from_json(&contents) {
            Ok(snapshot) => {
                let (state, repairs) = snapshot.into_state();
                if !repairs.is_empty() {
                    log::warn!(
                        "Repaired stored workspace {:?} ({} fix(es))",
                        self.key,
                        repairs.len()
                    );
                    for repair in &repairs {
                        crate::debug_info!("PERSIST", "repair: {:?}", repair);
                    }
                }
                log::info!(
                    "Loaded workspace {:?} ({} panels) from {:?}",
                    state.workspace.name,
                    state.root().count_panels(),
                    self.key
                );
                Ok(LoadedWorkspace {
                    state,
                    source: LoadSource::Restored,
                    repairs,
                })
            }
            Err(PersistenceError::UnsupportedVersion { found, supported }) => {
                log::warn!(
                    "Stored workspace {:?} has format version {found} (supported: {supported}); \
                     using default and leaving it untouched",
                    self.key
                );
                Ok(self.default_workspace(LoadSource::NewerVersion { found, supported }))
            }
            Err(e) => {
                log::warn!("Stored workspace {:?} is unreadable: {e}; using default", self.key);
                Ok(self.default_workspace(LoadSource::Recovered {
                    reason: e.to_string(),
                }))
            }
        }
    }

    /// Save the workspace
    pub fn save(&self, state: &WorkspaceState) -> Result<(), PersistenceError> {
        let json = WorkspaceSnapshot::from_state(state).to_json()?;
        self.backend.store(&self.key, &json)?;
        crate::debug_info!(
            "PERSIST",
            "Saved workspace ({} panels, {} bytes) under {:?}",
            state.root().count_panels(),
            json.len(),
            self.key
        );
        Ok(())
    }

    /// Delete the stored workspace
    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.backend.remove(&self.key)?;
        log::info!("Cleared stored workspace {:?}", self.key);
        Ok(())
    }

    fn default_workspace(&self, source: LoadSource) -> LoadedWorkspace {
        LoadedWorkspace {
            state: WorkspaceState::new(self.default_name.clone()),
            source,
            repairs: Vec::new(),
        }
    }
}

impl<S: KeyValueStore + 'static> WorkspacePersistence<S> {
    /// Save after every committed store mutation
    ///
    /// Save failures are logged; the in-memory workspace stays authoritative.
    /// Do not attach to a workspace whose load was not
    /// [`writable`](LoadedWorkspace::is_writable).
    pub fn attach(self: Arc<Self>, store: &mut WorkspaceStore) {
        store.subscribe(move |state| {
            if let Err(e) = self.save(state) {
                log::error!("Failed to persist workspace: {e}");
            }
        });
    }
}
