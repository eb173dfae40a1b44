//! Default values that do not belong to a single focused subsystem.

pub fn workspace_name() -> String {
    "Default".to_string()
}

pub fn storage_key() -> String {
    "workspace-store".to_string()
}
