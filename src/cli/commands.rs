//! Command implementations for the chatdock binary.
//!
//! Each command writes its report to the given writer so it can be tested
//! without capturing stdout.

use super::tree::format_tree;
use super::{Commands, RuntimeOptions};
use crate::config::LayoutConfig;
use crate::persistence::{
    FileStore, KeyValueStore, LoadSource, WorkspacePersistence, WorkspaceSnapshot,
};
use crate::workspace::WorkspaceState;
use anyhow::{Context, Result};
use std::io::Write;

/// Run a command against the workspace stored under `options`
pub fn run(options: &RuntimeOptions, out: &mut impl Write) -> Result<()> {
    let config = options.load_config()?;
    if options.log_level.is_none() && std::env::var_os("RUST_LOG").is_none() {
        crate::debug::set_log_level(config.log_level.to_level_filter());
    }
    let state_dir = options.state_dir();
    log::info!("Using workspace state directory {:?}", state_dir);

    let persistence = WorkspacePersistence::from_config(FileStore::new(state_dir), &config);
    execute(&options.command, &persistence, &config, out)
}

/// Run a command against an already constructed persistence layer
pub fn execute<S: KeyValueStore>(
    command: &Commands,
    persistence: &WorkspacePersistence<S>,
    config: &LayoutConfig,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Show { json } => show(persistence, *json, out),
        Commands::Repair { dry_run } => repair(persistence, *dry_run, out),
        Commands::Reset => reset(persistence, config, out),
        Commands::Paths => Ok(()),
    }
}

fn show<S: KeyValueStore>(
    persistence: &WorkspacePersistence<S>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let loaded = persistence.load().context("Failed to load workspace")?;
    match &loaded.source {
        LoadSource::Default => writeln!(out, "(no stored workspace, showing default)")?,
        LoadSource::Recovered { reason } => {
            writeln!(out, "(stored workspace unreadable: {reason})")?
        }
        LoadSource::NewerVersion { found, supported } => writeln!(
            out,
            "(stored workspace has format version {found}, this build reads up to {supported}; showing default)"
        )?,
        LoadSource::Restored if !loaded.repairs.is_empty() => writeln!(
            out,
            "(stored workspace needs {} repair(s); run `chatdock repair`)",
            loaded.repairs.len()
        )?,
        LoadSource::Restored => {}
    }

    if json {
        let snapshot = WorkspaceSnapshot::from_state(&loaded.state).to_json()?;
        writeln!(out, "{snapshot}")?;
    } else {
        write!(out, "{}", format_tree(&loaded.state))?;
    }
    Ok(())
}

fn repair<S: KeyValueStore>(
    persistence: &WorkspacePersistence<S>,
    dry_run: bool,
    out: &mut impl Write,
) -> Result<()> {
    let loaded = persistence.load().context("Failed to load workspace")?;
    let needs_save = match &loaded.source {
        LoadSource::Default => {
            writeln!(out, "No stored workspace; nothing to repair")?;
            false
        }
        LoadSource::Recovered { reason } => {
            writeln!(out, "Stored workspace is unreadable ({reason})")?;
            writeln!(out, "It will be replaced by the default workspace")?;
            true
        }
        LoadSource::NewerVersion { found, supported } => {
            writeln!(
                out,
                "Stored workspace has format version {found}; this build reads up to {supported}"
            )?;
            writeln!(out, "Leaving it untouched")?;
            false
        }
        LoadSource::Restored if loaded.repairs.is_empty() => {
            writeln!(out, "Workspace is consistent; nothing to repair")?;
            false
        }
        LoadSource::Restored => {
            writeln!(out, "Applied {} fix(es):", loaded.repairs.len())?;
            for action in &loaded.repairs {
                let line = serde_json::to_string(action)?;
                writeln!(out, "  {line}")?;
            }
            true
        }
    };

    if !needs_save {
        return Ok(());
    }
    if dry_run {
        writeln!(out, "Dry run: nothing written")?;
        return Ok(());
    }
    persistence
        .save(&loaded.state)
        .context("Failed to save repaired workspace")?;
    writeln!(out, "Saved repaired workspace")?;
    Ok(())
}

fn reset<S: KeyValueStore>(
    persistence: &WorkspacePersistence<S>,
    config: &LayoutConfig,
    out: &mut impl Write,
) -> Result<()> {
    let state = WorkspaceState::new(config.workspace_name.clone());
    persistence
        .save(&state)
        .context("Failed to write default workspace")?;
    log::info!("Workspace reset under {:?}", persistence.key());
    writeln!(out, "Reset workspace {:?}", state.workspace.name)?;
    Ok(())
}
