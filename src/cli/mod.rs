//! Command-line interface for chatdock.
//!
//! The binary inspects and maintains the persisted workspace. Command
//! implementations live in the [`commands`] submodule; the ASCII rendering
//! of a layout tree lives in [`tree`].

pub mod commands;
pub mod tree;

use crate::config::LayoutConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chatdock - inspect and maintain the multi-panel chat workspace
#[derive(Parser)]
#[command(name = "chatdock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the persisted workspace (default: ~/.config/chatdock/state)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Configuration file to use instead of ~/.config/chatdock/config.yaml
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the stored workspace as a tree (default)
    Show {
        /// Print the raw snapshot JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Load the stored workspace, repair it, and write it back
    Repair {
        /// Report the fixes without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Replace the stored workspace with a single empty panel
    Reset,

    /// Print the config file and state directory locations
    Paths,
}

/// Runtime options passed from CLI to the command runner
#[derive(Clone, Debug)]
pub struct RuntimeOptions {
    /// Command to run
    pub command: Commands,
    /// Workspace state directory override
    pub data_dir: Option<PathBuf>,
    /// Config file override
    pub config_path: Option<PathBuf>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
}

impl RuntimeOptions {
    /// Load the layout config named by `--config`, or the default one
    pub fn load_config(&self) -> Result<LayoutConfig> {
        match &self.config_path {
            Some(path) => LayoutConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {:?}", path)),
            None => LayoutConfig::load().context("Failed to load config"),
        }
    }

    /// Directory the workspace blob is stored in
    pub fn state_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(LayoutConfig::state_dir)
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Run the command once logging is up
    Continue(RuntimeOptions),
    /// Exit with the given code (handled without touching state)
    Exit(i32),
}

/// Process CLI arguments and handle the commands that need no state
pub fn process_cli() -> CliResult {
    resolve(Cli::parse())
}

fn resolve(cli: Cli) -> CliResult {
    let options = RuntimeOptions {
        command: cli.command.unwrap_or(Commands::Show { json: false }),
        data_dir: cli.data_dir,
        config_path: cli.config,
        log_level: cli.log_level.map(|l| l.to_level_filter()),
    };

    if options.command == Commands::Paths {
        println!(
            "config: {}",
            options
                .config_path
                .clone()
                .unwrap_or_else(LayoutConfig::config_path)
                .display()
        );
        println!("state:  {}", options.state_dir().display());
        println!("log:    {}", crate::debug::log_path().display());
        return CliResult::Exit(0);
    }

    CliResult::Continue(options)
}
