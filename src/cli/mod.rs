pub mod attach;
pub mod launch;
pub mod schema;
pub mod status;
pub mod tick;
pub mod types;
pub mod watch;

use crate::config::Config;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lattice")]
#[command(
    author,
    version,
    about = "Sequential audit-team orchestrator that runs agent roles in tmux windows"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file (optional; defaults apply when missing)
    #[arg(
        short,
        long,
        global = true,
        default_value = "lattice.yaml",
        env = "LATTICE_CONFIG"
    )]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan audits, open a tmux session and start the first role of each
    Launch(LaunchArgs),

    /// Run one scheduling pass over the saved state
    Tick,

    /// Keep ticking until every role has finished
    Watch(WatchArgs),

    /// Show epics, roles and loop progress
    Status(StatusArgs),

    /// List available audit types
    Types,

    /// Attach the terminal to the run's tmux session
    Attach,

    /// Print JSON Schema for the config (or state) file
    Schema(SchemaArgs),
}

#[derive(Parser, Clone)]
pub struct LaunchArgs {
    /// Audit types to run (comma-separated, see `lattice types`)
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub types: Vec<String>,

    /// Roles per audit type (1-3)
    #[arg(short, long, default_value_t = 1)]
    pub agents: usize,

    /// Loops each role should run
    #[arg(short, long, default_value_t = 1)]
    pub intensity: u32,

    /// Replace the catalog's focus areas (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub focus: Vec<String>,

    /// Override the target name handed to roles
    #[arg(long)]
    pub target: Option<String>,

    /// Show plan without creating anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Clone)]
pub struct WatchArgs {
    /// Seconds between passes (overrides poll_interval_sec)
    #[arg(long)]
    pub interval: Option<u64>,
}

#[derive(Parser, Clone)]
pub struct StatusArgs {
    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Clone)]
pub struct SchemaArgs {
    /// Print the schema of the persisted state file instead
    #[arg(long)]
    pub state: bool,
}

pub(crate) fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = Config::load_or_default(path)
        .with_context(|| format!("Loading config from {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub(crate) fn working_dir() -> anyhow::Result<PathBuf> {
    std::env::current_dir().context("Resolving working directory")
}
