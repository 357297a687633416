use std::path::PathBuf;
use thiserror::Error;

use crate::scheduler::SchedulerResult;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Validation failures from the plan builder. Nothing is mutated when one
/// of these is returned.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlanError {
    #[error("at least one audit type is required")]
    NoAuditTypes,

    #[error("agent count must be between 1 and 3 (got {0})")]
    AgentCountOutOfRange(usize),

    #[error("intensity must be at least 1 (got {0})")]
    IntensityTooLow(u32),

    #[error("audit type {audit_type:?} has no role config for {agent_count} agents")]
    MissingRoleConfig {
        audit_type: String,
        agent_count: usize,
    },

    #[error("unknown audit type {0:?}")]
    UnknownAuditType(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read state file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse state file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write state file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Another lattice process holds '{path}'; only one launch, tick or watch may run at a time")]
    Locked { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum TmuxError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("tmux is not available: {0}")]
    Unavailable(String),

    #[error("failed to run tmux: {0}")]
    Io(#[from] std::io::Error),

    #[error("tmux {command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("parse list-windows output: {0}")]
    ParseWindows(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// One step of bringing a role up failed.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("generate role session: {0}")]
    Materialize(#[source] std::io::Error),

    #[error("create tmux window: {0}")]
    CreateWindow(#[source] TmuxError),

    #[error("translate role session path: {0}")]
    TranslatePath(#[source] TmuxError),

    #[error("launch agent: {0}")]
    SendKeys(#[source] TmuxError),
}

#[derive(Error, Debug)]
pub enum RoleStepError {
    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("read role status: {0}")]
    ReadStatus(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("{0} must not be empty")]
    EmptyInput(&'static str),

    /// A role could not be advanced. Roles advanced earlier in the same pass
    /// are in `partial` and already written to the in-memory state.
    #[error("{audit_type}/{code_name}: {source}")]
    Role {
        audit_type: String,
        code_name: String,
        partial: Box<SchedulerResult>,
        #[source]
        source: RoleStepError,
    },
}

impl SchedulerError {
    pub fn partial(&self) -> Option<&SchedulerResult> {
        match self {
            SchedulerError::Role { partial, .. } => Some(partial),
            SchedulerError::EmptyInput(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write summary: {0}")]
    WriteSummary(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
