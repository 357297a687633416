use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Shell command typed into each role window after `cd`-ing into the
    /// role's working directory
    #[serde(default = "default_agent_command")]
    pub agent_command: String,

    /// Seconds between scheduler passes under `lattice watch`
    #[serde(default = "default_poll_interval_sec")]
    pub poll_interval_sec: u64,

    /// Display name of the audited project; defaults to the working
    /// directory's base name
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub tmux: TmuxConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct TmuxConfig {
    #[serde(default = "default_tmux_binary")]
    pub binary: PathBuf,

    /// Run tmux through `wsl` and translate Windows paths
    #[serde(default = "default_wsl")]
    pub wsl: bool,
}

impl Default for TmuxConfig {
    fn default() -> Self {
        Self {
            binary: default_tmux_binary(),
            wsl: default_wsl(),
        }
    }
}
