use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_agent_command() -> String {
    "opencode run auditor".to_string()
}

pub fn default_poll_interval_sec() -> u64 {
    3
}

pub fn default_tmux_binary() -> PathBuf {
    PathBuf::from("tmux")
}

pub fn default_wsl() -> bool {
    // tmux only exists inside WSL on Windows hosts
    cfg!(windows)
}
