//! Externally observable signals about running roles.
//!
//! There is no completion callback: a role's window disappearing is the only
//! liveness signal, and the status file the agent leaves behind is the only
//! way to tell a clean finish from a crash.

mod status_file;

pub use status_file::{TeamStatus, STATUS_FILE_NAME};

use crate::tmux::Multiplexer;
use std::path::Path;
use tracing::warn;

pub trait SignalProbe {
    fn window_exists(&self, session: &str, window: &str) -> bool;

    /// Parsed status file, or `None` when there is no file
    fn read_status(&self, path: &Path) -> std::io::Result<Option<TeamStatus>>;
}

/// Reads window presence from tmux and status files from disk
pub struct LiveProbe<'a> {
    multiplexer: &'a dyn Multiplexer,
}

impl<'a> LiveProbe<'a> {
    pub fn new(multiplexer: &'a dyn Multiplexer) -> Self {
        Self { multiplexer }
    }
}

impl SignalProbe for LiveProbe<'_> {
    fn window_exists(&self, session: &str, window: &str) -> bool {
        match self.multiplexer.list_windows(session) {
            Ok(windows) => windows.iter().any(|w| w.name == window),
            Err(e) => {
                warn!("Failed to list windows for session {}: {}", session, e);
                false
            }
        }
    }

    fn read_status(&self, path: &Path) -> std::io::Result<Option<TeamStatus>> {
        read_status_file(path)
    }
}

pub fn read_status_file(path: &Path) -> std::io::Result<Option<TeamStatus>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(TeamStatus::parse(&content))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
