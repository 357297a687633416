//! Bringing a single role up: working directory, tmux window, agent command.

mod materialize;

pub use materialize::{role_session_dir, RoleMaterializer, RoleSessionParams, TeamDirMaterializer};

use crate::error::LaunchError;
use crate::tmux::{translate_to_wsl_path, Multiplexer};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LaunchSettings {
    /// Typed into the window after `cd`-ing into the role directory
    pub agent_command: String,
    /// Translate the role directory to a WSL path before sending it
    pub translate_wsl: bool,
}

/// Where a launched role lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedRole {
    pub window_name: String,
    /// `session:window`
    pub tmux_window: String,
    pub session_dir: PathBuf,
}

/// Window name for a role. The scheduler finds windows by this name only.
pub fn role_window_name(audit_type_id: &str, code_name: &str) -> String {
    format!("audit-{}-{}", audit_type_id.trim(), code_name.trim())
}

/// Single-quote for POSIX shells
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r#"'"'"'"#))
}

pub struct RoleLauncher<'a> {
    multiplexer: &'a dyn Multiplexer,
    materializer: &'a dyn RoleMaterializer,
    settings: LaunchSettings,
}

impl<'a> RoleLauncher<'a> {
    pub fn new(
        multiplexer: &'a dyn Multiplexer,
        materializer: &'a dyn RoleMaterializer,
        settings: LaunchSettings,
    ) -> Self {
        Self {
            multiplexer,
            materializer,
            settings,
        }
    }

    /// Materialize the role directory, open its window and start the agent.
    /// Stops at the first failing step. A window already carrying the role's
    /// name is reused, so a retried launch never leaves two of them.
    pub fn launch(
        &self,
        session: &str,
        params: &RoleSessionParams,
    ) -> Result<LaunchedRole, LaunchError> {
        let session_dir = self
            .materializer
            .materialize(params)
            .map_err(LaunchError::Materialize)?;

        let window_name = role_window_name(&params.audit_type_id, &params.code_name);
        let existing = self
            .multiplexer
            .list_windows(session)
            .map_err(LaunchError::CreateWindow)?;
        if existing.iter().any(|w| w.name == window_name) {
            // Left over from an earlier launch that failed after creating it
            debug!("Reusing window {}:{}", session, window_name);
        } else {
            self.multiplexer
                .create_window(session, &window_name)
                .map_err(LaunchError::CreateWindow)?;
        }

        let dir = if self.settings.translate_wsl {
            translate_to_wsl_path(&session_dir).map_err(LaunchError::TranslatePath)?
        } else {
            session_dir.display().to_string()
        };

        let command = format!("cd {} && {}", shell_quote(&dir), self.settings.agent_command);
        self.multiplexer
            .send_keys(session, &window_name, &command)
            .map_err(LaunchError::SendKeys)?;

        info!(
            "Launched {}/{} in {}:{}",
            params.audit_type_id, params.code_name, session, window_name
        );

        Ok(LaunchedRole {
            tmux_window: format!("{}:{}", session, window_name),
            window_name,
            session_dir,
        })
    }
}
