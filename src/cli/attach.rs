use crate::cli::{load_config, working_dir};
use crate::state::{FileStateStore, StateStore};
use crate::tmux::TmuxManager;
use anyhow::Context;
use std::path::Path;

pub fn execute(config_path: &Path) -> anyhow::Result<()> {
    let cwd = working_dir()?;
    let config = load_config(config_path)?;

    let state = FileStateStore::new(&cwd).load()?;
    let session = state
        .session_name()
        .context("No run recorded here; start one with `lattice launch`")?;

    let tmux = TmuxManager::new(&config.tmux)?;
    tmux.attach_session(session)
        .with_context(|| format!("Attaching to {}", session))?;
    Ok(())
}
