use crate::cli::{load_config, working_dir};
use crate::config::Config;
use crate::error::SchedulerError;
use crate::launch::{LaunchSettings, RoleLauncher, TeamDirMaterializer};
use crate::plan::AuditPlan;
use crate::probe::LiveProbe;
use crate::scheduler::{advance, SchedulerDeps, SchedulerResult};
use crate::state::{FileStateStore, State, StateLock, StateStore};
use crate::tmux::{Multiplexer, TmuxManager};
use anyhow::{bail, Context};
use std::path::Path;
use tracing::{error, info};

pub fn execute(config_path: &Path) -> anyhow::Result<()> {
    let cwd = working_dir()?;
    let config = load_config(config_path)?;

    let _lock = StateLock::acquire(&cwd)?;
    let store = FileStateStore::new(&cwd);
    let mut state = store.load()?;
    if state.session.is_none() {
        bail!(
            "No run recorded in {}; start one with `lattice launch`",
            store.path().display()
        );
    }

    let tmux = TmuxManager::new(&config.tmux)?;
    let outcome = run_pass(&cwd, &config, &mut state, &tmux);

    // Saved even when the pass aborted: earlier transitions are real.
    save_after_pass(&store, &state, outcome.is_err())?;

    let result = outcome.inspect_err(|e| {
        if let Some(partial) = e.partial() {
            print_result(partial, &state);
        }
    })?;
    print_result(&result, &state);
    Ok(())
}

/// One scheduler pass over `state` with the live tmux and filesystem
pub(crate) fn run_pass(
    cwd: &Path,
    config: &Config,
    state: &mut State,
    multiplexer: &dyn Multiplexer,
) -> Result<SchedulerResult, SchedulerError> {
    let session = state.session_name().unwrap_or_default().to_string();
    let plan = AuditPlan::from_state(state);

    let probe = LiveProbe::new(multiplexer);
    let deps = SchedulerDeps {
        launcher: RoleLauncher::new(
            multiplexer,
            &TeamDirMaterializer,
            LaunchSettings {
                agent_command: config.agent_command.clone(),
                translate_wsl: config.tmux.wsl,
            },
        ),
        probe: &probe,
    };

    let result = advance(cwd, state, &session, &plan, &deps)?;
    info!(
        "Pass done: {} launched, {} complete, {} failed",
        result.launched.len(),
        result.completed.len(),
        result.failed.len()
    );
    Ok(result)
}

/// When the pass itself failed, that error is the one worth reporting, so a
/// save failure is only logged.
pub(crate) fn save_after_pass(
    store: &dyn StateStore,
    state: &State,
    pass_failed: bool,
) -> anyhow::Result<()> {
    match store.save(state) {
        Ok(()) => Ok(()),
        Err(e) if pass_failed => {
            error!("Failed to save state: {}", e);
            Ok(())
        }
        Err(e) => Err(e).context("Saving state"),
    }
}

pub(crate) fn print_result(result: &SchedulerResult, state: &State) {
    let describe = |bead_id: &str| {
        state
            .roles
            .get(bead_id)
            .map(|role| format!("{} {} ({})", bead_id, role.code_name, role.title))
            .unwrap_or_else(|| bead_id.to_string())
    };

    for bead_id in &result.completed {
        println!("complete  {}", describe(bead_id));
    }
    for bead_id in &result.failed {
        println!("failed    {}", describe(bead_id));
    }
    for role in &result.launched {
        println!(
            "launched  {} {} -> {}",
            role.role_bead_id, role.code_name, role.window_name
        );
    }

    if result.all_done {
        println!("All roles finished.");
    } else if !result.has_transitions() {
        println!("No changes.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::path::PathBuf;

    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn load(&self) -> Result<State, StoreError> {
            Ok(State::default())
        }

        fn save(&self, _: &State) -> Result<(), StoreError> {
            Err(StoreError::Write {
                path: PathBuf::from("/read-only/.lattice/state.json"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        }
    }

    #[test]
    fn test_save_failure_surfaces_after_clean_pass() {
        let err = save_after_pass(&BrokenStore, &State::default(), false).unwrap_err();
        assert!(format!("{:#}", err).contains("Saving state"));
    }

    #[test]
    fn test_save_failure_yields_to_pass_error() {
        assert!(save_after_pass(&BrokenStore, &State::default(), true).is_ok());
    }
}
