use crate::cli::tick::{print_result, run_pass};
use crate::cli::{load_config, working_dir, WatchArgs};
use crate::config::Config;
use crate::output::{build_snapshot, write_summary};
use crate::plan::AuditPlan;
use crate::scheduler::is_settled;
use crate::state::{state_dir, FileStateStore, State, StateLock, StateStore};
use crate::tmux::{Multiplexer, TmuxManager};
use anyhow::bail;
use std::path::Path;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

pub async fn execute(args: WatchArgs, config_path: &Path) -> anyhow::Result<()> {
    let cwd = working_dir()?;
    let config = load_config(config_path)?;

    // Held for the whole watch; a concurrent tick or launch is refused.
    let _lock = StateLock::acquire(&cwd)?;
    let store = FileStateStore::new(&cwd);
    if store.load()?.session.is_none() {
        bail!(
            "No run recorded in {}; start one with `lattice launch`",
            store.path().display()
        );
    }

    let tmux = TmuxManager::new(&config.tmux)?;
    let secs = args.interval.unwrap_or(config.poll_interval_sec).max(1);
    info!("Watching every {}s", secs);

    watch_until_settled(&cwd, &config, &store, &tmux, Duration::from_secs(secs)).await
}

/// Tick every `period` until all roles are done or nothing is left running,
/// then write the summary. Failed passes are retried on the next tick.
pub(crate) async fn watch_until_settled(
    cwd: &Path,
    config: &Config,
    store: &FileStateStore,
    multiplexer: &dyn Multiplexer,
    period: Duration,
) -> anyhow::Result<()> {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                println!("Interrupted; state is saved in {}", store.path().display());
                return Ok(());
            }
        }

        // Every pass starts from what is on disk.
        let mut state = match store.load() {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to load state, retrying next tick: {}", e);
                continue;
            }
        };

        let outcome = run_pass(cwd, config, &mut state, multiplexer);
        if let Err(e) = store.save(&state) {
            warn!("Failed to save state, retrying next tick: {}", e);
        }

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!("Pass failed, retrying next tick: {}", e);
                continue;
            }
        };

        if result.has_transitions() {
            print_result(&result, &state);
        }

        let plan = AuditPlan::from_state(&state);
        if result.all_done || is_settled(&plan, &state) {
            if !result.all_done {
                println!("Nothing left running; remaining roles are blocked by failures.");
            }
            return finish(cwd, &state);
        }
    }
}

fn finish(cwd: &Path, state: &State) -> anyhow::Result<()> {
    let dir = state_dir(cwd);
    let snapshot = build_snapshot(cwd, state);
    write_summary(&dir, &snapshot)?;
    println!("Summary written to {}", dir.join("summary.md").display());
    Ok(())
}
