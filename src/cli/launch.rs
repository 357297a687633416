use crate::beads::commit_counter;
use crate::catalog::{find_audit_type, AuditType};
use crate::cli::tick::{print_result, run_pass, save_after_pass};
use crate::cli::{load_config, working_dir, LaunchArgs};
use crate::error::PlanError;
use crate::plan::{build_audit_plan, seed_state, AuditPlan};
use crate::state::{FileStateStore, Session, StateLock, StateStore};
use crate::tmux::{Multiplexer, TmuxManager};
use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use tracing::info;

pub fn execute(args: LaunchArgs, config_path: &Path) -> anyhow::Result<()> {
    let cwd = working_dir()?;
    let mut config = load_config(config_path)?;
    if let Some(target) = args.target.clone() {
        config.target = Some(target);
    }

    let audit_types = resolve_audit_types(&args.types)?;

    // Dry runs must not create anything, the lock file included.
    let _lock = if args.dry_run {
        None
    } else {
        Some(StateLock::acquire(&cwd)?)
    };
    let store = FileStateStore::new(&cwd);
    let mut state = store.load()?;

    let plan = build_audit_plan(&audit_types, args.agents, args.intensity, state.bead_counter)?
        .with_focus_areas(&args.focus);

    if args.dry_run {
        info!("DRY RUN - nothing will be created");
        print_plan(&plan, &config.target_name(&cwd));
        return Ok(());
    }

    let tmux = TmuxManager::new(&config.tmux)?;

    // The counter is durable before any bead id is used.
    commit_counter(&mut state, &store, plan.final_counter).context("Reserving bead ids")?;

    let session = Session::new(Utc::now(), &cwd, config.target_name(&cwd));
    tmux.create_session(&session.name)
        .with_context(|| format!("Creating tmux session {}", session.name))?;
    info!("Created tmux session {}", session.name);

    let session_name = session.name.clone();
    state.begin_run(session);
    seed_state(&mut state, &plan);
    store.save(&state).context("Saving seeded state")?;

    let outcome = run_pass(&cwd, &config, &mut state, &tmux);
    save_after_pass(&store, &state, outcome.is_err())?;
    let result = outcome.inspect_err(|e| {
        if let Some(partial) = e.partial() {
            print_result(partial, &state);
        }
    })?;

    println!(
        "Session {} started: {} audits, {} roles",
        session_name,
        plan.epics.len(),
        plan.role_count()
    );
    print_result(&result, &state);
    println!("Attach with `lattice attach`; advance with `lattice watch`.");
    Ok(())
}

/// Catalog entries for the requested ids, in the order given, duplicates
/// dropped
fn resolve_audit_types(ids: &[String]) -> Result<Vec<AuditType>, PlanError> {
    let mut audit_types: Vec<AuditType> = Vec::new();

    for id in ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        let audit_type =
            find_audit_type(id).ok_or_else(|| PlanError::UnknownAuditType(id.to_string()))?;
        if !audit_types.iter().any(|t| t.id == audit_type.id) {
            audit_types.push(*audit_type);
        }
    }

    Ok(audit_types)
}

fn print_plan(plan: &AuditPlan, target: &str) {
    println!("\n=== Audit Plan ===\n");
    println!("Target: {}", target);
    println!("Bead ids: up to {}", crate::beads::format_bead_id(plan.final_counter));

    for epic in &plan.epics {
        println!(
            "\n{} {} ({}) - {} agents, intensity {}",
            epic.bead_id, epic.audit_name, epic.audit_type_id, epic.agent_count, epic.intensity
        );
        if !epic.focus_areas.is_empty() {
            println!("  focus: {}", epic.focus_areas.join(", "));
        }
        for role in &epic.roles {
            println!(
                "  {}. {} {} - {} [{}]",
                role.order, role.bead_id, role.code_name, role.title, role.bead_prefix
            );
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_keeps_order_and_drops_duplicates() {
        let ids = vec![
            "security".to_string(),
            " perf ".to_string(),
            "security".to_string(),
            String::new(),
        ];

        let resolved = resolve_audit_types(&ids).unwrap();

        let resolved: Vec<_> = resolved.iter().map(|t| t.id).collect();
        assert_eq!(resolved, ["security", "perf"]);
    }

    #[test]
    fn test_resolve_rejects_unknown_type() {
        let ids = vec!["perf".to_string(), "vibes".to_string()];

        assert_eq!(
            resolve_audit_types(&ids).unwrap_err(),
            PlanError::UnknownAuditType("vibes".to_string())
        );
    }
}
