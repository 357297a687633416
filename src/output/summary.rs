use crate::error::OutputError;
use crate::launch::role_session_dir;
use crate::plan::AuditPlan;
use crate::probe::{read_status_file, TeamStatus, STATUS_FILE_NAME};
use crate::scheduler::all_roles_terminal;
use crate::state::{EpicStatus, RoleState, RoleStatus, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
    pub bead_counter: u64,
    pub epics: Vec<EpicSnapshot>,
    /// Role counts keyed by status
    pub totals: BTreeMap<String, usize>,
    pub all_done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpicSnapshot {
    pub bead_id: String,
    pub audit_type: String,
    pub audit_name: String,
    pub status: EpicStatus,
    pub roles: Vec<RoleSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSnapshot {
    pub bead_id: String,
    pub code_name: String,
    pub title: String,
    pub status: RoleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmux_window: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_loop: Option<u32>,
    pub intensity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launched_at: Option<DateTime<Utc>>,
}

/// Point-in-time view of a run. Loop progress comes from each role's
/// status file; roles that never launched have none.
pub fn build_snapshot(cwd: &Path, state: &State) -> StatusSnapshot {
    let plan = AuditPlan::from_state(state);
    let mut totals: BTreeMap<String, usize> = ["pending", "running", "complete", "failed"]
        .into_iter()
        .map(|status| (status.to_string(), 0))
        .collect();

    let epics = plan
        .epics
        .iter()
        .map(|epic| {
            let status = state
                .epics
                .get(&epic.audit_type_id)
                .map(|e| e.status)
                .unwrap_or_default();

            let roles = epic
                .roles
                .iter()
                .filter_map(|role| state.roles.get(&role.bead_id))
                .map(|role| {
                    *totals.entry(role.status.to_string()).or_insert(0) += 1;
                    role_snapshot(cwd, &epic.audit_type_id, role)
                })
                .collect();

            EpicSnapshot {
                bead_id: epic.bead_id.clone(),
                audit_type: epic.audit_type_id.clone(),
                audit_name: epic.audit_name.clone(),
                status,
                roles,
            }
        })
        .collect();

    let session = state.session.as_ref();
    StatusSnapshot {
        generated_at: Utc::now().to_rfc3339(),
        session: session.map(|s| s.name.clone()),
        target: session.map(|s| s.target.clone()).unwrap_or_default(),
        working_dir: session.map(|s| s.working_dir.clone()),
        bead_counter: state.bead_counter,
        epics,
        totals,
        all_done: all_roles_terminal(&plan, state),
    }
}

fn role_snapshot(cwd: &Path, audit_type: &str, role: &RoleState) -> RoleSnapshot {
    let team_status = if role.status == RoleStatus::Pending {
        None
    } else {
        let path = role
            .session_dir
            .clone()
            .unwrap_or_else(|| role_session_dir(cwd, audit_type, &role.code_name))
            .join(STATUS_FILE_NAME);
        match read_status_file(&path) {
            Ok(status) => status,
            Err(e) => {
                debug!("Unreadable status file {}: {}", path.display(), e);
                None
            }
        }
    };

    let intensity = match role.intensity {
        0 => team_status
            .as_ref()
            .and_then(TeamStatus::intensity)
            .unwrap_or(0),
        n => n,
    };

    RoleSnapshot {
        bead_id: role.bead_id.clone(),
        code_name: role.code_name.clone(),
        title: role.title.clone(),
        status: role.status,
        tmux_window: Some(role.tmux_window.clone()).filter(|w| !w.is_empty()),
        current_loop: team_status.as_ref().and_then(TeamStatus::current_loop),
        intensity,
        launched_at: role.launched_at,
    }
}

fn status_icon(status: RoleStatus) -> &'static str {
    match status {
        RoleStatus::Pending => "⏳",
        RoleStatus::Running => "🔄",
        RoleStatus::Complete => "✅",
        RoleStatus::Failed => "❌",
    }
}

fn loop_progress(role: &RoleSnapshot) -> String {
    match role.current_loop {
        Some(current) => format!("{}/{}", current, role.intensity),
        None => format!("-/{}", role.intensity),
    }
}

/// Plain-text table for the terminal
pub fn render_text(snapshot: &StatusSnapshot) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Session: {}",
        snapshot.session.as_deref().unwrap_or("(none)")
    );
    if !snapshot.target.is_empty() {
        let _ = writeln!(out, "Target:  {}", snapshot.target);
    }

    if snapshot.epics.is_empty() {
        out.push_str("\nNo audits launched.\n");
        return out;
    }

    for epic in &snapshot.epics {
        let _ = writeln!(
            out,
            "\n{} ({}) [{}] {}",
            epic.audit_name, epic.audit_type, epic.status, epic.bead_id
        );
        for role in &epic.roles {
            let _ = writeln!(
                out,
                "  {:<8} {:<9} loop {:<6} {}",
                role.code_name,
                role.status.to_string(),
                loop_progress(role),
                role.tmux_window.as_deref().unwrap_or("")
            );
        }
    }

    let _ = writeln!(
        out,
        "\n{} pending, {} running, {} complete, {} failed{}",
        snapshot.totals.get("pending").unwrap_or(&0),
        snapshot.totals.get("running").unwrap_or(&0),
        snapshot.totals.get("complete").unwrap_or(&0),
        snapshot.totals.get("failed").unwrap_or(&0),
        if snapshot.all_done { " (done)" } else { "" }
    );

    out
}

/// Write `summary.json` and `summary.md` into `state_dir`
pub fn write_summary(state_dir: &Path, snapshot: &StatusSnapshot) -> Result<(), OutputError> {
    fs::create_dir_all(state_dir).map_err(OutputError::CreateDir)?;

    let json_path = state_dir.join("summary.json");
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(&json_path, json).map_err(OutputError::WriteSummary)?;

    let md_path = state_dir.join("summary.md");
    fs::write(&md_path, build_summary_markdown(snapshot)).map_err(OutputError::WriteSummary)?;

    Ok(())
}

fn build_summary_markdown(snapshot: &StatusSnapshot) -> String {
    let mut md = String::new();

    md.push_str("# lattice Summary\n\n");
    md.push_str(&format!("**Generated:** {}\n", snapshot.generated_at));
    if let Some(session) = &snapshot.session {
        md.push_str(&format!("**Session:** {}\n", session));
    }
    md.push_str(&format!("**Target:** {}\n\n", snapshot.target));

    md.push_str("## Totals\n\n");
    md.push_str("| Status | Roles |\n");
    md.push_str("|--------|-------|\n");
    for (status, count) in &snapshot.totals {
        md.push_str(&format!("| {} | {} |\n", status, count));
    }

    for epic in &snapshot.epics {
        md.push_str(&format!(
            "\n## {} ({})\n\n**Epic:** {} **Status:** {}\n\n",
            epic.audit_name, epic.audit_type, epic.bead_id, epic.status
        ));
        md.push_str("| Role | Title | Status | Loops |\n");
        md.push_str("|------|-------|--------|-------|\n");
        for role in &epic.roles {
            md.push_str(&format!(
                "| {} | {} | {} {} | {} |\n",
                role.code_name,
                role.title,
                status_icon(role.status),
                role.status,
                loop_progress(role)
            ));
        }
    }

    let failed = *snapshot.totals.get("failed").unwrap_or(&0);
    if failed > 0 {
        md.push_str("\n## Failed Roles\n\n");
        md.push_str("A role fails when its window closes without `status=complete`. ");
        md.push_str("Later roles in the same audit were not started.\n");
    }

    md
}
