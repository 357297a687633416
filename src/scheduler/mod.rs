//! Reconciler that moves roles through their pipelines.
//!
//! Each call to [`advance`] is one pass: every epic's roles are walked in
//! order and each is moved by at most one transition. The decision is made
//! from persisted state, the tmux window list and the roles' status files.
//! Nothing else is remembered between passes, so a pass that repeats with
//! no outside change does nothing.
//!
//! | status  | observation                              | becomes  |
//! |---------|------------------------------------------|----------|
//! | running | window present                           | running  |
//! | running | window gone, status file says complete   | complete |
//! | running | window gone, status file missing / other | failed   |
//! | pending | first role, or predecessor complete      | running  |
//! | pending | predecessor pending / running / failed   | pending  |

mod epic_status;

pub use epic_status::derive_epic_status;

use crate::error::{RoleStepError, SchedulerError};
use crate::launch::{role_session_dir, role_window_name, RoleLauncher, RoleSessionParams};
use crate::plan::{AuditPlan, EpicBead, RoleBead};
use crate::probe::{SignalProbe, STATUS_FILE_NAME};
use crate::state::{EpicState, RoleState, RoleStatus, State};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// External capabilities one pass relies on
pub struct SchedulerDeps<'a> {
    pub launcher: RoleLauncher<'a>,
    pub probe: &'a dyn SignalProbe,
}

/// A role started during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledRole {
    pub role_bead_id: String,
    pub epic_bead_id: String,
    pub audit_type: String,
    pub code_name: String,
    pub window_name: String,
    pub session_dir: PathBuf,
    pub launched_at: DateTime<Utc>,
}

/// Transitions made by one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerResult {
    pub launched: Vec<ScheduledRole>,
    /// Role bead ids
    pub completed: Vec<String>,
    /// Role bead ids
    pub failed: Vec<String>,
    /// Every role of a non-empty plan is complete or failed
    pub all_done: bool,
}

impl SchedulerResult {
    pub fn has_transitions(&self) -> bool {
        !(self.launched.is_empty() && self.completed.is_empty() && self.failed.is_empty())
    }
}

/// Run one scheduling pass over `plan`, mutating `state` in place.
///
/// Role records are written back as each role is visited, so when a launch
/// (or a status read) fails the roles handled before it keep their new
/// status in `state` and are listed in the error's partial result. The
/// caller saves `state` either way; the next pass picks up from there.
pub fn advance(
    cwd: &Path,
    state: &mut State,
    session_name: &str,
    plan: &AuditPlan,
    deps: &SchedulerDeps<'_>,
) -> Result<SchedulerResult, SchedulerError> {
    if cwd.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(SchedulerError::EmptyInput("working directory"));
    }
    let session_name = session_name.trim();
    if session_name.is_empty() {
        return Err(SchedulerError::EmptyInput("session name"));
    }

    let target = target_name(cwd, state);
    let mut result = SchedulerResult::default();

    for epic in &plan.epics {
        let audit_type = epic.audit_type_id.trim();
        if audit_type.is_empty() {
            warn!("Skipping epic {} with no audit type", epic.bead_id);
            continue;
        }

        state
            .epics
            .entry(audit_type.to_string())
            .or_insert_with(|| new_epic_state(epic));

        let roles = ordered_roles(epic, state);
        for (idx, role) in roles.iter().enumerate() {
            let mut role_state = ensure_role_state(state.roles.get(&role.bead_id).cloned(), epic, role);

            match role_state.status {
                RoleStatus::Running => {
                    let window = role_window_name(audit_type, &role.code_name);
                    if deps.probe.window_exists(session_name, &window) {
                        state.roles.insert(role.bead_id.clone(), role_state);
                        continue;
                    }

                    let status_path = status_file_path(cwd, audit_type, &role_state);
                    let team_status = match deps.probe.read_status(&status_path) {
                        Ok(status) => status,
                        Err(e) => {
                            state.roles.insert(role.bead_id.clone(), role_state);
                            return Err(abort(
                                result,
                                plan,
                                state,
                                epic,
                                audit_type,
                                &role.code_name,
                                RoleStepError::ReadStatus(e),
                            ));
                        }
                    };

                    role_state.tmux_window.clear();
                    if team_status.as_ref().is_some_and(|s| s.is_complete()) {
                        info!("{}/{} complete", audit_type, role.code_name);
                        role_state.status = RoleStatus::Complete;
                        result.completed.push(role.bead_id.clone());
                    } else {
                        // Crash and operator-closed window look the same from here.
                        warn!(
                            "{}/{} window closed without completing (status: {:?})",
                            audit_type,
                            role.code_name,
                            team_status.map(|s| s.status())
                        );
                        role_state.status = RoleStatus::Failed;
                        result.failed.push(role.bead_id.clone());
                    }
                    state.roles.insert(role.bead_id.clone(), role_state);
                }

                RoleStatus::Pending => {
                    let previous = if idx == 0 {
                        RoleStatus::Complete
                    } else {
                        state
                            .roles
                            .get(&roles[idx - 1].bead_id)
                            .map(|r| r.status)
                            .unwrap_or_default()
                    };

                    if previous != RoleStatus::Complete {
                        debug!(
                            "{}/{} waiting on predecessor ({})",
                            audit_type, role.code_name, previous
                        );
                        state.roles.insert(role.bead_id.clone(), role_state);
                        continue;
                    }

                    let params = session_params(cwd, epic, &role_state, &target);
                    match deps.launcher.launch(session_name, &params) {
                        Ok(launched) => {
                            let launched_at = Utc::now();
                            role_state.status = RoleStatus::Running;
                            role_state.tmux_window = launched.tmux_window;
                            role_state.session_dir = Some(launched.session_dir.clone());
                            role_state.launched_at = Some(launched_at);
                            state.roles.insert(role.bead_id.clone(), role_state);

                            result.launched.push(ScheduledRole {
                                role_bead_id: role.bead_id.clone(),
                                epic_bead_id: epic.bead_id.clone(),
                                audit_type: audit_type.to_string(),
                                code_name: role.code_name.clone(),
                                window_name: launched.window_name,
                                session_dir: launched.session_dir,
                                launched_at,
                            });
                        }
                        Err(e) => {
                            state.roles.insert(role.bead_id.clone(), role_state);
                            return Err(abort(
                                result,
                                plan,
                                state,
                                epic,
                                audit_type,
                                &role.code_name,
                                RoleStepError::Launch(e),
                            ));
                        }
                    }
                }

                RoleStatus::Complete | RoleStatus::Failed => {
                    state.roles.insert(role.bead_id.clone(), role_state);
                }
            }
        }

        refresh_epic(state, epic, audit_type);
    }

    result.all_done = all_roles_terminal(plan, state);
    Ok(result)
}

/// True when the plan has at least one role and none is pending or running
pub fn all_roles_terminal(plan: &AuditPlan, state: &State) -> bool {
    let mut has_roles = false;
    for role in plan.epics.iter().flat_map(|epic| &epic.roles) {
        has_roles = true;
        let status = state
            .roles
            .get(&role.bead_id)
            .map(|r| r.status)
            .unwrap_or_default();
        if !status.is_terminal() {
            return false;
        }
    }
    has_roles
}

/// Nothing is running, so no later pass can change anything. Pending roles
/// behind a failed predecessor stay pending for good.
pub fn is_settled(plan: &AuditPlan, state: &State) -> bool {
    !plan
        .epics
        .iter()
        .flat_map(|epic| &epic.roles)
        .any(|role| {
            state
                .roles
                .get(&role.bead_id)
                .is_some_and(|r| r.status == RoleStatus::Running)
        })
}

/// Re-derive the stored epic status from its roles
fn refresh_epic(state: &mut State, epic: &EpicBead, audit_type: &str) {
    let status = derive_epic_status(
        epic.roles
            .iter()
            .map(|r| state.roles.get(&r.bead_id).map(|s| s.status).unwrap_or_default()),
    );
    if let Some(epic_state) = state.epics.get_mut(audit_type) {
        epic_state.bead_id = epic.bead_id.clone();
        epic_state.audit_type = audit_type.to_string();
        epic_state.audit_name = epic.audit_name.clone();
        epic_state.status = status;
    }
}

fn abort(
    mut partial: SchedulerResult,
    plan: &AuditPlan,
    state: &mut State,
    epic: &EpicBead,
    audit_type: &str,
    code_name: &str,
    source: RoleStepError,
) -> SchedulerError {
    refresh_epic(state, epic, audit_type);
    partial.all_done = all_roles_terminal(plan, state);
    SchedulerError::Role {
        audit_type: audit_type.to_string(),
        code_name: code_name.to_string(),
        partial: Box::new(partial),
        source,
    }
}

/// Roles in pipeline order. A zero order in the plan falls back to the
/// persisted one; equal orders are broken by bead id.
fn ordered_roles<'p>(epic: &'p EpicBead, state: &State) -> Vec<&'p RoleBead> {
    let effective_order = |role: &RoleBead| {
        if role.order != 0 {
            role.order
        } else {
            state.roles.get(&role.bead_id).map(|r| r.order).unwrap_or(0)
        }
    };

    let mut roles: Vec<&RoleBead> = epic.roles.iter().collect();
    roles.sort_by(|a, b| {
        effective_order(a)
            .cmp(&effective_order(b))
            .then_with(|| a.bead_id.cmp(&b.bead_id))
    });
    roles
}

/// Plan identity wins; status, window and launch details are kept
fn ensure_role_state(existing: Option<RoleState>, epic: &EpicBead, role: &RoleBead) -> RoleState {
    let mut state = existing.unwrap_or_default();
    state.bead_id = role.bead_id.clone();
    state.epic_bead_id = epic.bead_id.clone();
    state.code_name = role.code_name.clone();
    state.title = role.title.clone();
    state.guidance = role.guidance.clone();
    state.bead_prefix = role.bead_prefix.clone();
    if state.order == 0 {
        state.order = role.order;
    }
    if state.intensity == 0 {
        state.intensity = epic.intensity;
    }
    state
}

fn new_epic_state(epic: &EpicBead) -> EpicState {
    EpicState {
        bead_id: epic.bead_id.clone(),
        audit_type: epic.audit_type_id.clone(),
        audit_name: epic.audit_name.clone(),
        bead_prefix: epic.bead_prefix.clone(),
        agent_count: epic.roles.len(),
        intensity: epic.intensity,
        focus_areas: epic.focus_areas.clone(),
        status: Default::default(),
    }
}

fn status_file_path(cwd: &Path, audit_type: &str, role: &RoleState) -> PathBuf {
    role.session_dir
        .clone()
        .unwrap_or_else(|| role_session_dir(cwd, audit_type, &role.code_name))
        .join(STATUS_FILE_NAME)
}

fn target_name(cwd: &Path, state: &State) -> String {
    state
        .session
        .as_ref()
        .map(|s| s.target.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| cwd.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_default()
}

fn session_params(cwd: &Path, epic: &EpicBead, role: &RoleState, target: &str) -> RoleSessionParams {
    RoleSessionParams {
        cwd: cwd.to_path_buf(),
        epic_bead_id: epic.bead_id.clone(),
        role_bead_id: role.bead_id.clone(),
        title: role.title.clone(),
        guidance: role.guidance.clone(),
        intensity: role.intensity,
        bead_prefix: role.bead_prefix.clone(),
        audit_type_id: epic.audit_type_id.trim().to_string(),
        code_name: role.code_name.clone(),
        target: target.to_string(),
        focus_areas: epic.focus_areas.clone(),
    }
}
