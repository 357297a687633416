//! Audit plans: ordered epics, each an ordered pipeline of role beads.
//!
//! A plan is built once at launch from the catalog and the user's choices,
//! and rebuilt from persisted state on every later scheduler pass.

mod builder;
mod slug;

pub use builder::build_audit_plan;

use crate::beads::bead_number;
use crate::state::{EpicState, EpicStatus, RoleState, RoleStatus, State};

/// One role bead generated for an epic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBead {
    pub bead_id: String,
    pub code_name: String,
    pub title: String,
    pub guidance: String,
    pub bead_prefix: String,
    /// 1-based catalog position; a role waits for the one before it
    pub order: u32,
}

/// One audit type's engagement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpicBead {
    pub bead_id: String,
    pub audit_type_id: String,
    pub audit_name: String,
    /// The audit type's own prefix (role prefixes extend it)
    pub bead_prefix: String,
    pub focus_areas: Vec<String>,
    pub agent_count: usize,
    pub intensity: u32,
    pub roles: Vec<RoleBead>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditPlan {
    pub epics: Vec<EpicBead>,
    /// Counter value after the last allocation; the caller persists it
    pub final_counter: u64,
}

impl AuditPlan {
    pub fn role_count(&self) -> usize {
        self.epics.iter().map(|epic| epic.roles.len()).sum()
    }

    /// Replace every epic's focus areas. An empty list keeps the catalog's.
    pub fn with_focus_areas(mut self, focus_areas: &[String]) -> Self {
        let focus_areas: Vec<String> = focus_areas
            .iter()
            .map(|area| area.trim().to_string())
            .filter(|area| !area.is_empty())
            .collect();

        if !focus_areas.is_empty() {
            for epic in &mut self.epics {
                epic.focus_areas = focus_areas.clone();
            }
        }
        self
    }

    /// Rebuild the plan from persisted epics and roles. Epics come out in
    /// allocation order; roles in pipeline order.
    pub fn from_state(state: &State) -> Self {
        let mut epics: Vec<&EpicState> = state.epics.values().collect();
        epics.sort_by(|a, b| {
            bead_number(&a.bead_id)
                .cmp(&bead_number(&b.bead_id))
                .then_with(|| a.bead_id.cmp(&b.bead_id))
        });

        let epics = epics
            .into_iter()
            .map(|epic| {
                let roles = state
                    .roles_for_epic(&epic.bead_id)
                    .into_iter()
                    .map(|role| RoleBead {
                        bead_id: role.bead_id.clone(),
                        code_name: role.code_name.clone(),
                        title: role.title.clone(),
                        guidance: role.guidance.clone(),
                        bead_prefix: role.bead_prefix.clone(),
                        order: role.order,
                    })
                    .collect();

                EpicBead {
                    bead_id: epic.bead_id.clone(),
                    audit_type_id: epic.audit_type.clone(),
                    audit_name: epic.audit_name.clone(),
                    bead_prefix: epic.bead_prefix.clone(),
                    focus_areas: epic.focus_areas.clone(),
                    agent_count: epic.agent_count,
                    intensity: epic.intensity,
                    roles,
                }
            })
            .collect();

        Self {
            epics,
            final_counter: state.bead_counter,
        }
    }
}

/// Record a freshly built plan in state: every epic running, every role
/// pending with no window. The scheduler's first pass launches the head of
/// each pipeline.
pub fn seed_state(state: &mut State, plan: &AuditPlan) {
    for epic in &plan.epics {
        state.epics.insert(
            epic.audit_type_id.clone(),
            EpicState {
                bead_id: epic.bead_id.clone(),
                audit_type: epic.audit_type_id.clone(),
                audit_name: epic.audit_name.clone(),
                bead_prefix: epic.bead_prefix.clone(),
                agent_count: epic.agent_count,
                intensity: epic.intensity,
                focus_areas: epic.focus_areas.clone(),
                status: EpicStatus::Running,
            },
        );

        for role in &epic.roles {
            state.roles.insert(
                role.bead_id.clone(),
                RoleState {
                    bead_id: role.bead_id.clone(),
                    epic_bead_id: epic.bead_id.clone(),
                    code_name: role.code_name.clone(),
                    title: role.title.clone(),
                    guidance: role.guidance.clone(),
                    bead_prefix: role.bead_prefix.clone(),
                    order: role.order,
                    status: RoleStatus::Pending,
                    tmux_window: String::new(),
                    intensity: epic.intensity,
                    session_dir: None,
                    launched_at: None,
                },
            );
        }
    }
}
