use super::slug::role_bead_prefix;
use super::{AuditPlan, EpicBead, RoleBead};
use crate::beads::allocate;
use crate::catalog::AuditType;
use crate::error::PlanError;
use tracing::debug;

/// Expand the chosen audit types into epics and role beads.
///
/// Ids are drawn from `start_counter` upwards: one for each epic, then one
/// per role in catalog order. Nothing is persisted here; the caller stores
/// `final_counter` before launching anything.
pub fn build_audit_plan(
    audit_types: &[AuditType],
    agent_count: usize,
    intensity: u32,
    start_counter: u64,
) -> Result<AuditPlan, PlanError> {
    if audit_types.is_empty() {
        return Err(PlanError::NoAuditTypes);
    }
    if !(1..=3).contains(&agent_count) {
        return Err(PlanError::AgentCountOutOfRange(agent_count));
    }
    if intensity < 1 {
        return Err(PlanError::IntensityTooLow(intensity));
    }

    let mut counter = start_counter;
    let mut epics = Vec::with_capacity(audit_types.len());

    for audit_type in audit_types {
        let role_config =
            audit_type
                .role_config(agent_count)
                .ok_or_else(|| PlanError::MissingRoleConfig {
                    audit_type: audit_type.id.to_string(),
                    agent_count,
                })?;

        let (next, epic_bead_id) = allocate(counter);
        counter = next;

        let mut roles = Vec::with_capacity(role_config.roles.len());
        for (idx, template) in role_config.roles.iter().enumerate() {
            let (next, role_bead_id) = allocate(counter);
            counter = next;

            roles.push(RoleBead {
                bead_id: role_bead_id,
                code_name: template.code_name.to_string(),
                title: template.title.to_string(),
                guidance: template.guidance.to_string(),
                bead_prefix: role_bead_prefix(audit_type.bead_prefix, template.title),
                order: idx as u32 + 1,
            });
        }

        debug!(
            "Planned epic {} ({}) with {} roles",
            epic_bead_id,
            audit_type.id,
            roles.len()
        );

        epics.push(EpicBead {
            bead_id: epic_bead_id,
            audit_type_id: audit_type.id.to_string(),
            audit_name: audit_type.name.to_string(),
            bead_prefix: audit_type.bead_prefix.to_string(),
            focus_areas: audit_type.focus_areas.iter().map(|s| s.to_string()).collect(),
            agent_count,
            intensity,
            roles,
        });
    }

    Ok(AuditPlan {
        epics,
        final_counter: counter,
    })
}
