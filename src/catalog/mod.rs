//! Audit type catalog: which roles run for an audit type at a given agent count.

mod audit_types;

use serde::Serialize;

pub use audit_types::AUDIT_TYPES;

/// One investigator slot in an audit type's pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleTemplate {
    pub code_name: &'static str,
    pub title: &'static str,
    pub guidance: &'static str,
}

/// Ordered roles for one agent count
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleConfig {
    pub agent_count: usize,
    pub roles: &'static [RoleTemplate],
}

/// An audit mode the user can select
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AuditType {
    pub id: &'static str,
    pub name: &'static str,
    pub bead_prefix: &'static str,
    pub description: &'static str,
    pub focus_areas: &'static [&'static str],
    pub role_configs: &'static [RoleConfig],
}

impl AuditType {
    /// Roles for the requested agent count, in pipeline order
    pub fn role_config(&self, agent_count: usize) -> Option<&'static RoleConfig> {
        self.role_configs
            .iter()
            .find(|config| config.agent_count == agent_count)
    }
}

pub fn audit_types() -> &'static [AuditType] {
    AUDIT_TYPES
}

pub fn find_audit_type(id: &str) -> Option<&'static AuditType> {
    let id = id.trim();
    AUDIT_TYPES.iter().find(|audit_type| audit_type.id == id)
}
