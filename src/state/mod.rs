//! Persisted orchestration state: session metadata, the bead counter, and
//! the epic and role records the scheduler mutates.

mod lock;
mod store;

pub use lock::StateLock;
pub use store::{FileStateStore, StateStore};

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const STATE_DIR: &str = ".lattice";
pub const STATE_FILE: &str = "state.json";

/// Directory holding state, role working dirs and summaries
pub fn state_dir(cwd: &Path) -> PathBuf {
    cwd.join(STATE_DIR)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct State {
    #[serde(default)]
    pub session: Option<Session>,

    /// Last bead number handed out. Shared by epics and roles.
    #[serde(default)]
    pub bead_counter: u64,

    /// Keyed by audit type id
    #[serde(default)]
    pub epics: BTreeMap<String, EpicState>,

    /// Keyed by role bead id
    #[serde(default)]
    pub roles: BTreeMap<String, RoleState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub working_dir: PathBuf,
    #[serde(default)]
    pub target: String,
}

impl Session {
    pub fn new(now: DateTime<Utc>, working_dir: &Path, target: impl Into<String>) -> Self {
        Self {
            name: session_name(now),
            created_at: now,
            working_dir: working_dir.to_path_buf(),
            target: target.into(),
        }
    }
}

/// Time-derived session name, e.g. `lattice-20261016-142501`
pub fn session_name(now: DateTime<Utc>) -> String {
    format!("lattice-{}", now.format("%Y%m%d-%H%M%S"))
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EpicState {
    pub bead_id: String,
    pub audit_type: String,
    #[serde(default)]
    pub audit_name: String,
    #[serde(default)]
    pub bead_prefix: String,
    #[serde(default)]
    pub agent_count: usize,
    #[serde(default)]
    pub intensity: u32,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    /// Derived from role statuses on every scheduler pass
    #[serde(default)]
    pub status: EpicStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RoleState {
    pub bead_id: String,
    pub epic_bead_id: String,
    pub code_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub guidance: String,
    #[serde(default)]
    pub bead_prefix: String,
    /// 1-based position in the epic's pipeline
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub status: RoleStatus,
    /// `session:window` while running, empty otherwise
    #[serde(default)]
    pub tmux_window: String,
    #[serde(default)]
    pub intensity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launched_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleStatus {
    #[default]
    Pending,
    Running,
    Complete,
    Failed,
}

impl RoleStatus {
    /// Anything unrecognised (including empty) is pending
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "running" => RoleStatus::Running,
            "complete" => RoleStatus::Complete,
            "failed" => RoleStatus::Failed,
            _ => RoleStatus::Pending,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RoleStatus::Complete | RoleStatus::Failed)
    }
}

impl std::fmt::Display for RoleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleStatus::Pending => write!(f, "pending"),
            RoleStatus::Running => write!(f, "running"),
            RoleStatus::Complete => write!(f, "complete"),
            RoleStatus::Failed => write!(f, "failed"),
        }
    }
}

impl<'de> Deserialize<'de> for RoleStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(RoleStatus::parse_lenient)
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EpicStatus {
    #[default]
    Running,
    Blocked,
    Failed,
    Complete,
}

impl std::fmt::Display for EpicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EpicStatus::Running => write!(f, "running"),
            EpicStatus::Blocked => write!(f, "blocked"),
            EpicStatus::Failed => write!(f, "failed"),
            EpicStatus::Complete => write!(f, "complete"),
        }
    }
}

// Stored epic status is informational only; decode anything.
impl<'de> Deserialize<'de> for EpicStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_lowercase().as_str() {
            "blocked" => EpicStatus::Blocked,
            "failed" => EpicStatus::Failed,
            "complete" => EpicStatus::Complete,
            _ => EpicStatus::Running,
        })
    }
}

impl State {
    /// Start a new run: replace the session and drop the previous run's
    /// epics and roles. The bead counter carries over.
    pub fn begin_run(&mut self, session: Session) {
        self.session = Some(session);
        self.epics.clear();
        self.roles.clear();
    }

    pub fn session_name(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.name.as_str())
    }

    /// Roles belonging to one epic, in pipeline order (ties by bead id)
    pub fn roles_for_epic(&self, epic_bead_id: &str) -> Vec<&RoleState> {
        let mut roles: Vec<&RoleState> = self
            .roles
            .values()
            .filter(|role| role.epic_bead_id == epic_bead_id)
            .collect();
        roles.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.bead_id.cmp(&b.bead_id)));
        roles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unknown_and_empty_role_status_decode_as_pending() {
        let json = r#"{"bead_id":"audit-plan-002","epic_bead_id":"audit-plan-001","code_name":"alpha","status":"exploded"}"#;
        let role: RoleState = serde_json::from_str(json).unwrap();
        assert_eq!(role.status, RoleStatus::Pending);

        let json = r#"{"bead_id":"audit-plan-002","epic_bead_id":"audit-plan-001","code_name":"alpha","status":""}"#;
        let role: RoleState = serde_json::from_str(json).unwrap();
        assert_eq!(role.status, RoleStatus::Pending);

        let json = r#"{"bead_id":"audit-plan-002","epic_bead_id":"audit-plan-001","code_name":"alpha","status":" Running "}"#;
        let role: RoleState = serde_json::from_str(json).unwrap();
        assert_eq!(role.status, RoleStatus::Running);
    }

    #[test]
    fn test_role_status_serializes_lowercase() {
        let json = serde_json::to_string(&RoleStatus::Complete).unwrap();
        assert_eq!(json, "\"complete\"");
    }

    #[test]
    fn test_session_name_is_time_derived() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 14, 25, 1).unwrap();
        assert_eq!(session_name(now), "lattice-20261016-142501");
    }

    #[test]
    fn test_begin_run_keeps_counter() {
        let mut state = State {
            bead_counter: 9,
            ..State::default()
        };
        state.roles.insert(
            "audit-plan-002".to_string(),
            RoleState {
                bead_id: "audit-plan-002".to_string(),
                ..RoleState::default()
            },
        );

        state.begin_run(Session::new(Utc::now(), Path::new("/work"), "work"));

        assert_eq!(state.bead_counter, 9);
        assert!(state.roles.is_empty());
        assert!(state.session_name().unwrap().starts_with("lattice-"));
    }

    #[test]
    fn test_roles_for_epic_sorted_by_order_then_id() {
        let mut state = State::default();
        for (id, order) in [("audit-plan-004", 2), ("audit-plan-003", 1), ("audit-plan-002", 1)] {
            state.roles.insert(
                id.to_string(),
                RoleState {
                    bead_id: id.to_string(),
                    epic_bead_id: "audit-plan-001".to_string(),
                    order,
                    ..RoleState::default()
                },
            );
        }

        let ids: Vec<_> = state
            .roles_for_epic("audit-plan-001")
            .iter()
            .map(|r| r.bead_id.as_str())
            .collect();
        assert_eq!(ids, ["audit-plan-002", "audit-plan-003", "audit-plan-004"]);
    }
}
