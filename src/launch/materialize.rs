use crate::probe::STATUS_FILE_NAME;
use crate::state::state_dir;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const ROLE_BRIEF_FILE: &str = "ROLE.md";

/// Everything needed to lay out one role's working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSessionParams {
    pub cwd: PathBuf,
    pub epic_bead_id: String,
    pub role_bead_id: String,
    pub title: String,
    pub guidance: String,
    pub intensity: u32,
    pub bead_prefix: String,
    pub audit_type_id: String,
    pub code_name: String,
    pub target: String,
    pub focus_areas: Vec<String>,
}

/// Produces the directory an agent is started in. Must be deterministic:
/// the same params always yield the same path and contents, including an
/// initial status file.
pub trait RoleMaterializer {
    fn materialize(&self, params: &RoleSessionParams) -> std::io::Result<PathBuf>;
}

/// `.lattice/teams/audit-<type>-<code>/` for a role
pub fn role_session_dir(cwd: &Path, audit_type_id: &str, code_name: &str) -> PathBuf {
    state_dir(cwd)
        .join("teams")
        .join(format!("audit-{}-{}", audit_type_id.trim(), code_name.trim()))
}

/// Writes a role brief and the initial status file
pub struct TeamDirMaterializer;

impl RoleMaterializer for TeamDirMaterializer {
    fn materialize(&self, params: &RoleSessionParams) -> std::io::Result<PathBuf> {
        let dir = role_session_dir(&params.cwd, &params.audit_type_id, &params.code_name);

        match fs::remove_dir_all(&dir) {
            Ok(()) => debug!("Reset role directory {}", dir.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::create_dir_all(&dir)?;

        fs::write(dir.join(ROLE_BRIEF_FILE), render_brief(params))?;
        fs::write(dir.join(STATUS_FILE_NAME), render_initial_status(params))?;

        Ok(dir)
    }
}

fn team_name(params: &RoleSessionParams) -> String {
    format!("audit-{}-{}", params.audit_type_id, params.code_name)
}

fn render_brief(params: &RoleSessionParams) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", params.title);
    let _ = writeln!(out, "- Team: {}", team_name(params));
    let _ = writeln!(out, "- Code name: {}", params.code_name);
    let _ = writeln!(out, "- Epic bead: {}", params.epic_bead_id);
    let _ = writeln!(out, "- Role bead: {}", params.role_bead_id);
    let _ = writeln!(out, "- Bead prefix: {}", params.bead_prefix);
    let _ = writeln!(out, "- Intensity: {} loops", params.intensity);
    let _ = writeln!(out, "- Target: {}", params.target);

    out.push_str("\n## Guidance\n\n");
    let _ = writeln!(out, "{}", params.guidance);

    if !params.focus_areas.is_empty() {
        out.push_str("\n## Focus areas\n\n");
        for area in &params.focus_areas {
            let _ = writeln!(out, "- {}", area);
        }
    }

    out.push_str("\n## Reporting\n\n");
    let _ = writeln!(
        out,
        "Keep `{}` in this directory current: bump `current_loop` after each loop \
         and set `status=complete` once your findings are filed. Closing the \
         window without doing so marks this role failed.",
        STATUS_FILE_NAME
    );

    out
}

fn render_initial_status(params: &RoleSessionParams) -> String {
    format!(
        "# lattice role status\nteam={}\nstatus=running\ncurrent_loop=0\nintensity={}\n",
        team_name(params),
        params.intensity
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::read_status_file;

    fn params(cwd: &Path) -> RoleSessionParams {
        RoleSessionParams {
            cwd: cwd.to_path_buf(),
            epic_bead_id: "audit-plan-001".to_string(),
            role_bead_id: "audit-plan-002".to_string(),
            title: "Senior performance specialist".to_string(),
            guidance: "Own the audit.".to_string(),
            intensity: 3,
            bead_prefix: "perf-senior-performance-specialist".to_string(),
            audit_type_id: "perf".to_string(),
            code_name: "alpha".to_string(),
            target: "shop".to_string(),
            focus_areas: vec!["bundle size".to_string()],
        }
    }

    #[test]
    fn test_materialize_writes_brief_and_running_marker() {
        let dir = tempfile::tempdir().unwrap();
        let role_dir = TeamDirMaterializer.materialize(&params(dir.path())).unwrap();

        assert_eq!(role_dir, role_session_dir(dir.path(), "perf", "alpha"));

        let status = read_status_file(&role_dir.join(STATUS_FILE_NAME))
            .unwrap()
            .unwrap();
        assert_eq!(status.status(), "running");
        assert_eq!(status.current_loop(), Some(0));
        assert_eq!(status.intensity(), Some(3));

        let brief = fs::read_to_string(role_dir.join(ROLE_BRIEF_FILE)).unwrap();
        assert!(brief.contains("perf-senior-performance-specialist"));
        assert!(brief.contains("- bundle size"));
    }

    #[test]
    fn test_materialize_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let first = TeamDirMaterializer.materialize(&params(dir.path())).unwrap();
        fs::write(first.join("scratch.txt"), "left over").unwrap();
        fs::write(first.join(STATUS_FILE_NAME), "status=complete").unwrap();

        let second = TeamDirMaterializer.materialize(&params(dir.path())).unwrap();

        assert_eq!(first, second);
        assert!(!second.join("scratch.txt").exists());
        let status = read_status_file(&second.join(STATUS_FILE_NAME)).unwrap().unwrap();
        assert!(!status.is_complete());
    }
}
