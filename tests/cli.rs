use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn lattice(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lattice").unwrap();
    cmd.current_dir(dir.path()).env_remove("LATTICE_CONFIG");
    cmd
}

#[test]
fn test_types_lists_catalog() {
    let dir = tempfile::tempdir().unwrap();

    lattice(&dir)
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("perf"))
        .stdout(predicate::str::contains("security"))
        .stdout(predicate::str::contains("errhandling"))
        .stdout(predicate::str::contains("agents: 1, 2, 3"));
}

#[test]
fn test_schema_prints_config_and_state_schemas() {
    let dir = tempfile::tempdir().unwrap();

    lattice(&dir)
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("agent_command"))
        .stdout(predicate::str::contains("poll_interval_sec"));

    lattice(&dir)
        .args(["schema", "--state"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bead_counter"))
        .stdout(predicate::str::contains("tmux_window"));
}

#[test]
fn test_launch_dry_run_prints_plan_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();

    lattice(&dir)
        .args([
            "launch",
            "--types",
            "perf,security",
            "--agents",
            "2",
            "--intensity",
            "3",
            "--dry-run",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Audit Plan ==="))
        .stdout(predicate::str::contains("audit-plan-001"))
        .stdout(predicate::str::contains("audit-plan-006"))
        .stdout(predicate::str::contains("bravo"));

    assert!(!dir.path().join(".lattice").exists());
}

#[test]
fn test_launch_rejects_unknown_type() {
    let dir = tempfile::tempdir().unwrap();

    lattice(&dir)
        .args(["launch", "--types", "vibes", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown audit type \"vibes\""));
}

#[test]
fn test_launch_rejects_agent_count_out_of_range() {
    let dir = tempfile::tempdir().unwrap();

    lattice(&dir)
        .args(["launch", "--types", "perf", "--agents", "4", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("agent count must be between 1 and 3"));
}

#[test]
fn test_status_without_state() {
    let dir = tempfile::tempdir().unwrap();

    lattice(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session: (none)"))
        .stdout(predicate::str::contains("No audits launched."));
}

#[test]
fn test_status_rejects_corrupt_state() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".lattice")).unwrap();
    fs::write(dir.path().join(".lattice/state.json"), "{not json").unwrap();

    lattice(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse state file"));
}

#[test]
fn test_tick_without_run_fails() {
    let dir = tempfile::tempdir().unwrap();

    lattice(&dir)
        .arg("tick")
        .assert()
        .failure()
        .stderr(predicate::str::contains("lattice launch"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lattice.yaml"), "poll_interval_sec: 0\n").unwrap();

    lattice(&dir)
        .args(["launch", "--types", "perf", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll_interval_sec must be at least 1"));
}

#[test]
fn test_tick_refused_while_another_process_holds_state() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".lattice")).unwrap();
    let file = fs::File::create(dir.path().join(".lattice/state.lock")).unwrap();
    let mut lock = fd_lock::RwLock::new(file);
    let _held = lock.try_write().unwrap();

    lattice(&dir)
        .arg("tick")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Another lattice process holds"));
}
