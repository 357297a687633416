//! Thin wrapper around the tmux CLI.
//!
//! The scheduler only creates and lists windows by name; it never closes or
//! renames them, so humans can attach to the session while it runs.

mod path;

pub use path::translate_to_wsl_path;

use crate::config::TmuxConfig;
use crate::error::TmuxError;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Window created for every session before any role is launched
pub const DASHBOARD_WINDOW: &str = "dashboard";

const LIST_WINDOWS_FORMAT: &str = "#{window_index}\t#{window_name}\t#{window_active}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub index: u32,
    pub name: String,
    pub active: bool,
}

/// Operations the orchestrator needs from a terminal multiplexer
pub trait Multiplexer {
    fn create_session(&self, name: &str) -> Result<(), TmuxError>;

    fn create_window(&self, session: &str, name: &str) -> Result<(), TmuxError>;

    /// Type `command` into the window and press Enter
    fn send_keys(&self, session: &str, window: &str, command: &str) -> Result<(), TmuxError>;

    fn list_windows(&self, session: &str) -> Result<Vec<WindowInfo>, TmuxError>;
}

/// Runs one tmux invocation
pub trait TmuxCommand {
    /// Run with captured output, returning trimmed stdout
    fn run(&self, args: &[&str]) -> Result<String, TmuxError>;

    /// Run attached to the current terminal
    fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError>;
}

/// The real tmux binary, optionally reached through `wsl`
pub struct SystemTmux {
    binary: PathBuf,
    wsl: bool,
}

impl SystemTmux {
    pub fn new(config: &TmuxConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            wsl: config.wsl,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = if self.wsl {
            let mut cmd = Command::new("wsl");
            cmd.arg(&self.binary);
            cmd
        } else {
            Command::new(&self.binary)
        };
        cmd.args(args);
        cmd
    }
}

impl TmuxCommand for SystemTmux {
    fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
        debug!("tmux {}", args.join(" "));
        let output = self.command(args).output()?;

        if !output.status.success() {
            return Err(TmuxError::CommandFailed {
                command: args.first().copied().unwrap_or_default().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError> {
        let status = self.command(args).status()?;
        if !status.success() {
            return Err(TmuxError::CommandFailed {
                command: args.first().copied().unwrap_or_default().to_string(),
                stderr: format!("exited with {}", status),
            });
        }
        Ok(())
    }
}

pub struct TmuxManager {
    command: Box<dyn TmuxCommand>,
}

impl TmuxManager {
    /// Create a manager for the configured tmux and check it responds
    pub fn new(config: &TmuxConfig) -> Result<Self, TmuxError> {
        let manager = Self::with_command(Box::new(SystemTmux::new(config)));
        manager
            .command
            .run(&["-V"])
            .map_err(|e| TmuxError::Unavailable(e.to_string()))?;
        Ok(manager)
    }

    pub fn with_command(command: Box<dyn TmuxCommand>) -> Self {
        Self { command }
    }

    /// Hand the terminal over to a running session
    pub fn attach_session(&self, name: &str) -> Result<(), TmuxError> {
        let name = non_empty(name)?;
        self.command
            .run_interactive(&["attach-session", "-t", name])
    }
}

impl Multiplexer for TmuxManager {
    fn create_session(&self, name: &str) -> Result<(), TmuxError> {
        let name = non_empty(name)?;
        self.command
            .run(&["new-session", "-d", "-s", name, "-n", DASHBOARD_WINDOW])?;
        Ok(())
    }

    fn create_window(&self, session: &str, name: &str) -> Result<(), TmuxError> {
        let session = non_empty(session)?;
        let name = non_empty(name)?;
        self.command.run(&["new-window", "-t", session, "-n", name])?;
        Ok(())
    }

    fn send_keys(&self, session: &str, window: &str, command: &str) -> Result<(), TmuxError> {
        let session = non_empty(session)?;
        let window = non_empty(window)?;
        if command.is_empty() {
            return Err(TmuxError::EmptyName);
        }

        let target = format!("{}:{}", session, window);
        self.command
            .run(&["send-keys", "-t", &target, command, "C-m"])?;
        Ok(())
    }

    fn list_windows(&self, session: &str) -> Result<Vec<WindowInfo>, TmuxError> {
        let session = non_empty(session)?;
        let out = self
            .command
            .run(&["list-windows", "-t", session, "-F", LIST_WINDOWS_FORMAT])?;
        parse_window_list(&out)
    }
}

fn non_empty(value: &str) -> Result<&str, TmuxError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(TmuxError::EmptyName)
    } else {
        Ok(trimmed)
    }
}

fn parse_window_list(out: &str) -> Result<Vec<WindowInfo>, TmuxError> {
    let mut windows = Vec::new();

    for line in out.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != 3 {
            return Err(TmuxError::ParseWindows(format!("unexpected line {:?}", line)));
        }

        let index = parts[0]
            .parse()
            .map_err(|_| TmuxError::ParseWindows(format!("invalid index {:?}", parts[0])))?;

        windows.push(WindowInfo {
            index,
            name: parts[1].to_string(),
            active: parts[2] == "1",
        });
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeTmux {
        calls: Rc<RefCell<Vec<Vec<String>>>>,
        output: String,
        fail: bool,
    }

    impl TmuxCommand for FakeTmux {
        fn run(&self, args: &[&str]) -> Result<String, TmuxError> {
            self.calls
                .borrow_mut()
                .push(args.iter().map(|a| a.to_string()).collect());
            if self.fail {
                return Err(TmuxError::CommandFailed {
                    command: args[0].to_string(),
                    stderr: "no server running".to_string(),
                });
            }
            Ok(self.output.clone())
        }

        fn run_interactive(&self, args: &[&str]) -> Result<(), TmuxError> {
            self.run(args).map(|_| ())
        }
    }

    fn manager(output: &str) -> (TmuxManager, Rc<RefCell<Vec<Vec<String>>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let fake = FakeTmux {
            calls: calls.clone(),
            output: output.to_string(),
            fail: false,
        };
        (TmuxManager::with_command(Box::new(fake)), calls)
    }

    #[test]
    fn test_create_session_detached_with_dashboard() {
        let (manager, calls) = manager("");
        manager.create_session(" lattice-1 ").unwrap();

        assert_eq!(
            calls.borrow()[0],
            ["new-session", "-d", "-s", "lattice-1", "-n", "dashboard"]
        );
    }

    #[test]
    fn test_send_keys_targets_window_and_presses_enter() {
        let (manager, calls) = manager("");
        manager
            .send_keys("lattice-1", "audit-perf-alpha", "cd '/x' && opencode run auditor")
            .unwrap();

        assert_eq!(
            calls.borrow()[0],
            [
                "send-keys",
                "-t",
                "lattice-1:audit-perf-alpha",
                "cd '/x' && opencode run auditor",
                "C-m"
            ]
        );
    }

    #[test]
    fn test_empty_names_rejected_before_running() {
        let (manager, calls) = manager("");

        assert!(matches!(manager.create_window("s", "  "), Err(TmuxError::EmptyName)));
        assert!(matches!(manager.send_keys("s", "w", ""), Err(TmuxError::EmptyName)));
        assert!(matches!(manager.list_windows(""), Err(TmuxError::EmptyName)));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_list_windows_parses_output() {
        let (manager, _) = manager("0\tdashboard\t0\n1\taudit-perf-alpha\t1\n");
        let windows = manager.list_windows("lattice-1").unwrap();

        assert_eq!(
            windows,
            vec![
                WindowInfo {
                    index: 0,
                    name: "dashboard".to_string(),
                    active: false,
                },
                WindowInfo {
                    index: 1,
                    name: "audit-perf-alpha".to_string(),
                    active: true,
                },
            ]
        );
    }

    #[test]
    fn test_list_windows_empty_output() {
        let (manager, _) = manager("");
        assert!(manager.list_windows("lattice-1").unwrap().is_empty());
    }

    #[test]
    fn test_list_windows_rejects_malformed_lines() {
        assert!(matches!(
            parse_window_list("0\tdashboard"),
            Err(TmuxError::ParseWindows(_))
        ));
        assert!(matches!(
            parse_window_list("x\tdashboard\t1"),
            Err(TmuxError::ParseWindows(_))
        ));
    }

    #[test]
    fn test_command_failure_surfaces() {
        let fake = FakeTmux {
            fail: true,
            ..FakeTmux::default()
        };
        let manager = TmuxManager::with_command(Box::new(fake));

        let err = manager.create_window("lattice-1", "audit-perf-alpha").unwrap_err();
        assert!(err.to_string().contains("no server running"));
    }
}
