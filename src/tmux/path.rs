use crate::error::TmuxError;
use std::path::{Component, Path, PathBuf};

/// Convert a Windows path into its WSL mount path (`C:\src` -> `/mnt/c/src`).
/// Unix-style paths are only cleaned.
pub fn translate_to_wsl_path(path: &Path) -> Result<String, TmuxError> {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TmuxError::InvalidPath("path must not be empty".to_string()));
    }

    let normalized = trimmed.replace('\\', "/");
    let bytes = normalized.as_bytes();

    if bytes.len() >= 2 && bytes[1] == b':' {
        let drive = bytes[0] as char;
        if !drive.is_ascii_alphabetic() {
            return Err(TmuxError::InvalidPath(format!(
                "invalid drive letter in path {:?}",
                trimmed
            )));
        }
        if bytes.len() < 3 || bytes[2] != b'/' {
            return Err(TmuxError::InvalidPath(format!(
                "unsupported Windows path format {:?}",
                trimmed
            )));
        }

        let rest = normalized[3..].trim_start_matches('/');
        let mount = format!("/mnt/{}/{}", drive.to_ascii_lowercase(), rest);
        return Ok(clean(&mount));
    }

    Ok(clean(&normalized))
}

/// Lexically resolve `.` and `..` and duplicate separators
fn clean(path: &str) -> String {
    let mut out = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    let cleaned = out.to_string_lossy().to_string();
    if cleaned.is_empty() {
        ".".to_string()
    } else {
        cleaned
    }
}
