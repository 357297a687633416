use super::{state_dir, State, STATE_FILE};
use crate::error::StoreError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Load/save seam for orchestration state
pub trait StateStore {
    fn load(&self) -> Result<State, StoreError>;

    fn save(&self, state: &State) -> Result<(), StoreError>;
}

/// `state.json` under the working directory's `.lattice/`
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(cwd: &Path) -> Self {
        Self {
            path: state_dir(cwd).join(STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    /// A missing file is an empty state; a corrupt one is an error
    fn load(&self) -> Result<State, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No state at {}, starting empty", self.path.display());
                return Ok(State::default());
            }
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(&self, state: &State) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;
        let parent = self.path.parent().unwrap_or(Path::new("."));

        let write_err = |e: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            source: e,
        };

        fs::create_dir_all(parent).map_err(write_err)?;

        // Atomic write: temp file in the same directory, then rename over.
        let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}
