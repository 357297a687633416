use super::state_dir;
use crate::error::StoreError;
use fd_lock::{RwLock, RwLockWriteGuard};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use tracing::debug;

pub const LOCK_FILE: &str = "state.lock";

/// Exclusive hold on a working directory's state. Only one process may
/// launch or run scheduler passes at a time; the lock is released on drop.
pub struct StateLock {
    _guard: RwLockWriteGuard<'static, File>,
}

impl StateLock {
    /// Take the lock, failing straight away when another process has it
    pub fn acquire(cwd: &Path) -> Result<Self, StoreError> {
        let dir = state_dir(cwd);
        let path = dir.join(LOCK_FILE);
        let write_err = |e: std::io::Error| StoreError::Write {
            path: path.clone(),
            source: e,
        };

        fs::create_dir_all(&dir).map_err(write_err)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(write_err)?;

        // The guard must outlive this frame, so the lock handle is leaked.
        let lock = Box::leak(Box::new(RwLock::new(file)));
        let guard = lock.try_write().map_err(|e| {
            if e.kind() == std::io::ErrorKind::WouldBlock {
                StoreError::Locked { path: path.clone() }
            } else {
                write_err(e)
            }
        })?;

        debug!("Locked {}", path.display());
        Ok(Self { _guard: guard })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_refused_while_held() {
        let dir = tempfile::tempdir().unwrap();

        let held = StateLock::acquire(dir.path()).unwrap();
        assert!(dir.path().join(".lattice").join(LOCK_FILE).exists());

        let err = StateLock::acquire(dir.path()).err().unwrap();
        assert!(matches!(err, StoreError::Locked { .. }));

        drop(held);
        assert!(StateLock::acquire(dir.path()).is_ok());
    }

    #[test]
    fn test_locks_are_per_working_directory() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        let _a = StateLock::acquire(first.path()).unwrap();
        assert!(StateLock::acquire(second.path()).is_ok());
    }
}
