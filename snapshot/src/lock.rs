//! Storage target locking across snapshot invocations
//!
//! Only one destructive operation may touch a storage target at a time. Each
//! target (network) gets an advisory `fs2` lock file under the configured lock
//! directory:
//!
//! - **Restore** takes the lock exclusively
//! - **Verify** takes it shared, so verifications may overlap each other but never a restore
//! - Acquisition never blocks; a held target fails fast with the holder's identity
//! - The lock is released when the guard is dropped
//!
//! # Usage
//!
//! ```ignore
//! let locks = TargetLock::new("data/locks");
//! let _guard = locks.try_acquire("mainnet", LockMode::Exclusive, "snapshot:restore")?;
//! // restore runs while the guard is alive
//! ```

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::LockError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

/// Written into the lock file by the exclusive holder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockHolder {
    pub command: String,
    pub target: String,
    pub pid: u32,
    pub invocation_id: Uuid,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TargetLock {
    dir: PathBuf,
}

pub struct TargetLockGuard {
    file: File,
    path: PathBuf,
    mode: LockMode,
    holder: LockHolder,
}

impl TargetLock {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn lock_path(&self, target: &str) -> PathBuf {
        self.dir.join(format!("{}.lock", target))
    }

    fn io_error(path: &Path, err: std::io::Error) -> LockError {
        LockError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// Try to take the target in the requested mode without waiting
    pub fn try_acquire(
        &self,
        target: &str,
        mode: LockMode,
        command: &str,
    ) -> Result<TargetLockGuard, LockError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(&self.dir, e))?;

        let path = self.lock_path(target);
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|e| Self::io_error(&path, e))?;

        let acquired = match mode {
            LockMode::Shared => FileExt::try_lock_shared(&file),
            LockMode::Exclusive => FileExt::try_lock_exclusive(&file),
        };

        if let Err(e) = acquired {
            debug!("Lock {} unavailable: {}", path.display(), e);
            let holder = if Self::held_exclusively(&file) {
                Self::read_holder(&path)
            } else {
                None
            };
            return Err(LockError::Busy {
                target: target.to_string(),
                command: command.to_string(),
                holder,
            });
        }

        let holder = LockHolder {
            command: command.to_string(),
            target: target.to_string(),
            pid: std::process::id(),
            invocation_id: Uuid::new_v4(),
            started_at: Utc::now(),
        };

        // Shared holders leave the file alone so concurrent verifications do not interleave writes
        if mode == LockMode::Exclusive {
            if let Err(e) = Self::write_holder(&mut file, &holder) {
                let _ = FileExt::unlock(&file);
                return Err(Self::io_error(&path, e));
            }
        }

        info!(
            "Acquired {:?} lock on storage target {} for {}",
            mode, target, command
        );

        Ok(TargetLockGuard {
            file,
            path,
            mode,
            holder,
        })
    }

    /// A record left by a killed restore outlives its lock, so it is only
    /// trusted while someone still holds the target exclusively.
    fn held_exclusively(file: &File) -> bool {
        match FileExt::try_lock_shared(file) {
            Ok(()) => {
                let _ = FileExt::unlock(file);
                false
            }
            Err(_) => true,
        }
    }

    /// Current exclusive holder of a target, if one is recorded and still holds it
    pub fn current_holder(&self, target: &str) -> Option<LockHolder> {
        let path = self.lock_path(target);
        let file = File::open(&path).ok()?;
        if Self::held_exclusively(&file) {
            Self::read_holder(&path)
        } else {
            None
        }
    }

    fn read_holder(path: &Path) -> Option<LockHolder> {
        let content = fs::read_to_string(path).ok()?;
        if content.trim().is_empty() {
            return None;
        }
        serde_json::from_str(&content).ok()
    }

    fn write_holder(file: &mut File, holder: &LockHolder) -> std::io::Result<()> {
        let payload = serde_json::to_vec(holder)?;
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&payload)?;
        file.sync_data()
    }
}

impl TargetLockGuard {
    pub fn mode(&self) -> LockMode {
        self.mode
    }

    pub fn holder(&self) -> &LockHolder {
        &self.holder
    }
}

impl Drop for TargetLockGuard {
    fn drop(&mut self) {
        if self.mode == LockMode::Exclusive {
            if let Err(e) = self.file.set_len(0) {
                warn!("Failed to clear lock holder in {}: {}", self.path.display(), e);
            }
        }
        // Unlock errors are ignored; closing the file releases the lock anyway.
        let _ = FileExt::unlock(&self.file);

        let duration = Utc::now().signed_duration_since(self.holder.started_at);
        info!(
            "Released {:?} lock on storage target {} (held {}s)",
            self.mode,
            self.holder.target,
            duration.num_seconds()
        );
    }
}
