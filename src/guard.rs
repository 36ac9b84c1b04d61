use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fs2::FileExt;
use serde::Serialize;
use strum::{AsRefStr, EnumString};
use tracing::debug;

pub const SPIN_LOCK_FILE: &str = "spin.lock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WheelState {
    Idle,
    Spinning,
}

/// Reports whether a spin currently holds the lock in `dir`.
pub fn state(dir: &Path) -> Result<WheelState> {
    let path = dir.join(SPIN_LOCK_FILE);
    if !path.exists() {
        return Ok(WheelState::Idle);
    }

    let file = File::open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    if file.try_lock_exclusive().is_err() {
        return Ok(WheelState::Spinning);
    }
    file.unlock().context("Failed to unlock spin lock")?;
    Ok(WheelState::Idle)
}

/// Exclusive hold on the wheel for the duration of one spin.
///
/// Taking the guard moves the wheel from idle to spinning; dropping it moves
/// it back. A second guard cannot be taken while one is alive, in this
/// process or any other.
#[derive(Debug)]
pub struct SpinGuard {
    file: File,
    path: PathBuf,
}

impl SpinGuard {
    pub fn try_begin(dir: &Path) -> Result<Self> {
        let path = dir.join(SPIN_LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        if file.try_lock_exclusive().is_err() {
            bail!("A spin is already in progress. Wait for it to finish.");
        }

        debug!(lock = %path.display(), "wheel spinning");
        Ok(Self { file, path })
    }
}

impl Drop for SpinGuard {
    fn drop(&mut self) {
        // Closing the file releases the lock anyway.
        let _ = self.file.unlock();
        debug!(lock = %self.path.display(), "wheel idle");
    }
}
