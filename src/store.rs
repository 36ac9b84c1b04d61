use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fs2::FileExt;
use tracing::{debug, error, warn};

use crate::models::{HistoryEntry, Wheel};

pub const HISTORY_FILE: &str = "history.json";

/// Atomically write content to a file using a temporary file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp = path.with_file_name(temp_name);

    let mut file = File::create(&temp)
        .with_context(|| format!("Failed to create temporary file: {}", temp.display()))?;
    file.lock_exclusive()
        .context("Failed to acquire file lock")?;
    file.write_all(content)
        .context("Failed to write file content")?;
    file.sync_all().context("Failed to sync file")?;
    file.unlock().context("Failed to unlock file")?;
    fs::rename(&temp, path).with_context(|| format!("Failed to rename to {}", path.display()))?;
    Ok(())
}

/// Reads the history log. A missing file is an empty history; an unreadable
/// or corrupt one is logged and treated as empty.
fn load_history(path: &Path) -> Vec<HistoryEntry> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read history, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %path.display(), %err, "corrupt history, starting empty");
            Vec::new()
        }
    }
}

fn read_wheel(base: &Path) -> Result<Wheel> {
    let wheel_path = Wheel::file_path(base);
    let content = fs::read_to_string(&wheel_path)
        .with_context(|| format!("Failed to read {}", wheel_path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", wheel_path.display()))
}

/// The `.fortuna/` directory: wheel configuration plus the spin history.
pub struct Store {
    path: PathBuf,
    wheel: Wheel,
    history: Vec<HistoryEntry>,
}

impl Store {
    /// Open an existing store from the given directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            bail!("Store directory does not exist: {}", path.display());
        }

        let wheel = read_wheel(&path)?;
        let history = load_history(&path.join(HISTORY_FILE));
        debug!(
            outcomes = wheel.outcomes.len(),
            history = history.len(),
            "opened store"
        );

        Ok(Self {
            path,
            wheel,
            history,
        })
    }

    /// Write a fresh wheel and empty history into an existing directory.
    pub fn init<P: AsRef<Path>>(path: P, wheel: Wheel) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            wheel,
            history: Vec::new(),
        };
        store.save_wheel()?;
        store.save_history()?;
        Ok(store)
    }

    /// Replace the in-memory wheel and history with what is on disk now.
    /// Other processes may have written since this store was opened.
    pub fn reload(&mut self) -> Result<()> {
        self.wheel = read_wheel(&self.path)?;
        self.history = load_history(&self.history_path());
        debug!(
            rotation = self.wheel.rotation,
            history = self.history.len(),
            "reloaded store"
        );
        Ok(())
    }

    /// The base path for the `.fortuna/` directory.
    pub fn base_path(&self) -> &Path {
        &self.path
    }

    // Wheel operations

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn wheel_mut(&mut self) -> &mut Wheel {
        &mut self.wheel
    }

    pub fn save_wheel(&self) -> Result<()> {
        self.wheel.write_file(&self.path)
    }

    // History operations

    /// Entries newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    fn history_path(&self) -> PathBuf {
        self.path.join(HISTORY_FILE)
    }

    pub fn save_history(&self) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.history).context("Failed to serialize history")?;
        atomic_write(&self.history_path(), content.as_bytes())
    }

    /// Prepend an entry and persist. A failed write is logged and the entry
    /// is kept in memory only; returns whether it reached disk.
    pub fn append_history(&mut self, entry: HistoryEntry) -> bool {
        self.history.insert(0, entry);
        match self.save_history() {
            Ok(()) => true,
            Err(err) => {
                error!("failed to save history: {err:#}");
                false
            }
        }
    }

    pub fn clear_history(&mut self) -> Result<usize> {
        let removed = self.history.len();
        self.history.clear();
        self.save_history()?;
        Ok(removed)
    }
}
