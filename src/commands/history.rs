use anyhow::{Result, bail};

use crate::models::HistoryEntry;
use crate::store::Store;

pub fn list(store: &Store) -> Vec<HistoryEntry> {
    store.history().to_vec()
}

/// Empties the history. Refuses unless `confirmed`.
pub fn clear(confirmed: bool, store: &mut Store) -> Result<usize> {
    if !confirmed {
        bail!("This deletes the whole spin history. Re-run with --yes to confirm.");
    }
    store.clear_history()
}
