use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use jiff::Timestamp;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::guard::SpinGuard;
use crate::id::generate_id;
use crate::models::{HistoryEntry, Outcome};
use crate::selector::{self, Draw};
use crate::store::Store;

/// Settled result of one spin.
#[derive(Debug, Serialize)]
pub struct SpinResult {
    pub winner: Outcome,
    pub name: String,
    pub draw: f64,
    pub target_angle: f64,
    pub from_rotation: f64,
    pub target_rotation: f64,
    pub entry: HistoryEntry,
    /// False when the history write failed and the entry lives only in memory.
    pub recorded: bool,
}

/// One spin from request to settled result.
///
/// `settle` receives the outcome set, start and target rotation and the
/// configured duration, and returns once the wheel has visibly come to rest.
/// The store is re-read after the spin lock is taken and again after
/// `settle`, so writes made by other commands in the meantime survive.
pub fn run<R, F>(name: &str, store: &mut Store, rng: &mut R, settle: F) -> Result<SpinResult>
where
    R: Rng + ?Sized,
    F: FnOnce(&[Outcome], f64, f64, Duration) -> Result<()>,
{
    let name = name.trim();
    if name.is_empty() {
        bail!("Enter a participant name to spin.");
    }

    let _guard = SpinGuard::try_begin(store.base_path())?;
    // Start from what is on disk once no other spin can be writing.
    store.reload()?;
    selector::validate(&store.wheel().outcomes)?;

    let wheel = store.wheel();
    let from_rotation = wheel.rotation;
    let draw = Draw::sample(rng);
    let selection = selector::select_winner(
        &wheel.outcomes,
        from_rotation,
        draw,
        &wheel.settings.selector_params(),
    )
    .ok_or_else(|| anyhow!("The wheel has no outcomes."))?;
    let winner = wheel.outcomes[selection.winner].clone();

    debug!(
        draw = draw.value(),
        winner = %winner.id(),
        target_angle = selection.target_angle,
        target_rotation = selection.target_rotation,
        "selected"
    );

    let duration = Duration::from_secs(wheel.settings.spin_duration_secs.max(1));
    settle(&wheel.outcomes, from_rotation, selection.target_rotation, duration)?;

    // Outcome edits, config changes and history clears made while the wheel
    // was turning are kept; only the rotation and the new entry are ours.
    if let Err(err) = store.reload() {
        warn!("failed to re-read store after spin: {err:#}");
    }
    store.wheel_mut().rotation = selection.target_rotation;
    if let Err(err) = store.save_wheel() {
        warn!("failed to save wheel rotation: {err:#}");
    }

    let entry = HistoryEntry::for_winner(generate_id(), &winner, name, Timestamp::now());
    let recorded = store.append_history(entry.clone());

    info!(name, winner = %winner.label(), recorded, "spin settled");

    Ok(SpinResult {
        winner,
        name: name.to_owned(),
        draw: draw.value(),
        target_angle: selection.target_angle,
        from_rotation,
        target_rotation: selection.target_rotation,
        entry,
        recorded,
    })
}
