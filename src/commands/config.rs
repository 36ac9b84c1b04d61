use anyhow::{Result, bail};

use crate::models::Settings;
use crate::selector::FULL_TURN;
use crate::store::Store;

/// Requested setting changes; `None` leaves a value alone.
#[derive(Debug, Default)]
pub struct SettingsUpdate {
    pub duration: Option<u64>,
    pub revolutions: Option<u32>,
    pub margin: Option<f64>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.duration.is_none() && self.revolutions.is_none() && self.margin.is_none()
    }
}

/// Applies `update` (if any) and returns the resulting settings.
pub fn run(update: SettingsUpdate, store: &mut Store) -> Result<Settings> {
    if update.is_empty() {
        return Ok(store.wheel().settings.clone());
    }

    if update.revolutions == Some(0) {
        bail!("Extra revolutions must be at least 1.");
    }

    if let Some(margin) = update.margin {
        if !(margin.is_finite() && margin > 0.0 && margin < FULL_TURN / 2.0) {
            bail!("Edge margin must be above 0 and below 180 degrees, got {margin}.");
        }
    }

    let settings = &mut store.wheel_mut().settings;
    if let Some(duration) = update.duration {
        settings.spin_duration_secs = duration.max(1);
    }
    if let Some(revolutions) = update.revolutions {
        settings.extra_revolutions = revolutions;
    }
    if let Some(margin) = update.margin {
        settings.edge_margin_deg = margin;
    }
    let settings = settings.clone();

    store.save_wheel()?;
    Ok(settings)
}
