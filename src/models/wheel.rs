use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Outcome;
use crate::id::generate_id;
use crate::selector::SelectorParams;
use crate::store::atomic_write;

pub const WHEEL_FILE: &str = "wheel.toml";

/// Colors handed out to new outcomes when none is given.
pub const DEFAULT_PALETTE: [&str; 9] = [
    "#39ff14", "#ff14bd", "#14ffec", "#ff5f1f", "#f8ff14", "#c32aff", "#ff2a90", "#2affd6",
    "#2ad6ff",
];

const SEED_OUTCOMES: [(&str, f64, &str); 8] = [
    ("Zero", 33.0, "#00b5b5"),
    ("Three", 7.0, "#42006e"),
    ("x2", 20.0, "#e00096"),
    ("Reset", 10.0, "#007fb5"),
    ("All +5", 5.0, "#610041"),
    ("x5", 10.0, "#42006e"),
    ("Thirty", 1.0, "#04062e"),
    ("Down to 1", 14.0, "#1b02bd"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub spin_duration_secs: u64,
    pub extra_revolutions: u32,
    pub edge_margin_deg: f64,
}

impl Default for Settings {
    fn default() -> Self {
        let params = SelectorParams::default();
        Self {
            spin_duration_secs: 8,
            extra_revolutions: params.extra_revolutions,
            edge_margin_deg: params.edge_margin_deg,
        }
    }
}

impl Settings {
    pub fn selector_params(&self) -> SelectorParams {
        SelectorParams {
            edge_margin_deg: self.edge_margin_deg,
            extra_revolutions: self.extra_revolutions,
        }
    }
}

/// The configured wheel: its outcome set, settings and last settled rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wheel {
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub outcomes: Vec<Outcome>,
}

impl Wheel {
    /// A wheel carrying the stock eight-sector layout.
    pub fn seeded() -> Self {
        let outcomes = SEED_OUTCOMES
            .iter()
            .map(|&(label, weight, color)| {
                Outcome::new(generate_id(), label.to_owned(), weight, color.to_owned())
            })
            .collect();

        Self {
            rotation: 0.0,
            settings: Settings::default(),
            outcomes,
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.outcomes.iter().map(Outcome::weight).sum()
    }

    pub fn find(&self, id: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.id() == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.outcomes.iter().map(Outcome::id).collect()
    }

    pub fn file_path(base: &Path) -> PathBuf {
        base.join(WHEEL_FILE)
    }

    pub fn write_file(&self, base: &Path) -> Result<()> {
        let content = toml::to_string(self).context("Failed to serialize wheel")?;
        atomic_write(&Self::file_path(base), content.as_bytes())
    }
}
