use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Outcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    id: String,
    label: String,
    color: String,
    name: String,
    timestamp: Timestamp,
}

impl HistoryEntry {
    pub fn new(id: String, label: String, color: String, name: String, timestamp: Timestamp) -> Self {
        Self {
            id,
            label,
            color,
            name,
            timestamp,
        }
    }

    /// Record a settled spin won by `winner`.
    pub fn for_winner(id: String, winner: &Outcome, name: &str, timestamp: Timestamp) -> Self {
        Self::new(
            id,
            winner.label().to_owned(),
            winner.color().to_owned(),
            name.trim().to_owned(),
            timestamp,
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}
