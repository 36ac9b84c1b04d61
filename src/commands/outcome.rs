use anyhow::{Result, bail};
use serde::Serialize;
use strum::AsRefStr;

use crate::helpers::{check_label, check_weight, normalize_color, outcome_not_found, random_color};
use crate::id::generate_id;
use crate::models::Outcome;
use crate::selector;
use crate::store::Store;

/// Whether the current weights allow a spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WeightStatus {
    Ok,
    Invalid,
}

#[derive(Debug, Serialize)]
pub struct OutcomeList {
    outcomes: Vec<Outcome>,
    total_weight: f64,
    status: WeightStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    problem: Option<String>,
}

impl OutcomeList {
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn status(&self) -> WeightStatus {
        self.status
    }

    pub fn problem(&self) -> Option<&str> {
        self.problem.as_deref()
    }
}

pub fn add(
    label: String,
    weight: Option<f64>,
    color: Option<String>,
    store: &mut Store,
) -> Result<Outcome> {
    let color = match color {
        Some(c) => normalize_color(&c)?,
        None => random_color(),
    };

    let outcome = Outcome::new(
        generate_id(),
        check_label(&label)?,
        check_weight(weight.unwrap_or(0.0))?,
        color,
    );

    store.wheel_mut().outcomes.push(outcome.clone());
    store.save_wheel()?;
    Ok(outcome)
}

pub fn edit(
    id: &str,
    label: Option<String>,
    weight: Option<f64>,
    color: Option<String>,
    store: &mut Store,
) -> Result<Outcome> {
    if label.is_none() && weight.is_none() && color.is_none() {
        bail!("Nothing to change. Pass --label, --weight or --color.");
    }

    let label = label.as_deref().map(check_label).transpose()?;
    let weight = weight.map(check_weight).transpose()?;
    let color = color.as_deref().map(normalize_color).transpose()?;

    let wheel = store.wheel_mut();
    let Some(index) = wheel.outcomes.iter().position(|o| o.id() == id) else {
        return Err(outcome_not_found(id, &wheel.ids()));
    };

    let outcome = &mut wheel.outcomes[index];
    if let Some(label) = label {
        outcome.set_label(label);
    }
    if let Some(weight) = weight {
        outcome.set_weight(weight);
    }
    if let Some(color) = color {
        outcome.set_color(color);
    }
    let updated = outcome.clone();

    store.save_wheel()?;
    Ok(updated)
}

pub fn remove(id: &str, store: &mut Store) -> Result<Outcome> {
    let wheel = store.wheel_mut();
    let Some(index) = wheel.outcomes.iter().position(|o| o.id() == id) else {
        return Err(outcome_not_found(id, &wheel.ids()));
    };

    let removed = wheel.outcomes.remove(index);
    store.save_wheel()?;
    Ok(removed)
}

pub fn list(store: &Store) -> OutcomeList {
    let wheel = store.wheel();
    let problem = selector::validate(&wheel.outcomes)
        .err()
        .map(|e| e.to_string());

    OutcomeList {
        outcomes: wheel.outcomes.clone(),
        total_weight: wheel.total_weight(),
        status: if problem.is_none() {
            WeightStatus::Ok
        } else {
            WeightStatus::Invalid
        },
        problem,
    }
}
