use anyhow::Result;
use serde::Serialize;

use crate::guard::{self, WheelState};
use crate::models::Outcome;
use crate::selector::{self, angle_under_pointer, outcome_at_angle};
use crate::store::Store;

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub state: WheelState,
    pub rotation: f64,
    pub pointer_angle: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub under_pointer: Option<Outcome>,
    pub ready: bool,
    pub spins: usize,
}

pub fn run(store: &Store) -> Result<StatusReport> {
    let wheel = store.wheel();
    let pointer_angle = angle_under_pointer(wheel.rotation);
    let state = guard::state(store.base_path())?;

    Ok(StatusReport {
        state,
        rotation: wheel.rotation,
        pointer_angle,
        under_pointer: outcome_at_angle(&wheel.outcomes, pointer_angle)
            .map(|i| wheel.outcomes[i].clone()),
        ready: state == WheelState::Idle && selector::validate(&wheel.outcomes).is_ok(),
        spins: store.history().len(),
    })
}
