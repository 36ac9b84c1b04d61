use serde::{Deserialize, Serialize};

/// One weighted sector of the wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    id: String,
    label: String,
    weight: f64,
    color: String,
}

impl Outcome {
    pub fn new(id: String, label: String, weight: f64, color: String) -> Self {
        Self {
            id,
            label,
            weight,
            color,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn set_color(&mut self, color: String) {
        self.color = color;
    }
}
