mod history;
mod outcome;
mod wheel;

pub use history::HistoryEntry;
pub use outcome::Outcome;
pub use wheel::{Settings, Wheel, DEFAULT_PALETTE};
