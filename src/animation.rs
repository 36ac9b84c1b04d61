use std::thread;
use std::time::Duration;

use anyhow::Result;
use console::{Term, style};

use crate::models::Outcome;
use crate::selector::{angle_under_pointer, outcome_at_angle};

const FRAMES_PER_SECOND: f64 = 30.0;

/// Cubic ease-out: fast start, slow settle.
pub fn ease_out(progress: f64) -> f64 {
    let remaining = 1.0 - progress.clamp(0.0, 1.0);
    1.0 - remaining * remaining * remaining
}

pub fn rotation_at(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * ease_out(progress)
}

/// Label under the pointer at a given rotation.
pub fn label_at(outcomes: &[Outcome], rotation: f64) -> Option<&str> {
    outcome_at_angle(outcomes, angle_under_pointer(rotation)).map(|i| outcomes[i].label())
}

/// Turns the wheel from `from` to `to` over `duration`, redrawing the outcome
/// under the pointer on a single terminal line.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn play(term: &Term, outcomes: &[Outcome], from: f64, to: f64, duration: Duration) -> Result<()> {
    let frames = (duration.as_secs_f64() * FRAMES_PER_SECOND).ceil().max(1.0) as u32;
    let frame_time = duration / frames;

    let _cursor = HiddenCursor::new(term)?;
    for frame in 0..=frames {
        let rotation = rotation_at(from, to, f64::from(frame) / f64::from(frames));
        let label = label_at(outcomes, rotation).unwrap_or_default();

        term.clear_line()?;
        term.write_str(&format!(
            "  {} {}",
            style("▼").magenta().bold(),
            style(label).cyan().bold()
        ))?;

        if frame < frames {
            thread::sleep(frame_time);
        }
    }
    term.clear_line()?;
    Ok(())
}

/// Keeps the cursor hidden until dropped, so an early return on a failed
/// write still gives it back.
struct HiddenCursor<'a>(&'a Term);

impl<'a> HiddenCursor<'a> {
    fn new(term: &'a Term) -> Result<Self> {
        term.hide_cursor()?;
        Ok(Self(term))
    }
}

impl Drop for HiddenCursor<'_> {
    fn drop(&mut self) {
        let _ = self.0.show_cursor();
    }
}
