use anyhow::Result;
use console::{Term, style};
use serde::Serialize;

use crate::commands::outcome::{OutcomeList, WeightStatus};
use crate::commands::spin::SpinResult;
use crate::commands::status::StatusReport;
use crate::models::{HistoryEntry, Outcome, Settings};
use crate::selector::{DRAW_DOMAIN, WEIGHT_EPSILON};

pub struct Output {
    term: Term,
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self {
            term: Term::stdout(),
            json,
        }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let output = serde_json::to_string_pretty(value)?;
        self.term.write_line(&output)?;
        Ok(())
    }

    fn print_outcome(&self, outcome: &Outcome) -> Result<()> {
        self.term.write_line(&format!(
            "{} {:>6}%  {}  {}",
            style(outcome.id()).cyan().bold(),
            outcome.weight(),
            style(outcome.color()).dim(),
            outcome.label()
        ))?;
        Ok(())
    }

    fn print_total(&self, total: f64) -> Result<()> {
        if (total - DRAW_DOMAIN).abs() <= WEIGHT_EPSILON {
            self.term
                .write_line(&format!("  Total: {}", style(format!("{total}%")).green()))?;
        } else {
            self.term.write_line(&format!(
                "  Total: {} {}",
                style(format!("{total}%")).red(),
                style("(must be exactly 100% to spin)").dim()
            ))?;
        }
        Ok(())
    }

    pub fn outcome_added(&self, outcome: &Outcome, total: f64) -> Result<()> {
        if self.json {
            return self.print_json(outcome);
        }

        self.term.write_line(&format!(
            "{} {}",
            style("Added outcome:").green(),
            style(outcome.id()).cyan().bold()
        ))?;
        self.term.write_line(&format!("  Label: {}", outcome.label()))?;
        self.term
            .write_line(&format!("  Weight: {}%", outcome.weight()))?;
        self.term.write_line(&format!("  Color: {}", outcome.color()))?;
        self.print_total(total)
    }

    pub fn outcome_updated(&self, outcome: &Outcome, total: f64) -> Result<()> {
        if self.json {
            return self.print_json(outcome);
        }

        self.term.write_line(&format!(
            "{} {}",
            style("Updated outcome:").green(),
            style(outcome.id()).cyan().bold()
        ))?;
        self.term.write_line(&format!("  Label: {}", outcome.label()))?;
        self.term
            .write_line(&format!("  Weight: {}%", outcome.weight()))?;
        self.term.write_line(&format!("  Color: {}", outcome.color()))?;
        self.print_total(total)
    }

    pub fn outcome_removed(&self, outcome: &Outcome, total: f64) -> Result<()> {
        self.term.write_line(&format!(
            "{} {} ({})",
            style("Removed outcome:").yellow(),
            style(outcome.id()).cyan().bold(),
            outcome.label()
        ))?;
        self.print_total(total)
    }

    pub fn outcome_list(&self, listing: &OutcomeList) -> Result<()> {
        if self.json {
            return self.print_json(listing);
        }

        if listing.outcomes().is_empty() {
            self.term.write_line("No outcomes found.")?;
        }

        for outcome in listing.outcomes() {
            self.print_outcome(outcome)?;
        }

        self.term.write_line("")?;
        self.print_total(listing.total_weight())?;
        let status = listing.status();
        let label = match status {
            WeightStatus::Ok => style(status.as_ref()).green(),
            WeightStatus::Invalid => style(status.as_ref()).red(),
        };
        self.term.write_line(&format!("  Status: [{label}]"))?;
        if let Some(problem) = listing.problem() {
            self.term.write_line(&format!("  {}", style(problem).dim()))?;
        }
        Ok(())
    }

    pub fn spin_result(&self, result: &SpinResult) -> Result<()> {
        if self.json {
            return self.print_json(result);
        }

        self.term.write_line(&format!(
            "{} {}",
            style("Winner:").green().bold(),
            style(result.winner.label()).cyan().bold()
        ))?;
        self.term.write_line(&format!("  Player: {}", result.name))?;
        self.term
            .write_line(&format!("  Outcome: {}", result.winner.id()))?;
        self.term.write_line(&format!(
            "  Rotation: {:.2} -> {:.2}",
            result.from_rotation, result.target_rotation
        ))?;
        if !result.recorded {
            self.term.write_line(&format!(
                "  {}",
                style("(history could not be saved)").yellow()
            ))?;
        }
        Ok(())
    }

    pub fn history_list(&self, entries: &[HistoryEntry]) -> Result<()> {
        if self.json {
            return self.print_json(entries);
        }

        if entries.is_empty() {
            self.term
                .write_line("No spins yet. Time to spin the wheel!")?;
            return Ok(());
        }

        for entry in entries {
            self.term.write_line(&format!(
                "{}  {} won {}",
                style(entry.timestamp()).dim(),
                style(entry.name()).bold(),
                style(entry.label()).cyan()
            ))?;
        }
        Ok(())
    }

    pub fn history_cleared(&self, removed: usize) -> Result<()> {
        self.term.write_line(&format!(
            "{} {removed} entries",
            style("Cleared history:").yellow()
        ))?;
        Ok(())
    }

    pub fn settings(&self, settings: &Settings, changed: bool) -> Result<()> {
        if self.json {
            return self.print_json(settings);
        }

        if changed {
            self.term
                .write_line(&style("Updated settings").green().to_string())?;
        }
        self.term.write_line(&format!(
            "  Spin duration: {}s",
            settings.spin_duration_secs
        ))?;
        self.term.write_line(&format!(
            "  Extra revolutions: {}",
            settings.extra_revolutions
        ))?;
        self.term
            .write_line(&format!("  Edge margin: {}°", settings.edge_margin_deg))?;
        Ok(())
    }

    pub fn status(&self, report: &StatusReport) -> Result<()> {
        if self.json {
            return self.print_json(report);
        }

        self.term.write_line(&format!(
            "Wheel: [{}]",
            style(report.state.as_ref()).yellow()
        ))?;
        self.term
            .write_line(&format!("  Rotation: {:.2}", report.rotation))?;
        if let Some(outcome) = &report.under_pointer {
            self.term.write_line(&format!(
                "  Under pointer: {} ({:.2}°)",
                style(outcome.label()).cyan(),
                report.pointer_angle
            ))?;
        }
        self.term.write_line(&format!(
            "  Ready to spin: {}",
            if report.ready { "yes" } else { "no" }
        ))?;
        self.term
            .write_line(&format!("  Spins recorded: {}", report.spins))?;
        Ok(())
    }
}
