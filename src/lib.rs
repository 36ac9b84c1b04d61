#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod animation;
pub mod cli;
pub mod commands;
pub mod guard;
pub mod helpers;
pub mod id;
pub mod models;
pub mod output;
pub mod selector;
pub mod store;

use anyhow::{Context, Result, anyhow};
use console::Term;
use std::path::PathBuf;

use cli::{Cli, Commands, HistoryCommands, OutcomeCommands};
use commands::config::SettingsUpdate;
use output::Output;
use store::Store;

pub const FORTUNA_DIR: &str = ".fortuna";

/// Finds the `.fortuna/` directory by walking up from the current directory.
/// Returns `None` if no `.fortuna/` directory is found.
pub fn find_fortuna_dir() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    let mut dir = current_dir.as_path();

    loop {
        let fortuna_path = dir.join(FORTUNA_DIR);
        if fortuna_path.is_dir() {
            return Some(fortuna_path);
        }

        dir = dir.parent()?;
    }
}

fn ensure_initialized() -> Result<Store> {
    let fortuna_dir = find_fortuna_dir()
        .ok_or_else(|| anyhow!("Fortuna not initialized. Run 'fw init' first."))?;

    Store::open(&fortuna_dir).context("Failed to open wheel")
}

fn run_outcome(outcome_cmd: OutcomeCommands, store: &mut Store) -> Result<()> {
    match outcome_cmd {
        OutcomeCommands::Add {
            label,
            weight,
            color,
            json,
        } => {
            let outcome = commands::outcome::add(label, weight, color, store)?;
            Output::new(json).outcome_added(&outcome, store.wheel().total_weight())
        }
        OutcomeCommands::Edit {
            outcome_id,
            label,
            weight,
            color,
            json,
        } => {
            let outcome = commands::outcome::edit(&outcome_id, label, weight, color, store)?;
            Output::new(json).outcome_updated(&outcome, store.wheel().total_weight())
        }
        OutcomeCommands::Remove { outcome_id } => {
            let outcome = commands::outcome::remove(&outcome_id, store)?;
            Output::new(false).outcome_removed(&outcome, store.wheel().total_weight())
        }
        OutcomeCommands::List { json } => {
            let listing = commands::outcome::list(store);
            Output::new(json).outcome_list(&listing)
        }
    }
}

fn run_history(history_cmd: HistoryCommands, store: &mut Store) -> Result<()> {
    match history_cmd {
        HistoryCommands::List { json } => {
            let entries = commands::history::list(store);
            Output::new(json).history_list(&entries)
        }
        HistoryCommands::Clear { yes } => {
            let removed = commands::history::clear(yes, store)?;
            Output::new(false).history_cleared(removed)
        }
    }
}

fn run_spin(name: &str, animate: bool, json: bool, store: &mut Store) -> Result<()> {
    let term = Term::stdout();
    let animate = animate && !json && term.is_term();
    let mut rng = rand::thread_rng();

    let result = commands::spin::run(name, store, &mut rng, |outcomes, from, to, duration| {
        if animate {
            animation::play(&term, outcomes, from, to, duration)
        } else {
            Ok(())
        }
    })?;

    Output::new(json).spin_result(&result)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Outcome(outcome_cmd) => {
            let mut store = ensure_initialized()?;
            run_outcome(outcome_cmd, &mut store)
        }
        Commands::Spin {
            name,
            no_animate,
            json,
        } => {
            let mut store = ensure_initialized()?;
            run_spin(&name, !no_animate, json, &mut store)
        }
        Commands::History(history_cmd) => {
            let mut store = ensure_initialized()?;
            run_history(history_cmd, &mut store)
        }
        Commands::Config {
            duration,
            revolutions,
            margin,
            json,
        } => {
            let mut store = ensure_initialized()?;
            let update = SettingsUpdate {
                duration,
                revolutions,
                margin,
            };
            let changed = !update.is_empty();
            let settings = commands::config::run(update, &mut store)?;
            Output::new(json).settings(&settings, changed)
        }
        Commands::Status { json } => {
            let store = ensure_initialized()?;
            let report = commands::status::run(&store)?;
            Output::new(json).status(&report)
        }
    }
}
