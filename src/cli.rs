use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fw")]
#[command(about = "Weighted fortune wheel with a spin history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a wheel in the current directory
    Init,

    /// Manage the wheel's outcomes
    #[command(subcommand)]
    Outcome(OutcomeCommands),

    /// Spin the wheel for a participant
    Spin {
        /// Participant name recorded with the result
        name: String,

        /// Skip the terminal animation
        #[arg(long)]
        no_animate: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or clear the spin history
    #[command(subcommand)]
    History(HistoryCommands),

    /// Show or change wheel settings
    Config {
        /// Spin animation length in seconds (minimum 1)
        #[arg(long)]
        duration: Option<u64>,

        /// Full turns added to every spin (minimum 1)
        #[arg(long)]
        revolutions: Option<u32>,

        /// Degrees kept clear of sector edges when landing
        #[arg(long)]
        margin: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show whether the wheel is idle and what sits under the pointer
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum OutcomeCommands {
    /// Add an outcome to the end of the wheel
    Add {
        /// Text shown on the sector
        label: String,

        /// Share of the wheel, in percent
        #[arg(long)]
        weight: Option<f64>,

        /// Sector color as #rrggbb (random neon color if omitted)
        #[arg(long)]
        color: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change an outcome's label, weight or color
    Edit {
        /// The outcome ID to edit
        outcome_id: String,

        #[arg(long)]
        label: Option<String>,

        #[arg(long)]
        weight: Option<f64>,

        #[arg(long)]
        color: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove an outcome
    Remove {
        /// The outcome ID to remove
        outcome_id: String,
    },

    /// List outcomes and check that weights sum to 100
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List past spins, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete the whole history
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}
