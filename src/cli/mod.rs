pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sitelog",
    version,
    about = "Daily site report log: tasks and photos per unit, grouped by contractor",
    long_about = "sitelog keeps today's field log for a construction site. Tasks and photos are \
                  recorded per unit, grouped under the contractor responsible for that unit, and \
                  rendered as a per-contractor daily report. Data from earlier days is discarded \
                  automatically."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to $SITELOG_HOME/config.toml)
    #[arg(long, env = "SITELOG_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List site units and their contractors
    Units(commands::units::UnitsArgs),

    /// Add, compose or remove tasks for a unit
    Task(commands::task::TaskArgs),

    /// Attach or remove photos for a unit
    Photo(commands::photo::PhotoArgs),

    /// Show today's report for one or all contractors
    Report(commands::report::ReportArgs),

    /// Write report photos to a directory
    Export(commands::export::ExportArgs),

    /// Print a share payload or a text-only share link
    Share(commands::share::ShareArgs),

    /// Manage the configuration file
    Config(commands::config::ConfigArgs),
}
