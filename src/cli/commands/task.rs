use crate::cli::output::*;
use crate::core::task_phrase::{compose, TaskCategory};
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    pub command: TaskCommands,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Append a free-text task to a unit
    Add {
        /// Unit name (e.g. "Unit3A")
        unit: String,
        /// Task description
        text: String,
    },

    /// Build a task from a guided category and append it
    Compose {
        unit: String,
        /// Category (floor, floor_lift_gf, floor_lift, excavation_targets,
        /// rebar_struct_targets, rebar_fab_targets, casting_targets,
        /// formwork_targets, demolishing_targets, lean_concrete_targets)
        category: TaskCategory,
        /// Task name used by floor and excavation categories
        #[arg(long, default_value = "")]
        name: String,
        /// Structural targets, in pick order
        #[arg(long, value_delimiter = ',')]
        targets: Vec<String>,
        /// Floors, in pick order
        #[arg(long, value_delimiter = ',')]
        floors: Vec<String>,
    },

    /// Remove a unit's task by its 1-based position
    Remove { unit: String, index: usize },

    /// Show the options offered by a category
    Options { category: TaskCategory },
}

pub async fn run(args: TaskArgs, config: Option<&Path>) -> anyhow::Result<()> {
    match args.command {
        TaskCommands::Add { unit, text } => add(config, &unit, &text).await,
        TaskCommands::Compose {
            unit,
            category,
            name,
            targets,
            floors,
        } => match compose(&name, category, &targets, &floors) {
            Some(text) => add(config, &unit, &text).await,
            None => {
                warning("Nothing selected, no task added");
                Ok(())
            }
        },
        TaskCommands::Remove { unit, index } => remove(config, &unit, index).await,
        TaskCommands::Options { category } => {
            section_header(&format!("Options for {}", category));
            let options = category.options();
            for (i, option) in options.iter().enumerate() {
                tree_item(i == options.len() - 1, option, None);
            }
            Ok(())
        }
    }
}

async fn add(config: Option<&Path>, unit: &str, text: &str) -> anyhow::Result<()> {
    let mut session = super::open_session(config).await?;
    super::ensure_known_unit(session.config(), unit)?;

    session.open_unit(unit);
    session.add_task(text).await;
    let count = session.selection().map(|s| s.tasks.len()).unwrap_or(0);
    session.save_and_close().await;

    success(&format!("{}: {} task(s)", unit, count));
    Ok(())
}

async fn remove(config: Option<&Path>, unit: &str, index: usize) -> anyhow::Result<()> {
    let mut session = super::open_session(config).await?;
    super::ensure_known_unit(session.config(), unit)?;

    session.open_unit(unit);
    let before = session.selection().map(|s| s.tasks.len()).unwrap_or(0);
    session.remove_task(super::zero_based(index)).await;
    let after = session.selection().map(|s| s.tasks.len()).unwrap_or(0);
    session.save_and_close().await;

    if after < before {
        success(&format!("Removed task {} from {}", index, unit));
    } else {
        empty(&format!("{} has no task {}", unit, index));
    }
    Ok(())
}
