use crate::cli::output::*;
use crate::core::config::{default_config, save_config};
use crate::core::paths::describe_paths;
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration and paths
    Show,
}

pub fn run(args: ConfigArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let path = super::config_path(config);

    match args.command {
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                warning(&format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
                return Ok(());
            }
            save_config(&path, &default_config())?;
            success(&format!("Wrote default configuration to {}", path.display()));
        }
        ConfigCommands::Show => {
            let effective = super::load_config(config)?;
            section_header("Paths");
            println!("{}", describe_paths());
            tree_item(false, "Config in use", Some(&path.display().to_string()));
            tree_item(
                true,
                "Database in use",
                Some(&effective.database_path().display().to_string()),
            );
            section_header("Configuration");
            println!(
                "{}",
                toml::to_string_pretty(&effective)
                    .map_err(|e| crate::SiteLogError::Config(e.to_string()))?
            );
        }
    }
    Ok(())
}
