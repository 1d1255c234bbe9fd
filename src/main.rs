use clap::Parser;
use colored::*;
use sitelog::cli::{commands, Cli, Commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Initialize logging with SITELOG_LOG environment variable support
    let log_level = match cli.verbose {
        0 => std::env::var("SITELOG_LOG").unwrap_or_else(|_| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<sitelog::SiteLogError>() {
            Some(sitelog::SiteLogError::Config(_)) => 2,
            Some(sitelog::SiteLogError::Io(_)) => 3,
            Some(sitelog::SiteLogError::InvalidInput(_)) => 4,
            Some(sitelog::SiteLogError::Database(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Config(args) => commands::config::run(args, config),
        command => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(dispatch(command, config))
        }
    }
}

async fn dispatch(command: Commands, config: Option<&std::path::Path>) -> anyhow::Result<()> {
    match command {
        Commands::Units(args) => commands::units::run(args, config).await,
        Commands::Task(args) => commands::task::run(args, config).await,
        Commands::Photo(args) => commands::photo::run(args, config).await,
        Commands::Report(args) => commands::report::run(args, config).await,
        Commands::Export(args) => commands::export::run(args, config).await,
        Commands::Share(args) => commands::share::run(args, config).await,
        Commands::Config(args) => commands::config::run(args, config),
    }
}
