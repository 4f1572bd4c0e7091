//! Curio CLI - Command-line interface for RFP clause extraction.

use clap::Parser;
use curio_cli::commands;
use curio_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> curio_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config; an explicit file must exist, the default one is created
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|_| {
            let cfg = Config::default();
            cfg.save().ok();
            cfg
        }),
    };

    if let Some(database) = cli.database {
        config.database_path = database;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter)?,
        Command::Fetch(args) => commands::execute_fetch(args, &config, &formatter).await?,
        Command::Import(args) => {
            let mut store = config.open_store()?;
            commands::execute_import(args, &config, &mut store, &formatter).await?
        }
        Command::Clauses(args) => {
            commands::execute_clauses(args, &config.open_store()?, &formatter)?
        }
        Command::Rfps => commands::execute_rfps(&config.open_store()?, &formatter)?,
    }

    Ok(())
}
