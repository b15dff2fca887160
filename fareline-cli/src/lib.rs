pub mod cli;
pub mod commands;
pub mod request;

use anyhow::Context;

use cli::{Cli, Commands};
use fareline_store::app_config::Config;

/// Execute one command and return what should be printed on stdout
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = Config::load_from(&cli.config_dir).context("Failed to load config")?;
    tracing::debug!("Loaded config from {}", cli.config_dir.display());

    match &cli.command {
        Commands::Generate(args) => commands::generate_scripts(args, &config),
        Commands::Carriers => commands::list_carriers(&config),
        Commands::ReadFares { image } => commands::read_fares(image, &config),
    }
}
