use anyhow::Result;
use clap::Parser;
use tracing::debug;

use jotter_cli::{
    app::App,
    cli::{Cli, Commands},
    commands, logging,
};
use jotter_config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so the file can pick the level
    let config = ConfigLoader::load_or_default(cli.config.as_deref()).await?;

    let level = cli.effective_level(&config.logging);
    logging::init_logging(level, config.logging.format);
    debug!(?config, "Loaded configuration");

    let app = App::new(config);

    match cli.command {
        Commands::New(args) => commands::new::execute(&app, args).await,
        Commands::Form => commands::form::execute(&app).await,
    }
}
