//! TextTale server binary.
//!
//! - `serve` (default) runs the HTTP API and removes generated audio on exit
//! - `purge` deletes every audio file in the artifact directory
//! - `options` prints the published option sets

use clap::Parser;
use texttale_server::TextTaleConfig;

mod cli;
mod observability;

use observability::{ObservabilityConfig, init_observability, shutdown_observability};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, print_options, purge_audio, run_server};

    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = TextTaleConfig::load(cli.config.as_deref())?;

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.log().level().clone()
    };
    init_observability(
        ObservabilityConfig::new("texttale")
            .with_log_level(log_level)
            .with_json_logs(*config.log().json()),
    )?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(&config).await?,
        Commands::Purge { yes } => purge_audio(&config, yes)?,
        Commands::Options => print_options()?,
    }

    shutdown_observability();
    Ok(())
}
