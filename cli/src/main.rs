mod commands;

use anyhow::Result;
use clap::Parser;
use commands::*;

use chainpeek_config::Config;

#[derive(Parser)]
#[command(name = "chainpeek")]
#[command(about = "Query blocks from a ledger indexing API", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.chainpeek/config.json)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Override the configured API url
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config_path = match &cli.config {
        Some(path) => Config::expand_path(path),
        None => Config::default_path()?,
    };

    if let Commands::Config { subcommand } = cli.command {
        return run_config(&config_path, subcommand);
    }

    let mut cfg = Config::load_from(&config_path)?;
    if let Some(url) = cli.api_url {
        cfg.api_url = url;
    }
    let client = connect(&cfg)?;

    match cli.command {
        Commands::Block { id } => get_block(&client, &id).await,
        Commands::Range { start, end, step } => get_range(&client, start, end, step).await,
        Commands::Progress { start, tip } => {
            show_progress(&client, start, tip);
            Ok(())
        }
        Commands::Config { .. } => Ok(()),
    }
}
