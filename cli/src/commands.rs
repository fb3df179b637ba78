use anyhow::{Context, Result};
use chainpeek_config::Config;
use chainpeek_core::{BlockFetch, BlockId, ChainClient, HttpBlockSource};
use serde_json::Value;
use std::path::Path;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Fetch one block by height or hash
    Block { id: String },

    /// Fetch blocks from START toward END (exclusive), one at a time
    #[command(allow_negative_numbers = true)]
    Range {
        start: i64,
        end: i64,
        /// Height increment; counting down with a positive step uses -1
        #[arg(long, default_value_t = 1)]
        step: i64,
    },

    /// Sync progress of a chain started at START whose tip time is TIP (Unix seconds)
    Progress { start: i64, tip: i64 },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
pub enum ConfigCommands {
    View,
    Set { key: String, value: String },
    Init,
}

pub fn connect(cfg: &Config) -> Result<ChainClient<HttpBlockSource>> {
    ChainClient::connect(&cfg.api_url, cfg.api_key.as_deref())
        .with_context(|| format!("Cannot use api url {}", cfg.api_url))
}

pub async fn get_block(client: &ChainClient<HttpBlockSource>, id: &str) -> Result<()> {
    match client.get_block(BlockId::from(id)).await? {
        BlockFetch::Found(block) => {
            println!("{}", serde_json::to_string_pretty(block.as_json())?);
        }
        BlockFetch::Failed(e) => println!("❌ Block {} not retrieved: {}", id, e),
    }
    Ok(())
}

pub async fn get_range(
    client: &ChainClient<HttpBlockSource>,
    start: i64,
    end: i64,
    step: i64,
) -> Result<()> {
    let blocks = client.get_blocks_in_range(start, end, Some(step)).await?;
    println!("{}", serde_json::to_string_pretty(&range_to_json(blocks))?);
    Ok(())
}

/// Failed entries become `null` so positions still line up with heights.
fn range_to_json(blocks: Vec<BlockFetch>) -> Value {
    Value::Array(
        blocks
            .into_iter()
            .map(|fetch| fetch.into_block().map_or(Value::Null, |b| b.into_json()))
            .collect(),
    )
}

pub fn show_progress(client: &ChainClient<HttpBlockSource>, start: i64, tip: i64) {
    let ratio = client.calc_progress(start, tip);
    if ratio.is_finite() {
        println!("📈 Progress: {:.2}%", ratio * 100.0);
    } else {
        println!("📈 Progress: undefined ({})", ratio);
    }
}

pub fn run_config(path: &Path, subcommand: ConfigCommands) -> Result<()> {
    match subcommand {
        ConfigCommands::View => {
            let cfg = Config::load_from(path)?;
            println!("{}", cfg.to_pretty_json()?);
        }
        ConfigCommands::Set { key, value } => {
            let mut cfg = Config::load_from(path)?;
            cfg.set_value(&key, &value)?;
            cfg.save_to(path)?;
            println!("✅ {} set successfully.", key);
        }
        ConfigCommands::Init => {
            Config::default().save_to(path)?;
            println!("Default configuration file has been created: {:?}", path);
        }
    }
    Ok(())
}
