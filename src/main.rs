pub mod bet;
pub mod commands;
pub mod config;
pub mod outcome;
pub mod presenter;
pub mod rng;
pub mod roulette;
pub mod scheduler;
pub mod table;
pub mod trajectory;

#[cfg(test)]
mod mocks;

use anyhow::Result;
use clap::Parser;
use commands::start;
use config::{TableConfig, CONFIG_FILE};
use dotenv::dotenv;
use std::path::PathBuf;

/// Single-player roulette in the terminal.
#[derive(Debug, Parser)]
#[command(name = "roulette", version)]
struct Args {
    /// Table configuration file
    #[arg(long, env = "ROULETTE_CONFIG", default_value = CONFIG_FILE)]
    config: PathBuf,
    /// Replay a session from a fixed seed
    #[arg(long)]
    seed: Option<u64>,
    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env has to be in place before clap reads ROULETTE_CONFIG
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = TableConfig::load(&args.config).await?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    if args.write_config {
        config.save(&args.config).await?;
        println!("Wrote {}", args.config.display());
        return Ok(());
    }

    start(config).await
}
