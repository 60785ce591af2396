mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use rust_chain_explorer_lab::api::{self, AppState};
use rust_chain_explorer_lab::config::Config;
use rust_chain_explorer_lab::service::{spawn_stats_poller, Explorer};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let explorer = Arc::new(Explorer::from_config(&config));

    match cli.command {
        Commands::LatestBlocks { chain, count } => {
            let chain = chain.unwrap_or_else(|| config.default_chain.clone());
            let blocks = explorer.latest_blocks(&chain, count).await;
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        Commands::LatestTxs { chain, count } => {
            let chain = chain.unwrap_or_else(|| config.default_chain.clone());
            let txs = explorer.latest_transactions(&chain, count).await;
            println!("{}", serde_json::to_string_pretty(&txs)?);
        }
        Commands::Stats { chain } => {
            let chain = chain.unwrap_or_else(|| config.default_chain.clone());
            let stats = explorer.stats(&chain).await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Address { addr, history } => {
            let info = explorer.address_info(&addr).await;
            println!("{}", serde_json::to_string_pretty(&info)?);
            let txs = explorer.address_history(&addr, history).await;
            println!("{}", serde_json::to_string_pretty(&txs)?);
        }
        Commands::Tx { hash } => {
            let tx = explorer.transaction_by_hash(&hash).await;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        Commands::Watch {
            chain,
            interval_secs,
            ticks,
        } => {
            let chain = chain.unwrap_or_else(|| config.default_chain.clone());
            let (handle, mut rx) = spawn_stats_poller(
                explorer.clone(),
                chain.clone(),
                Duration::from_secs(interval_secs),
            );
            for _ in 0..ticks {
                match rx.recv().await {
                    Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
                    None => break,
                }
            }
            handle.stop().await;
            tracing::info!("stopped watching {}", chain);
        }
        Commands::Serve { addr } => {
            let bind = addr.unwrap_or_else(|| config.http_bind_addr.clone());
            let state = AppState {
                explorer,
                default_chain: config.default_chain.clone(),
            };
            api::run_http_server(&bind, state).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
