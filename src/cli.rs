use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "rust-chain-explorer-lab",
    version,
    about = "Synthetic blockchain-explorer data generator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the latest N blocks for a chain
    LatestBlocks {
        #[arg(long)]
        chain: Option<String>,
        #[arg(long, default_value_t = 10)]
        count: u64,
    },
    /// Print the latest N transactions for a chain
    LatestTxs {
        #[arg(long)]
        chain: Option<String>,
        #[arg(long, default_value_t = 10)]
        count: u64,
    },
    /// Print chain statistics
    Stats {
        #[arg(long)]
        chain: Option<String>,
    },
    /// Print address info and recent history
    Address {
        addr: String,
        #[arg(long, default_value_t = 10)]
        history: usize,
    },
    /// Look up a transaction by hash
    Tx { hash: String },
    /// Poll chain stats at a fixed interval for a number of ticks
    Watch {
        #[arg(long)]
        chain: Option<String>,
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,
        #[arg(long, default_value_t = 5)]
        ticks: u64,
    },
    /// Run the HTTP API server
    Serve {
        /// Override bind address, e.g. 0.0.0.0:8080
        #[arg(long)]
        addr: Option<String>,
    },
}
