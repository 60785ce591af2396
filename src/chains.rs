/// Baseline parameters for one chain. Stats generation perturbs these with
/// bounded noise; block timestamps are anchored at `base_height` so the
/// chain tip lands at the caller's reference time.
#[derive(Debug, Clone)]
pub struct ChainProfile {
    pub id: &'static str,
    pub base_height: u64,
    pub height_jitter: u64,
    pub block_interval_ms: i64,
    pub avg_block_time_secs: f64,
    pub avg_block_time_jitter: f64,
    pub fee_less: bool,
}

pub const DEFAULT_CHAIN: &str = "ethereum";

/// Base height used by the page-oriented block listing, which predates the
/// multi-chain profiles and is pinned to the default chain.
pub const PAGED_BASE_HEIGHT: u64 = 10_000_000;

const ETHEREUM: ChainProfile = ChainProfile {
    id: "ethereum",
    base_height: 18_500_000,
    height_jitter: 1_000,
    block_interval_ms: 15_000,
    avg_block_time_secs: 12.0,
    avg_block_time_jitter: 3.0,
    fee_less: false,
};

const BITCOIN: ChainProfile = ChainProfile {
    id: "bitcoin",
    base_height: 800_000,
    height_jitter: 1_000,
    block_interval_ms: 600_000,
    avg_block_time_secs: 600.0,
    avg_block_time_jitter: 60.0,
    fee_less: true,
};

const POLYGON: ChainProfile = ChainProfile {
    id: "polygon",
    base_height: 45_000_000,
    height_jitter: 10_000,
    block_interval_ms: 2_000,
    avg_block_time_secs: 2.0,
    avg_block_time_jitter: 1.0,
    fee_less: false,
};

const BINANCE: ChainProfile = ChainProfile {
    id: "binance",
    base_height: 30_000_000,
    height_jitter: 5_000,
    block_interval_ms: 3_000,
    avg_block_time_secs: 3.0,
    avg_block_time_jitter: 1.0,
    fee_less: false,
};

const SOLANA: ChainProfile = ChainProfile {
    id: "solana",
    base_height: 200_000_000,
    height_jitter: 1_000_000,
    block_interval_ms: 400,
    avg_block_time_secs: 0.4,
    avg_block_time_jitter: 0.1,
    fee_less: false,
};

/// Unknown identifiers fall back to the default chain.
pub fn profile(chain: &str) -> &'static ChainProfile {
    match chain {
        "bitcoin" => &BITCOIN,
        "polygon" => &POLYGON,
        "binance" => &BINANCE,
        "solana" => &SOLANA,
        _ => &ETHEREUM,
    }
}
