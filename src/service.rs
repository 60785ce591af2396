use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::chains::{self, PAGED_BASE_HEIGHT};
use crate::config::Config;
use crate::gen;
use crate::models::{AddressInfo, Block, ChainStats, Transaction};
use crate::serve_stats::SERVE_STATS;

pub const DEFAULT_HISTORY_LEN: usize = 10;

/// Artificial per-endpoint delay emulating a network round trip, so UI
/// loading states can be exercised against this stub.
#[derive(Debug, Clone)]
pub struct Latency {
    pub blocks: Duration,
    pub transaction: Duration,
    pub stats: Duration,
    pub address_info: Duration,
    pub address_history: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            blocks: Duration::from_millis(500),
            transaction: Duration::from_millis(700),
            stats: Duration::from_millis(600),
            address_info: Duration::from_millis(600),
            address_history: Duration::from_millis(800),
        }
    }
}

impl Latency {
    pub fn uniform(ms: u64) -> Self {
        let d = Duration::from_millis(ms);
        Self {
            blocks: d,
            transaction: d,
            stats: d,
            address_info: d,
            address_history: d,
        }
    }
}

/// Stateless lookup facade over the generator. Every call produces a fresh,
/// unrelated random snapshot; there is no consistency between calls.
#[derive(Debug, Clone)]
pub struct Explorer {
    latency: Latency,
    seed: Option<u64>,
}

impl Explorer {
    pub fn new(latency: Latency, seed: Option<u64>) -> Self {
        Self { latency, seed }
    }

    pub fn from_config(config: &Config) -> Self {
        let latency = match config.sim_latency_ms {
            Some(ms) => Latency::uniform(ms),
            None => Latency::default(),
        };
        Self::new(latency, config.rng_seed)
    }

    /// Zero-latency explorer for tests.
    pub fn no_latency() -> Self {
        Self::new(Latency::uniform(0), None)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Page of blocks in descending number order. A numeric query bypasses
    /// pagination and returns exactly the block with that number.
    pub async fn list_blocks(
        &self,
        page: u64,
        page_size: u64,
        query: Option<&str>,
    ) -> Vec<Block> {
        tokio::time::sleep(self.latency.blocks).await;

        let mut rng = self.rng();
        let profile = chains::profile(chains::DEFAULT_CHAIN);
        let now = now_ms();

        if let Some(number) = query.and_then(|q| q.trim().parse::<u64>().ok()) {
            SERVE_STATS.inc_blocks(1);
            return vec![gen::generate_block(&mut rng, number, profile, now)];
        }

        let page = page.max(1);
        let page_size = page_size.max(1);
        let start = PAGED_BASE_HEIGHT.saturating_sub((page - 1).saturating_mul(page_size));

        let blocks: Vec<Block> = (0..page_size)
            .map_while(|i| start.checked_sub(i))
            .map(|number| gen::generate_block(&mut rng, number, profile, now))
            .collect();
        SERVE_STATS.inc_blocks(blocks.len() as u64);
        blocks
    }

    /// Most recent blocks for a chain, descending from its baseline height.
    pub async fn latest_blocks(&self, chain: &str, count: u64) -> Vec<Block> {
        tokio::time::sleep(self.latency.blocks).await;

        let mut rng = self.rng();
        let profile = chains::profile(chain);
        let now = now_ms();

        let blocks: Vec<Block> = (0..count)
            .map_while(|i| profile.base_height.checked_sub(i))
            .map(|number| gen::generate_block(&mut rng, number, profile, now))
            .collect();
        SERVE_STATS.inc_blocks(blocks.len() as u64);
        blocks
    }

    /// Latest transactions stamped with the chain's canonical id (unknown
    /// identifiers resolve to the default chain, as everywhere else).
    pub async fn latest_transactions(&self, chain: &str, count: u64) -> Vec<Transaction> {
        tokio::time::sleep(self.latency.transaction).await;

        let mut rng = self.rng();
        let profile = chains::profile(chain);
        let now = now_ms();
        let txs: Vec<Transaction> = (0..count)
            .map(|_| {
                gen::generate_transaction(
                    &mut rng,
                    now,
                    gen::STANDALONE_SPREAD_MS,
                    None,
                    profile.id,
                )
            })
            .collect();
        SERVE_STATS.inc_transactions(txs.len() as u64);
        txs
    }

    /// Always synthesizes a transaction carrying the requested hash; there
    /// is no ledger to validate against, so lookups never miss.
    pub async fn transaction_by_hash(&self, hash: &str) -> Transaction {
        tokio::time::sleep(self.latency.transaction).await;

        let mut rng = self.rng();
        let mut tx = gen::generate_transaction(
            &mut rng,
            now_ms(),
            gen::STANDALONE_SPREAD_MS,
            None,
            chains::DEFAULT_CHAIN,
        );
        tx.hash = hash.to_string();
        SERVE_STATS.inc_transactions(1);
        tx
    }

    pub async fn stats(&self, chain: &str) -> ChainStats {
        tokio::time::sleep(self.latency.stats).await;

        let mut rng = self.rng();
        SERVE_STATS.inc_stats_requests(1);
        gen::generate_stats(&mut rng, chains::profile(chain))
    }

    pub async fn address_info(&self, address: &str) -> AddressInfo {
        tokio::time::sleep(self.latency.address_info).await;

        let mut rng = self.rng();
        SERVE_STATS.inc_address_lookups(1);
        gen::generate_address_info(&mut rng, address, now_ms())
    }

    /// Recent transactions touching `address`, most recent first.
    pub async fn address_history(&self, address: &str, count: usize) -> Vec<Transaction> {
        tokio::time::sleep(self.latency.address_history).await;

        let mut rng = self.rng();
        let txs = gen::generate_address_history(&mut rng, address, count, now_ms());
        SERVE_STATS.inc_transactions(txs.len() as u64);
        txs
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Handle for a running stats poller. Dropping the receiver also stops the
/// poller on its next tick; `stop` shuts it down eagerly and waits for the
/// task to finish, guaranteeing no delivery after it returns.
pub struct PollHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Repeatedly fetches chain stats at a fixed interval, delivering each
/// snapshot over the returned channel. Replaces ad-hoc interval timers with
/// an explicit start/stop subscription.
pub fn spawn_stats_poller(
    explorer: Arc<Explorer>,
    chain: String,
    interval: Duration,
) -> (PollHandle, mpsc::Receiver<ChainStats>) {
    let (out, rx) = mpsc::channel(16);
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => break,
                _ = ticker.tick() => {
                    let stats = explorer.stats(&chain).await;
                    if out.send(stats).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    (PollHandle { shutdown, task }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn numeric_query_returns_single_exact_block() {
        let explorer = Explorer::no_latency();
        let blocks = explorer.list_blocks(1, 10, Some("12345")).await;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].number, 12_345);
    }

    #[tokio::test]
    async fn pages_descend_from_base_height() {
        let explorer = Explorer::no_latency();
        let page1 = explorer.list_blocks(1, 10, None).await;
        assert_eq!(page1.len(), 10);
        assert_eq!(page1[0].number, PAGED_BASE_HEIGHT);
        for pair in page1.windows(2) {
            assert_eq!(pair[0].number, pair[1].number + 1);
            assert!(pair[0].timestamp > pair[1].timestamp);
        }

        let page2 = explorer.list_blocks(2, 10, None).await;
        assert_eq!(page2[0].number, PAGED_BASE_HEIGHT - 10);
    }

    #[tokio::test]
    async fn huge_numeric_query_does_not_overflow() {
        let explorer = Explorer::no_latency();
        let blocks = explorer
            .list_blocks(1, 10, Some("1000000000000000000"))
            .await;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].number, 1_000_000_000_000_000_000);
        assert_eq!(blocks[0].timestamp, i64::MAX);

        let blocks = explorer
            .list_blocks(1, 10, Some(&u64::MAX.to_string()))
            .await;
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].number, u64::MAX);
    }

    #[tokio::test]
    async fn latest_transactions_are_stamped_with_chain() {
        let explorer = Explorer::no_latency();
        let txs = explorer.latest_transactions("polygon", 3).await;
        assert_eq!(txs.len(), 3);
        assert!(txs.iter().all(|tx| tx.chain == "polygon"));

        // Unknown identifiers resolve to the default chain.
        let txs = explorer.latest_transactions("no-such-chain", 2).await;
        assert!(txs.iter().all(|tx| tx.chain == "ethereum"));
    }

    #[tokio::test]
    async fn non_numeric_query_falls_through_to_pagination() {
        let explorer = Explorer::no_latency();
        let blocks = explorer.list_blocks(1, 5, Some("0xdeadbeef")).await;
        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[0].number, PAGED_BASE_HEIGHT);
    }

    #[tokio::test]
    async fn latest_blocks_use_chain_baseline() {
        let explorer = Explorer::no_latency();
        let blocks = explorer.latest_blocks("bitcoin", 3).await;
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].number, 800_000);
        assert_eq!(blocks[0].chain, "bitcoin");
        assert_eq!(blocks[0].timestamp - blocks[1].timestamp, 600_000);
    }

    #[tokio::test]
    async fn transaction_lookup_echoes_requested_hash() {
        let explorer = Explorer::no_latency();
        let tx = explorer.transaction_by_hash("0xfeedface").await;
        assert_eq!(tx.hash, "0xfeedface");
    }

    #[tokio::test]
    async fn address_history_defaults_are_ordered() {
        let explorer = Explorer::no_latency();
        let history = explorer
            .address_history("0xabc0000000000000000000000000000000000abc", DEFAULT_HISTORY_LEN)
            .await;
        assert_eq!(history.len(), DEFAULT_HISTORY_LEN);
        for pair in history.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn seeded_explorer_is_reproducible() {
        let explorer = Explorer::new(Latency::uniform(0), Some(99));
        let a = explorer.stats("ethereum").await;
        let b = explorer.stats("ethereum").await;
        assert_eq!(a.block_height, b.block_height);
        assert_eq!(a.gas_price_gwei, b.gas_price_gwei);
    }

    #[tokio::test]
    async fn poller_delivers_then_stops_cleanly() {
        let explorer = Arc::new(Explorer::no_latency());
        let (handle, mut rx) =
            spawn_stats_poller(explorer, "ethereum".to_string(), Duration::from_millis(5));

        let first = rx.recv().await.expect("poller should deliver stats");
        assert_eq!(first.chain, "ethereum");

        handle.stop().await;

        // Drain anything buffered before the stop; the channel must then be
        // closed with nothing further arriving.
        while let Ok(extra) = rx.try_recv() {
            assert_eq!(extra.chain, "ethereum");
        }
        assert!(rx.recv().await.is_none());
    }
}
