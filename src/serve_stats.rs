use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for entities handed out by the explorer facade.
#[derive(Debug)]
pub struct ServeStats {
    blocks: AtomicU64,
    transactions: AtomicU64,
    stats_requests: AtomicU64,
    address_lookups: AtomicU64,
}

impl Default for ServeStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ServeStats {
    pub const fn new() -> Self {
        Self {
            blocks: AtomicU64::new(0),
            transactions: AtomicU64::new(0),
            stats_requests: AtomicU64::new(0),
            address_lookups: AtomicU64::new(0),
        }
    }

    pub fn inc_blocks(&self, n: u64) {
        self.blocks.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_transactions(&self, n: u64) {
        self.transactions.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_stats_requests(&self, n: u64) {
        self.stats_requests.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_address_lookups(&self, n: u64) {
        self.address_lookups.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ServeSnapshot {
        ServeSnapshot {
            blocks: self.blocks.load(Ordering::Relaxed),
            transactions: self.transactions.load(Ordering::Relaxed),
            stats_requests: self.stats_requests.load(Ordering::Relaxed),
            address_lookups: self.address_lookups.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ServeSnapshot {
    pub blocks: u64,
    pub transactions: u64,
    pub stats_requests: u64,
    pub address_lookups: u64,
}

pub static SERVE_STATS: ServeStats = ServeStats::new();
