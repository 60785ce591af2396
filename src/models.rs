use serde::Serialize;

/// Inclusion state of a transaction. Only included transactions carry a
/// block number; a pending transaction structurally cannot have one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TxStatus {
    Success { block_number: u64 },
    Failed { block_number: u64 },
    Pending,
}

impl TxStatus {
    pub fn block_number(&self) -> Option<u64> {
        match self {
            TxStatus::Success { block_number } | TxStatus::Failed { block_number } => {
                Some(*block_number)
            }
            TxStatus::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TxStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    pub to: String,
    /// ETH, formatted with 4 fractional digits.
    pub value_eth: String,
    /// Gwei, formatted with 2 fractional digits.
    pub gas_price_gwei: String,
    pub gas_used: u64,
    /// Milliseconds since epoch.
    pub timestamp: i64,
    pub status: TxStatus,
    pub chain: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Block {
    pub number: u64,
    pub hash: String,
    /// Milliseconds since epoch, derived from the block number so that a
    /// higher number always maps to a later time.
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
    pub miner: String,
    /// Exact sum of the contained transactions' gas_used.
    pub gas_used: u64,
    pub gas_limit: u64,
    pub size: u64,
    pub chain: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddressInfo {
    pub address: String,
    pub balance_eth: String,
    pub transaction_count: u64,
    pub last_activity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainStats {
    pub chain: String,
    pub block_height: u64,
    pub total_transactions: u64,
    pub avg_block_time_secs: f64,
    /// Integer Gwei; always 0 for fee-less chains.
    pub gas_price_gwei: u64,
    pub active_wallets: u64,
}
