use rand::Rng;

use crate::chains::ChainProfile;
use crate::models::{AddressInfo, Block, ChainStats, Transaction, TxStatus};

const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

pub const HASH_HEX_LEN: usize = 64;
pub const ADDRESS_HEX_LEN: usize = 40;
pub const BLOCK_GAS_LIMIT: u64 = 15_000_000;

/// Timestamp spread for standalone transactions: one hour back from now.
pub const STANDALONE_SPREAD_MS: i64 = 3_600_000;
/// Timestamp spread for address histories: roughly four months back.
pub const HISTORY_SPREAD_MS: i64 = 10_000_000_000;

// Status weights: ~80% success, ~10% failed, remainder pending.
const P_SUCCESS: f64 = 0.8;
const P_FAILED: f64 = 0.1;

/// Random lowercase hex string of `hex_len` digits, prefixed with `0x`.
pub fn generate_hash(rng: &mut impl Rng, hex_len: usize) -> String {
    let mut out = String::with_capacity(2 + hex_len);
    out.push_str("0x");
    for _ in 0..hex_len {
        out.push(HEX_CHARS[rng.gen_range(0..HEX_CHARS.len())] as char);
    }
    out
}

pub fn generate_address(rng: &mut impl Rng) -> String {
    generate_hash(rng, ADDRESS_HEX_LEN)
}

/// Synthesizes a transaction with a timestamp drawn from the last
/// `spread_ms` milliseconds before `now_ms`. Included transactions reference
/// `reference_block` when given, otherwise a random plausible height.
pub fn generate_transaction(
    rng: &mut impl Rng,
    now_ms: i64,
    spread_ms: i64,
    reference_block: Option<u64>,
    chain: &str,
) -> Transaction {
    let block_number =
        reference_block.unwrap_or_else(|| rng.gen_range(1..=crate::chains::PAGED_BASE_HEIGHT));

    let roll: f64 = rng.gen();
    let status = if roll < P_SUCCESS {
        TxStatus::Success { block_number }
    } else if roll < P_SUCCESS + P_FAILED {
        TxStatus::Failed { block_number }
    } else {
        TxStatus::Pending
    };

    Transaction {
        hash: generate_hash(rng, HASH_HEX_LEN),
        from: generate_address(rng),
        to: generate_address(rng),
        value_eth: format!("{:.4}", rng.gen_range(0.0..10.0)),
        gas_price_gwei: format!("{:.2}", rng.gen_range(0.0..100.0)),
        gas_used: rng.gen_range(0..1_000_000),
        timestamp: now_ms - rng.gen_range(0..spread_ms),
        status,
        chain: chain.to_string(),
    }
}

/// Block timestamp derived from the number: the profile's base height maps
/// to `reference_now_ms` and each step of the number moves the timestamp by
/// exactly one block interval, so a higher number is always more recent.
/// Computed in i128 and clamped, since any u64 can arrive here via a numeric
/// lookup query and must not overflow.
pub fn block_timestamp(profile: &ChainProfile, number: u64, reference_now_ms: i64) -> i64 {
    let delta =
        (number as i128 - profile.base_height as i128) * profile.block_interval_ms as i128;
    let ts = reference_now_ms as i128 + delta;
    ts.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Synthesizes a block with 1..=50 transactions. The block's `gas_used` is
/// the exact sum of its transactions' `gas_used`.
///
/// The contained transactions are drawn independently: their own status and
/// block-number fields are NOT stamped with this block's number, and their
/// timestamps are not bounded by the block's. Callers must not rely on that
/// nested consistency; this generator only promises the gas-sum invariant
/// and the count bounds.
pub fn generate_block(
    rng: &mut impl Rng,
    number: u64,
    profile: &ChainProfile,
    reference_now_ms: i64,
) -> Block {
    let tx_count = rng.gen_range(1..=50);
    let transactions: Vec<Transaction> = (0..tx_count)
        .map(|_| {
            generate_transaction(rng, reference_now_ms, STANDALONE_SPREAD_MS, None, profile.id)
        })
        .collect();

    let gas_used = transactions.iter().map(|tx| tx.gas_used).sum();

    Block {
        number,
        hash: generate_hash(rng, HASH_HEX_LEN),
        timestamp: block_timestamp(profile, number, reference_now_ms),
        transactions,
        miner: generate_address(rng),
        gas_used,
        gas_limit: BLOCK_GAS_LIMIT,
        size: rng.gen_range(10_000..110_000),
        chain: profile.id.to_string(),
    }
}

/// Balance and activity are independent draws; nothing reconciles them
/// against any generated transaction history.
pub fn generate_address_info(rng: &mut impl Rng, address: &str, now_ms: i64) -> AddressInfo {
    AddressInfo {
        address: address.to_string(),
        balance_eth: format!("{:.4}", rng.gen_range(0.0..100.0)),
        transaction_count: rng.gen_range(0..1_000),
        last_activity: now_ms - rng.gen_range(0..HISTORY_SPREAD_MS),
    }
}

/// Recent activity for an address, most recent first. Each entry flips a
/// coin for direction; the counterparty is a fresh random address.
pub fn generate_address_history(
    rng: &mut impl Rng,
    address: &str,
    count: usize,
    now_ms: i64,
) -> Vec<Transaction> {
    let mut txs: Vec<Transaction> = (0..count)
        .map(|_| {
            let mut tx = generate_transaction(
                rng,
                now_ms,
                HISTORY_SPREAD_MS,
                None,
                crate::chains::DEFAULT_CHAIN,
            );
            if rng.gen_bool(0.5) {
                tx.from = address.to_string();
            } else {
                tx.to = address.to_string();
            }
            tx
        })
        .collect();

    txs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    txs
}

/// Chain stats: the profile's baseline perturbed with bounded noise.
/// Fee-less chains always report a zero gas price.
pub fn generate_stats(rng: &mut impl Rng, profile: &ChainProfile) -> ChainStats {
    let gas_price_gwei = if profile.fee_less {
        0
    } else {
        rng.gen_range(10..60)
    };

    ChainStats {
        chain: profile.id.to_string(),
        block_height: profile.base_height + rng.gen_range(0..profile.height_jitter),
        total_transactions: 2_000_000_000 + rng.gen_range(0..10_000_000),
        avg_block_time_secs: profile.avg_block_time_secs
            + rng.gen::<f64>() * profile.avg_block_time_jitter,
        gas_price_gwei,
        active_wallets: 1_000_000 + rng.gen_range(0..100_000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::profile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NOW_MS: i64 = 1_700_000_000_000;

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    }

    #[test]
    fn hashes_are_prefixed_lowercase_hex_of_exact_length() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            let hash = generate_hash(&mut rng, 64);
            assert_eq!(hash.len(), 66);
            assert!(hash.starts_with("0x"));
            assert!(is_lower_hex(&hash[2..]));
        }
    }

    #[test]
    fn addresses_are_forty_hex_digits() {
        let mut rng = StdRng::seed_from_u64(2);
        let addr = generate_address(&mut rng);
        assert_eq!(addr.len(), 42);
        assert!(is_lower_hex(&addr[2..]));
    }

    #[test]
    fn pending_transactions_carry_no_block_number() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut saw_pending = false;
        let mut saw_included = false;
        for _ in 0..500 {
            let tx =
                generate_transaction(&mut rng, NOW_MS, STANDALONE_SPREAD_MS, None, "ethereum");
            if tx.status.is_pending() {
                saw_pending = true;
                assert_eq!(tx.status.block_number(), None);
            } else {
                saw_included = true;
                assert!(tx.status.block_number().is_some());
            }
            assert!(tx.timestamp <= NOW_MS);
            assert!(tx.timestamp > NOW_MS - STANDALONE_SPREAD_MS);
            assert!(tx.gas_used < 1_000_000);
        }
        assert!(saw_pending && saw_included);
    }

    #[test]
    fn transaction_amounts_have_fixed_precision() {
        let mut rng = StdRng::seed_from_u64(4);
        let tx = generate_transaction(&mut rng, NOW_MS, STANDALONE_SPREAD_MS, None, "ethereum");
        let (_, value_frac) = tx.value_eth.split_once('.').unwrap();
        assert_eq!(value_frac.len(), 4);
        let (_, gas_frac) = tx.gas_price_gwei.split_once('.').unwrap();
        assert_eq!(gas_frac.len(), 2);
    }

    #[test]
    fn included_transaction_uses_reference_block() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let tx =
                generate_transaction(&mut rng, NOW_MS, STANDALONE_SPREAD_MS, Some(777), "polygon");
            assert_eq!(tx.chain, "polygon");
            if let Some(number) = tx.status.block_number() {
                assert_eq!(number, 777);
            }
        }
    }

    #[test]
    fn block_gas_used_is_exact_sum_of_transactions() {
        let mut rng = StdRng::seed_from_u64(6);
        let eth = profile("ethereum");
        for number in 0..50 {
            let block = generate_block(&mut rng, number, eth, NOW_MS);
            let sum: u64 = block.transactions.iter().map(|tx| tx.gas_used).sum();
            assert_eq!(block.gas_used, sum);
            assert!(!block.transactions.is_empty());
            assert!(block.transactions.len() <= 50);
            assert_eq!(block.gas_limit, BLOCK_GAS_LIMIT);
            assert!(block.size >= 10_000 && block.size < 110_000);
        }
    }

    #[test]
    fn block_timestamps_are_monotonic_with_exact_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let eth = profile("ethereum");
        let b100 = generate_block(&mut rng, 100, eth, NOW_MS);
        let b101 = generate_block(&mut rng, 101, eth, NOW_MS);
        assert_eq!(b101.timestamp - b100.timestamp, 15_000);
        assert!(b101.timestamp > b100.timestamp);
    }

    #[test]
    fn block_timestamp_saturates_for_extreme_heights() {
        let eth = profile("ethereum");
        // Any u64 can reach here through a numeric lookup query; the
        // timestamp must clamp instead of overflowing.
        assert_eq!(block_timestamp(eth, u64::MAX, NOW_MS), i64::MAX);
        assert_eq!(
            block_timestamp(eth, 1_000_000_000_000_000_000, NOW_MS),
            i64::MAX
        );

        let mut rng = StdRng::seed_from_u64(10);
        let block = generate_block(&mut rng, u64::MAX, eth, NOW_MS);
        assert_eq!(block.number, u64::MAX);
        let sum: u64 = block.transactions.iter().map(|tx| tx.gas_used).sum();
        assert_eq!(block.gas_used, sum);
    }

    #[test]
    fn block_timestamps_use_chain_interval() {
        let btc = profile("bitcoin");
        let t1 = block_timestamp(btc, 1_000, NOW_MS);
        let t2 = block_timestamp(btc, 1_001, NOW_MS);
        assert_eq!(t2 - t1, 600_000);
    }

    #[test]
    fn address_history_is_sorted_most_recent_first() {
        let mut rng = StdRng::seed_from_u64(8);
        let addr = generate_address(&mut rng);
        let history = generate_address_history(&mut rng, &addr, 10, NOW_MS);
        assert_eq!(history.len(), 10);
        for pair in history.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        for tx in &history {
            assert!(tx.from == addr || tx.to == addr);
        }
    }

    #[test]
    fn fee_less_chain_stats_always_report_zero_gas_price() {
        let btc = profile("bitcoin");
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let stats = generate_stats(&mut rng, btc);
            assert_eq!(stats.gas_price_gwei, 0);
            assert!(stats.block_height >= 800_000);
        }
    }

    #[test]
    fn default_chain_stats_have_positive_gas_price() {
        let mut rng = StdRng::seed_from_u64(9);
        let stats = generate_stats(&mut rng, profile("ethereum"));
        assert!(stats.gas_price_gwei >= 10 && stats.gas_price_gwei < 60);
        assert!(stats.avg_block_time_secs >= 12.0);
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_hash(&mut StdRng::seed_from_u64(42), 64);
        let b = generate_hash(&mut StdRng::seed_from_u64(42), 64);
        assert_eq!(a, b);
    }
}
