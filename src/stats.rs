//! Estimated secondary statistics for the dashboard. Nothing here is read
//! from an indexer: these are heuristics over TVL and the position-NFT
//! supply, kept deterministic under an injected random source. Replace with
//! event-log aggregation once one exists.

use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedPoolStats {
    pub volume_24h_usd:    f64,
    pub active_stakers:    u64,
    pub total_staked_usd:  f64,
    pub average_stake_usd: f64,
    /// Share of all position NFTs estimated to be staked, in percent.
    pub staking_ratio_pct: f64
}

/// Derives the display estimates from the pool's TVL and the total position
/// supply. Daily volume is assumed at 10% of TVL; roughly 15% of positions
/// are assumed staked, with jitter from `rng`.
pub fn estimate_pool_stats(
    tvl_usd: f64,
    total_positions: u64,
    rng: &mut impl Rng
) -> DerivedPoolStats {
    let volume_24h_usd = tvl_usd * 0.1;

    let active_stakers = total_positions * 15 / 100 + rng.random_range(0..50);
    let average_stake_usd = 2_000.0 + rng.random::<f64>() * 8_000.0;
    let total_staked_usd = active_stakers as f64 * average_stake_usd;
    let staking_ratio_pct = if total_positions > 0 {
        active_stakers as f64 / total_positions as f64 * 100.0
    } else {
        0.0
    };

    DerivedPoolStats {
        volume_24h_usd,
        active_stakers,
        total_staked_usd,
        average_stake_usd,
        staking_ratio_pct
    }
}
