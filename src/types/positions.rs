use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::types::CanonicalPair;

/// A liquidity-position NFT as reported by the position manager.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPosition {
    pub token_id:     U256,
    pub token0:       Address,
    pub token1:       Address,
    pub fee:          u32,
    pub tick_lower:   i32,
    pub tick_upper:   i32,
    pub liquidity:    u128,
    pub tokens_owed0: u128,
    pub tokens_owed1: u128
}

impl LiquidityPosition {
    pub fn matches_pair(&self, pair: &CanonicalPair) -> bool {
        pair.matches(self.token0, self.token1)
    }

    pub fn has_liquidity(&self) -> bool {
        self.liquidity > 0
    }

    /// A position earns fees while the pool tick sits in `[lower, upper)`.
    pub fn is_in_range(&self, current_tick: i32) -> bool {
        self.tick_lower <= current_tick && current_tick < self.tick_upper
    }

    pub fn jocx_is_token0(&self, pair: &CanonicalPair) -> bool {
        self.token0 == pair.jocx.address
    }

    /// Uncollected fees mapped to (JOCX, USDT) sides.
    pub fn owed_amounts(&self, pair: &CanonicalPair) -> (u128, u128) {
        if self.jocx_is_token0(pair) {
            (self.tokens_owed0, self.tokens_owed1)
        } else {
            (self.tokens_owed1, self.tokens_owed0)
        }
    }
}

/// Keeps only positions in the canonical pair (either order) that still hold
/// liquidity. Discovery order is preserved.
pub fn filter_canonical(
    positions: Vec<LiquidityPosition>,
    pair: &CanonicalPair
) -> Vec<LiquidityPosition> {
    positions
        .into_iter()
        .filter(|position| position.matches_pair(pair) && position.has_liquidity())
        .collect()
}

/// Human-readable decomposition of one position, priced in USDT.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionBreakdown {
    pub jocx_amount: f64,
    pub usdt_amount: f64,
    pub jocx_fees:   f64,
    pub usdt_fees:   f64,
    pub value_usd:   f64,
    pub in_range:    bool
}
