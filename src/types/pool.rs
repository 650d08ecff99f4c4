use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One round of raw reads against the pool and its two tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub address:           Address,
    pub sqrt_price_x96:    U256,
    pub tick:              i32,
    pub liquidity:         u128,
    pub jocx_pool_balance: U256,
    pub usdt_pool_balance: U256,
    pub jocx_decimals:     u8,
    pub usdt_decimals:     u8
}

/// Display-level pool state derived from a [`PoolSnapshot`]. `pool` is `None`
/// when the factory reports no pool for the pair and fee tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolView {
    pub pool:            Option<Address>,
    pub jocx_price_usdt: f64,
    pub tvl_usd:         f64,
    pub liquidity:       u128
}

/// Last-known pool state. A failed refresh keeps the previous values and
/// raises the error flag; a missing pool resets to defaults without erroring.
#[derive(Debug, Clone, Default)]
pub struct PoolStateTracker {
    view:  PoolView,
    error: bool
}

impl PoolStateTracker {
    pub fn view(&self) -> &PoolView {
        &self.view
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn apply(&mut self, refresh: eyre::Result<Option<PoolView>>) {
        match refresh {
            Ok(Some(view)) => {
                self.view = view;
                self.error = false;
            }
            Ok(None) => {
                self.view = PoolView::default();
                self.error = false;
            }
            Err(err) => {
                warn!(%err, "pool refresh failed, keeping last known state");
                self.error = true;
            }
        }
    }
}
