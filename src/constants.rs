use alloy_primitives::{Address, B256, ChainId, U256, address, b256};

use crate::types::{CanonicalPair, TokenInfo};

/// Basis points denominator used for all slippage arithmetic.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Tolerance applied to desired deposit amounts, in basis points (5%).
pub const DEFAULT_SLIPPAGE_BPS: u64 = 500;

/// Every mutating call carries an absolute expiry of now + this many seconds.
pub const TX_DEADLINE_SECS: u64 = 1800;

/// Incentive the staker contract scopes stakes to. Placeholder until the
/// incentive registry exposes a discovery call.
pub const STAKING_INCENTIVE_ID: B256 =
    b256!("0x0000000000000000000000000000000000000000000000000000000000000001");

/// Amount requested on claim. The staker caps the payout at whatever is
/// actually owed, so this is claim-everything.
pub const CLAIM_ALL: U256 = U256::MAX;

/// Deployment constants for the JOCX/USDT liquidity staking system.
#[derive(Debug, Clone, Copy)]
pub struct JocxConstants {
    jocx_token:         Address,
    usdt_token:         Address,
    uniswap_v3_factory: Address,
    position_manager:   Address,
    v3_staker:          Address,
    pool_fee:           u32,
    chain_id:           u64
}

impl JocxConstants {
    pub fn by_chain(chain_id: ChainId) -> Option<Self> {
        match chain_id {
            1 => Some(JOCX_CONSTANTS_MAINNET),
            _ => None
        }
    }

    #[inline]
    pub fn jocx_token(&self) -> Address {
        self.jocx_token
    }

    #[inline]
    pub fn usdt_token(&self) -> Address {
        self.usdt_token
    }

    #[inline]
    pub fn uniswap_v3_factory(&self) -> Address {
        self.uniswap_v3_factory
    }

    #[inline]
    pub fn position_manager(&self) -> Address {
        self.position_manager
    }

    #[inline]
    pub fn v3_staker(&self) -> Address {
        self.v3_staker
    }

    #[inline]
    pub fn pool_fee(&self) -> u32 {
        self.pool_fee
    }

    #[inline]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The fixed token pair all pool and position math runs against.
    pub fn pair(&self) -> CanonicalPair {
        CanonicalPair::new(
            TokenInfo { address: self.jocx_token, decimals: 18, symbol: "JOCX" },
            TokenInfo { address: self.usdt_token, decimals: 6, symbol: "USDT" }
        )
    }
}

pub const JOCX_CONSTANTS_MAINNET: JocxConstants = JocxConstants {
    jocx_token:         address!("0xbb1E1399EEE1f577F1B4359224155f5Db39CA084"),
    usdt_token:         address!("0xdAC17F958D2ee523a2206206994597C13D831ec7"),
    uniswap_v3_factory: address!("0x1F98431c8aD98523631AE4a59f267346ea31F984"),
    position_manager:   address!("0xC36442b4a4522E871399CD717aBDD847Ab11FE88"),
    v3_staker:          address!("0x1f98407aaB862CdDeF78Ed252D6f557aA5b0f00d"),
    pool_fee:           3000,
    chain_id:           1
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_chain() {
        assert!(JocxConstants::by_chain(1).is_some());
        assert!(JocxConstants::by_chain(11155111).is_none());
    }

    #[test]
    fn test_mainnet_pair_decimals() {
        let pair = JOCX_CONSTANTS_MAINNET.pair();
        assert_eq!(pair.jocx.decimals, 18);
        assert_eq!(pair.usdt.decimals, 6);
        assert_eq!(pair.jocx.symbol, "JOCX");
    }
}
