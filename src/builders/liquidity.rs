//! Parameter construction for position-manager liquidity calls: desired
//! amounts assigned by canonical token order, slippage-bounded minimums,
//! spacing-aligned full-range ticks for new positions and an absolute
//! deadline on every call.

use alloy_primitives::{
    Address, U256,
    aliases::{I24, U24},
    utils::{ParseUnits, parse_units}
};
use alloy_sol_types::SolCall;

use crate::{
    apis::utils::deadline_from_now,
    constants::{DEFAULT_SLIPPAGE_BPS, TX_DEADLINE_SECS},
    math::{full_range_ticks, slippage_min, tick_spacing_for_fee},
    types::{CanonicalPair, errors::JocxSdkError, contract_bindings::position_manager}
};

/// Whether a deposit opens a new position or tops up an existing NFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityTarget {
    NewPosition,
    Existing { token_id: U256 }
}

/// A fully-resolved position-manager call, ready to encode.
pub enum LiquidityCall {
    Mint(position_manager::mintCall),
    Increase(position_manager::increaseLiquidityCall)
}

impl LiquidityCall {
    pub fn abi_encode(&self) -> Vec<u8> {
        match self {
            LiquidityCall::Mint(call) => call.abi_encode(),
            LiquidityCall::Increase(call) => call.abi_encode()
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LiquidityCall::Mint(_) => "mint",
            LiquidityCall::Increase(_) => "increase liquidity"
        }
    }
}

/// Parses a user-entered decimal amount into raw token units.
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, JocxSdkError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(JocxSdkError::MissingAmount);
    }

    let raw = match parse_units(trimmed, decimals)? {
        ParseUnits::U256(value) => value,
        ParseUnits::I256(_) => return Err(JocxSdkError::NonPositiveAmount)
    };
    if raw.is_zero() {
        return Err(JocxSdkError::NonPositiveAmount);
    }
    Ok(raw)
}

pub struct LiquidityCallBuilder<'a> {
    pair:         &'a CanonicalPair,
    fee:          u32,
    recipient:    Address,
    slippage_bps: u64,
    deadline:     U256
}

impl<'a> LiquidityCallBuilder<'a> {
    pub fn new(pair: &'a CanonicalPair, fee: u32, recipient: Address) -> Self {
        Self {
            pair,
            fee,
            recipient,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            deadline: deadline_from_now(TX_DEADLINE_SECS)
        }
    }

    pub fn with_slippage_bps(mut self, slippage_bps: u64) -> Self {
        self.slippage_bps = slippage_bps;
        self
    }

    pub fn with_deadline(mut self, deadline: U256) -> Self {
        self.deadline = deadline;
        self
    }

    /// Builds the call for the given desired JOCX and USDT amounts (decimal
    /// strings as entered by the user).
    pub fn build(
        &self,
        target: LiquidityTarget,
        jocx_amount: &str,
        usdt_amount: &str
    ) -> Result<LiquidityCall, JocxSdkError> {
        let jocx_raw = parse_amount(jocx_amount, self.pair.jocx.decimals)?;
        let usdt_raw = parse_amount(usdt_amount, self.pair.usdt.decimals)?;

        let (amount0_desired, amount1_desired) = if self.pair.jocx_is_token0() {
            (jocx_raw, usdt_raw)
        } else {
            (usdt_raw, jocx_raw)
        };
        let amount0_min = slippage_min(amount0_desired, self.slippage_bps);
        let amount1_min = slippage_min(amount1_desired, self.slippage_bps);

        match target {
            LiquidityTarget::Existing { token_id } => {
                Ok(LiquidityCall::Increase(position_manager::increaseLiquidityCall {
                    params: position_manager::IncreaseLiquidityParams {
                        tokenId:        token_id,
                        amount0Desired: amount0_desired,
                        amount1Desired: amount1_desired,
                        amount0Min:     amount0_min,
                        amount1Min:     amount1_min,
                        deadline:       self.deadline
                    }
                }))
            }
            LiquidityTarget::NewPosition => {
                let (tick_lower, tick_upper) = full_range_ticks(tick_spacing_for_fee(self.fee));

                Ok(LiquidityCall::Mint(position_manager::mintCall {
                    params: position_manager::MintParams {
                        token0:         self.pair.token0().address,
                        token1:         self.pair.token1().address,
                        fee:            U24::from(self.fee),
                        tickLower:      I24::unchecked_from(tick_lower),
                        tickUpper:      I24::unchecked_from(tick_upper),
                        amount0Desired: amount0_desired,
                        amount1Desired: amount1_desired,
                        amount0Min:     amount0_min,
                        amount1Min:     amount1_min,
                        recipient:      self.recipient,
                        deadline:       self.deadline
                    }
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;
    use crate::constants::JOCX_CONSTANTS_MAINNET;

    const RECIPIENT: Address = address!("0x4444444444444444444444444444444444444444");

    fn builder(pair: &CanonicalPair) -> LiquidityCallBuilder<'_> {
        LiquidityCallBuilder::new(pair, 3000, RECIPIENT).with_deadline(U256::from(1_700_000_000u64))
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.5", 6).unwrap(), U256::from(1_500_000u64));
        assert!(matches!(parse_amount("", 6), Err(JocxSdkError::MissingAmount)));
        assert!(matches!(parse_amount("  ", 6), Err(JocxSdkError::MissingAmount)));
        assert!(matches!(parse_amount("0", 6), Err(JocxSdkError::NonPositiveAmount)));
        assert!(matches!(parse_amount("-3", 6), Err(JocxSdkError::NonPositiveAmount)));
        assert!(matches!(parse_amount("abc", 6), Err(JocxSdkError::InvalidAmount(_))));
    }

    #[test]
    fn test_new_position_builds_full_range_mint() {
        let pair = JOCX_CONSTANTS_MAINNET.pair();
        let call = builder(&pair)
            .build(LiquidityTarget::NewPosition, "100", "50")
            .unwrap();

        let LiquidityCall::Mint(mint) = call else {
            panic!("expected a mint call");
        };

        // JOCX sorts below USDT, so the JOCX amount rides on the token0 side.
        assert_eq!(mint.params.token0, pair.jocx.address);
        assert_eq!(mint.params.token1, pair.usdt.address);
        assert_eq!(mint.params.amount0Desired, U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64)));
        assert_eq!(mint.params.amount1Desired, U256::from(50_000_000u64));
        assert_eq!(mint.params.tickLower, I24::unchecked_from(-887220));
        assert_eq!(mint.params.tickUpper, I24::unchecked_from(887220));
        assert_eq!(mint.params.recipient, RECIPIENT);
        assert_eq!(mint.params.deadline, U256::from(1_700_000_000u64));
    }

    #[test]
    fn test_existing_position_builds_increase_not_mint() {
        let pair = JOCX_CONSTANTS_MAINNET.pair();
        let call = builder(&pair)
            .build(LiquidityTarget::Existing { token_id: U256::from(42u8) }, "100", "50")
            .unwrap();

        let LiquidityCall::Increase(increase) = call else {
            panic!("expected an increase-liquidity call");
        };
        assert_eq!(increase.params.tokenId, U256::from(42u8));
        assert_eq!(increase.params.deadline, U256::from(1_700_000_000u64));
    }

    #[test]
    fn test_minimums_carry_five_percent_slippage() {
        let pair = JOCX_CONSTANTS_MAINNET.pair();
        let call = builder(&pair)
            .build(LiquidityTarget::NewPosition, "100", "50")
            .unwrap();

        let LiquidityCall::Mint(mint) = call else {
            panic!("expected a mint call");
        };
        assert_eq!(
            mint.params.amount0Min,
            mint.params.amount0Desired * U256::from(9_500u64) / U256::from(10_000u64)
        );
        assert_eq!(mint.params.amount1Min, U256::from(47_500_000u64));
    }
}
