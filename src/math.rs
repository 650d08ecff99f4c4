//! Pool price and position math for the JOCX/USDT pair. Tick-level
//! primitives come from `uniswap_v3_math`; this module layers the pair's
//! decimal handling, full-range tick selection and slippage bounds on top.

use alloy_primitives::{U256, U512, utils::format_units};
use uniswap_v3_math::tick_math::{MAX_TICK, MIN_TICK, get_sqrt_ratio_at_tick};

use crate::{
    constants::BPS_DENOMINATOR,
    types::{CanonicalPair, LiquidityPosition, PoolSnapshot, PoolView, PositionBreakdown, errors::JocxSdkError}
};

const Q96: f64 = 79228162514264337593543950336.0; // 2^96

pub(crate) fn u256_to_f64(value: U256) -> f64 {
    value
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0, |acc, &limb| acc * 18446744073709551616.0 + limb as f64)
}

/// Price of token0 in token1 before decimal adjustment: (sqrtPriceX96/2^96)^2.
pub fn raw_price_from_sqrt_price_x96(sqrt_price_x96: U256) -> f64 {
    let ratio = u256_to_f64(sqrt_price_x96) / Q96;
    ratio * ratio
}

/// Human price of one token0 in token1 units, adjusted by the difference of
/// the two tokens' decimal counts.
pub fn price_from_sqrt_price_x96(sqrt_price_x96: U256, decimals0: u8, decimals1: u8) -> f64 {
    raw_price_from_sqrt_price_x96(sqrt_price_x96)
        * 10f64.powi(decimals0 as i32 - decimals1 as i32)
}

/// Tick spacing by fee tier. Unknown tiers fall back to the 0.3% spacing.
pub fn tick_spacing_for_fee(fee: u32) -> i32 {
    match fee {
        500 => 10,
        3000 => 60,
        10000 => 200,
        _ => 60
    }
}

/// Smallest spacing-aligned tick that is still >= the protocol minimum.
pub fn min_usable_tick(tick_spacing: i32) -> i32 {
    let floored = MIN_TICK.div_euclid(tick_spacing) * tick_spacing;
    if floored < MIN_TICK { floored + tick_spacing } else { floored }
}

/// Largest spacing-aligned tick that is still <= the protocol maximum.
pub fn max_usable_tick(tick_spacing: i32) -> i32 {
    MAX_TICK.div_euclid(tick_spacing) * tick_spacing
}

/// The widest usable range for a position at the given spacing.
pub fn full_range_ticks(tick_spacing: i32) -> (i32, i32) {
    (min_usable_tick(tick_spacing), max_usable_tick(tick_spacing))
}

/// Minimum acceptable amount after `slippage_bps` adverse movement, floored.
pub fn slippage_min(amount: U256, slippage_bps: u64) -> U256 {
    amount * U256::from(BPS_DENOMINATOR - slippage_bps) / U256::from(BPS_DENOMINATOR)
}

/// Maximum counterpart to [`slippage_min`], rounded up so the band always
/// contains the desired amount.
pub fn slippage_max(amount: U256, slippage_bps: u64) -> U256 {
    let numerator = amount * U256::from(BPS_DENOMINATOR + slippage_bps);
    let denominator = U256::from(BPS_DENOMINATOR);
    (numerator + denominator - U256::from(1u8)) / denominator
}

pub fn slippage_bounds(amount: U256, slippage_bps: u64) -> (U256, U256) {
    (slippage_min(amount, slippage_bps), slippage_max(amount, slippage_bps))
}

/// floor(a * b / denominator) through a 512-bit intermediate. Denominators
/// here are sqrt ratios or Q96, never zero.
fn mul_div(a: U256, b: U256, denominator: U256) -> U256 {
    let product = U512::from(a) * U512::from(b);
    (product / U512::from(denominator)).to::<U256>()
}

/// Token0 owed for `liquidity` between two sqrt prices, rounded down.
pub fn amount0_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128
) -> U256 {
    let (sqrt_a, sqrt_b) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };
    if sqrt_a.is_zero() {
        return U256::ZERO;
    }

    let numerator1 = U256::from(liquidity) << 96usize;
    mul_div(numerator1, sqrt_b - sqrt_a, sqrt_b) / sqrt_a
}

/// Token1 owed for `liquidity` between two sqrt prices, rounded down.
pub fn amount1_for_liquidity(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128
) -> U256 {
    let (sqrt_a, sqrt_b) = if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    };

    mul_div(U256::from(liquidity), sqrt_b - sqrt_a, U256::from(1u8) << 96usize)
}

/// Decomposes position liquidity into (amount0, amount1) at the current pool
/// price. Below the range everything sits in token0, above it in token1.
pub fn amounts_for_liquidity(
    sqrt_price_x96: U256,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128
) -> Result<(U256, U256), JocxSdkError> {
    let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower)?;
    let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper)?;

    if sqrt_price_x96 <= sqrt_lower {
        Ok((amount0_for_liquidity(sqrt_lower, sqrt_upper, liquidity), U256::ZERO))
    } else if sqrt_price_x96 < sqrt_upper {
        Ok((
            amount0_for_liquidity(sqrt_price_x96, sqrt_upper, liquidity),
            amount1_for_liquidity(sqrt_lower, sqrt_price_x96, liquidity)
        ))
    } else {
        Ok((U256::ZERO, amount1_for_liquidity(sqrt_lower, sqrt_upper, liquidity)))
    }
}

pub(crate) fn format_token_amount(raw: U256, decimals: u8) -> f64 {
    format_units(raw, decimals)
        .ok()
        .and_then(|formatted| formatted.parse().ok())
        .unwrap_or_default()
}

/// Derives the display-level pool state: JOCX price in USDT and the pool's
/// TVL, with USDT valued at one dollar.
pub fn pool_view_from_snapshot(pair: &CanonicalPair, snapshot: &PoolSnapshot) -> PoolView {
    let (decimals0, decimals1) = if pair.jocx_is_token0() {
        (snapshot.jocx_decimals, snapshot.usdt_decimals)
    } else {
        (snapshot.usdt_decimals, snapshot.jocx_decimals)
    };

    let token0_price = price_from_sqrt_price_x96(snapshot.sqrt_price_x96, decimals0, decimals1);
    let jocx_price_usdt = if pair.jocx_is_token0() {
        token0_price
    } else if token0_price > 0.0 {
        1.0 / token0_price
    } else {
        0.0
    };

    let jocx_balance = format_token_amount(snapshot.jocx_pool_balance, snapshot.jocx_decimals);
    let usdt_balance = format_token_amount(snapshot.usdt_pool_balance, snapshot.usdt_decimals);

    PoolView {
        pool: Some(snapshot.address),
        jocx_price_usdt,
        tvl_usd: jocx_balance * jocx_price_usdt + usdt_balance,
        liquidity: snapshot.liquidity
    }
}

/// Per-position display figures: token amounts decomposed from liquidity,
/// uncollected fees per side, dollar value and the in-range flag.
pub fn position_breakdown(
    pair: &CanonicalPair,
    snapshot: &PoolSnapshot,
    jocx_price_usdt: f64,
    position: &LiquidityPosition
) -> Result<PositionBreakdown, JocxSdkError> {
    let (amount0, amount1) = amounts_for_liquidity(
        snapshot.sqrt_price_x96,
        position.tick_lower,
        position.tick_upper,
        position.liquidity
    )?;

    let (jocx_raw, usdt_raw) = if position.jocx_is_token0(pair) {
        (amount0, amount1)
    } else {
        (amount1, amount0)
    };
    let (jocx_owed, usdt_owed) = position.owed_amounts(pair);

    let jocx_amount = format_token_amount(jocx_raw, snapshot.jocx_decimals);
    let usdt_amount = format_token_amount(usdt_raw, snapshot.usdt_decimals);

    Ok(PositionBreakdown {
        jocx_amount,
        usdt_amount,
        jocx_fees: format_token_amount(U256::from(jocx_owed), snapshot.jocx_decimals),
        usdt_fees: format_token_amount(U256::from(usdt_owed), snapshot.usdt_decimals),
        value_usd: jocx_amount * jocx_price_usdt + usdt_amount,
        in_range: position.is_in_range(snapshot.tick)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_position, sample_snapshot};

    fn q96() -> U256 {
        U256::from(2u8).pow(U256::from(96u8))
    }

    #[test]
    fn test_raw_price_scales_with_sqrt_price_squared() {
        let base = raw_price_from_sqrt_price_x96(q96());
        let doubled = raw_price_from_sqrt_price_x96(q96() * U256::from(2u8));

        assert!((base - 1.0).abs() < 1e-12);
        assert!((doubled / base - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_decimal_adjustment() {
        // sqrt price of 1.0 between an 18-decimals and a 6-decimals token.
        let price = price_from_sqrt_price_x96(q96(), 18, 6);
        assert!((price - 1e12).abs() / 1e12 < 1e-9);

        let flat = price_from_sqrt_price_x96(q96(), 6, 6);
        assert!((flat - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tick_spacing_table() {
        assert_eq!(tick_spacing_for_fee(500), 10);
        assert_eq!(tick_spacing_for_fee(3000), 60);
        assert_eq!(tick_spacing_for_fee(10000), 200);
        assert_eq!(tick_spacing_for_fee(12345), 60);
    }

    #[test]
    fn test_full_range_ticks_are_spacing_aligned() {
        for spacing in [10, 60, 200] {
            let (lower, upper) = full_range_ticks(spacing);

            assert_eq!(lower % spacing, 0);
            assert_eq!(upper % spacing, 0);
            assert!(lower >= MIN_TICK);
            assert!(upper <= MAX_TICK);
            // maximal: one more step would leave the protocol bounds
            assert!(lower - spacing < MIN_TICK);
            assert!(upper + spacing > MAX_TICK);
        }

        assert_eq!(full_range_ticks(60), (-887220, 887220));
        assert_eq!(full_range_ticks(200), (-887200, 887200));
    }

    #[test]
    fn test_slippage_bounds_bracket_the_amount() {
        for amount in [1u64, 2, 999, 10_000, 123_456_789] {
            let amount = U256::from(amount);
            let (min, max) = slippage_bounds(amount, 500);

            assert!(min <= amount);
            assert!(amount <= max);
        }

        let (min, max) = slippage_bounds(U256::from(10_000u64), 500);
        assert_eq!(min, U256::from(9_500u64));
        assert_eq!(max, U256::from(10_500u64));
    }

    #[test]
    fn test_amount_helpers_at_a_doubling_sqrt_price() {
        let liquidity = 1_000_000_000_000_000_000u128;
        let doubled = q96() * U256::from(2u8);

        // between sqrt prices Q96 and 2*Q96 both deltas have closed forms
        assert_eq!(amount1_for_liquidity(q96(), doubled, liquidity), U256::from(liquidity));
        assert_eq!(amount0_for_liquidity(q96(), doubled, liquidity), U256::from(liquidity / 2));

        // argument order must not matter
        assert_eq!(
            amount1_for_liquidity(doubled, q96(), liquidity),
            amount1_for_liquidity(q96(), doubled, liquidity)
        );
    }

    #[test]
    fn test_amounts_for_liquidity_position_of_price() {
        let liquidity = 1_000_000_000_000_000_000u128;
        let at_zero = get_sqrt_ratio_at_tick(0).unwrap();

        // price inside the range: both tokens present
        let (amount0, amount1) = amounts_for_liquidity(at_zero, -600, 600, liquidity).unwrap();
        assert!(amount0 > U256::ZERO);
        assert!(amount1 > U256::ZERO);

        // price below the range: all token0
        let below = get_sqrt_ratio_at_tick(-1200).unwrap();
        let (amount0, amount1) = amounts_for_liquidity(below, -600, 600, liquidity).unwrap();
        assert!(amount0 > U256::ZERO);
        assert_eq!(amount1, U256::ZERO);

        // price above the range: all token1
        let above = get_sqrt_ratio_at_tick(1200).unwrap();
        let (amount0, amount1) = amounts_for_liquidity(above, -600, 600, liquidity).unwrap();
        assert_eq!(amount0, U256::ZERO);
        assert!(amount1 > U256::ZERO);
    }

    #[test]
    fn test_pool_view_from_snapshot() {
        let (pair, snapshot) = sample_snapshot();
        let view = pool_view_from_snapshot(&pair, &snapshot);

        assert_eq!(view.pool, Some(snapshot.address));
        assert!(view.jocx_price_usdt > 0.0);
        assert!(view.tvl_usd > 0.0);
        assert_eq!(view.liquidity, snapshot.liquidity);
    }

    #[test]
    fn test_position_breakdown_in_range() {
        let (pair, snapshot) = sample_snapshot();
        let position = sample_position(&pair, U256::from(7u8));

        let breakdown = position_breakdown(&pair, &snapshot, 0.125, &position).unwrap();
        assert!(breakdown.in_range);
        assert!(breakdown.jocx_amount > 0.0);
        assert!(breakdown.usdt_amount > 0.0);
        assert!(
            (breakdown.value_usd
                - (breakdown.jocx_amount * 0.125 + breakdown.usdt_amount))
                .abs()
                < 1e-9
        );
    }
}
