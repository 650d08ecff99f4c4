use alloy_primitives::{Address, U256, address};
use alloy_provider::{
    Identity, Provider, RootProvider, WsConnect,
    fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller}
};
use uniswap_v3_math::tick_math::get_sqrt_ratio_at_tick;

use crate::{
    constants::JOCX_CONSTANTS_MAINNET,
    types::{CanonicalPair, LiquidityPosition, PoolSnapshot}
};

pub type AlloyRpcProvider<P> = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>
    >,
    P
>;

pub const SAMPLE_POOL: Address = address!("0x5777d92f208679db4b9778590fa3cab3ac9e2168");

pub fn eth_ws_url() -> String {
    dotenv::dotenv().ok();
    std::env::var("ETH_WS_URL").unwrap_or_else(|_| panic!("ETH_WS_URL not found in .env"))
}

pub async fn spawn_data_provider() -> eyre::Result<AlloyRpcProvider<RootProvider>> {
    Ok(RootProvider::builder()
        .with_recommended_fillers()
        .on_ws(WsConnect::new(eth_ws_url()))
        .await?)
}

/// A JOCX/USDT pool sitting near 0.125 USDT per JOCX with both sides funded.
pub fn sample_snapshot() -> (CanonicalPair, PoolSnapshot) {
    let pair = JOCX_CONSTANTS_MAINNET.pair();
    let tick = -297130;

    let snapshot = PoolSnapshot {
        address:           SAMPLE_POOL,
        sqrt_price_x96:    get_sqrt_ratio_at_tick(tick).unwrap(),
        tick,
        liquidity:         5_000_000_000_000_000_000u128,
        jocx_pool_balance: U256::from(1_000_000u64) * U256::from(10u64).pow(U256::from(18u64)),
        usdt_pool_balance: U256::from(125_000_000_000u64),
        jocx_decimals:     18,
        usdt_decimals:     6
    };

    (pair, snapshot)
}

/// A funded full-range position in the canonical pair.
pub fn sample_position(pair: &CanonicalPair, token_id: U256) -> LiquidityPosition {
    LiquidityPosition {
        token_id,
        token0: pair.token0().address,
        token1: pair.token1().address,
        fee: 3000,
        tick_lower: -887220,
        tick_upper: 887220,
        liquidity: 1_000_000_000_000_000_000u128,
        tokens_owed0: 250_000_000_000_000u128,
        tokens_owed1: 40_000u128,
    }
}
