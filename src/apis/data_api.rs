use alloy_primitives::{Address, U256, aliases::U24};
use alloy_provider::Provider;

use super::utils::view_call;
use crate::{
    constants::JocxConstants,
    math,
    types::{
        PoolSnapshot, PoolView,
        contract_bindings::{erc20, position_manager, uniswap_v3_factory, uniswap_v3_pool, v3_staker}
    }
};

/// Read-only chain state for the JOCX/USDT system: pool resolution, pool
/// price/TVL, token balances and allowances, claimable staking rewards.
#[async_trait::async_trait]
pub trait JocxDataApi: Send + Sized {
    /// Resolves the pool for the canonical pair and configured fee tier.
    /// A zero address from the factory means no pool exists; that is not an
    /// error here.
    async fn pool_address(
        &self,
        cfg: &JocxConstants,
        block_number: Option<u64>
    ) -> eyre::Result<Option<Address>>;

    /// Reads slot0, in-range liquidity, the pool's balance of each canonical
    /// token and both tokens' decimals in one batch.
    async fn pool_snapshot(
        &self,
        cfg: &JocxConstants,
        pool: Address,
        block_number: Option<u64>
    ) -> eyre::Result<PoolSnapshot>;

    async fn pool_view(
        &self,
        cfg: &JocxConstants,
        block_number: Option<u64>
    ) -> eyre::Result<Option<PoolView>> {
        let Some(pool) = self.pool_address(cfg, block_number).await? else {
            return Ok(None);
        };

        let snapshot = self.pool_snapshot(cfg, pool, block_number).await?;
        Ok(Some(math::pool_view_from_snapshot(&cfg.pair(), &snapshot)))
    }

    async fn token_balance(
        &self,
        token: Address,
        owner: Address,
        block_number: Option<u64>
    ) -> eyre::Result<U256>;

    async fn token_decimals(&self, token: Address, block_number: Option<u64>)
    -> eyre::Result<u8>;

    async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        block_number: Option<u64>
    ) -> eyre::Result<U256>;

    /// JOCX rewards accrued to `owner` in the staker contract.
    async fn claimable_rewards(
        &self,
        cfg: &JocxConstants,
        owner: Address,
        block_number: Option<u64>
    ) -> eyre::Result<U256>;

    /// Total supply of position NFTs, the base figure for staking estimates.
    async fn total_positions(
        &self,
        cfg: &JocxConstants,
        block_number: Option<u64>
    ) -> eyre::Result<U256>;
}

#[async_trait::async_trait]
impl<P: Provider> JocxDataApi for P {
    async fn pool_address(
        &self,
        cfg: &JocxConstants,
        block_number: Option<u64>
    ) -> eyre::Result<Option<Address>> {
        let pool = view_call(
            self,
            block_number,
            cfg.uniswap_v3_factory(),
            uniswap_v3_factory::getPoolCall {
                tokenA: cfg.jocx_token(),
                tokenB: cfg.usdt_token(),
                fee:    U24::from(cfg.pool_fee())
            }
        )
        .await??;

        Ok((pool != Address::ZERO).then_some(pool))
    }

    async fn pool_snapshot(
        &self,
        cfg: &JocxConstants,
        pool: Address,
        block_number: Option<u64>
    ) -> eyre::Result<PoolSnapshot> {
        let pair = cfg.pair();

        let (slot0, liquidity, jocx_balance, usdt_balance, jocx_decimals, usdt_decimals) = tokio::try_join!(
            async {
                Ok::<_, eyre::Report>(
                    view_call(self, block_number, pool, uniswap_v3_pool::slot0Call {}).await??
                )
            },
            async {
                Ok::<_, eyre::Report>(
                    view_call(self, block_number, pool, uniswap_v3_pool::liquidityCall {}).await??
                )
            },
            self.token_balance(pair.jocx.address, pool, block_number),
            self.token_balance(pair.usdt.address, pool, block_number),
            self.token_decimals(pair.jocx.address, block_number),
            self.token_decimals(pair.usdt.address, block_number)
        )?;

        Ok(PoolSnapshot {
            address: pool,
            sqrt_price_x96: slot0.sqrtPriceX96.to::<U256>(),
            tick: slot0.tick.as_i32(),
            liquidity,
            jocx_pool_balance: jocx_balance,
            usdt_pool_balance: usdt_balance,
            jocx_decimals,
            usdt_decimals
        })
    }

    async fn token_balance(
        &self,
        token: Address,
        owner: Address,
        block_number: Option<u64>
    ) -> eyre::Result<U256> {
        Ok(view_call(self, block_number, token, erc20::balanceOfCall { account: owner }).await??)
    }

    async fn token_decimals(
        &self,
        token: Address,
        block_number: Option<u64>
    ) -> eyre::Result<u8> {
        Ok(view_call(self, block_number, token, erc20::decimalsCall {}).await??)
    }

    async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
        block_number: Option<u64>
    ) -> eyre::Result<U256> {
        Ok(view_call(self, block_number, token, erc20::allowanceCall { owner, spender }).await??)
    }

    async fn claimable_rewards(
        &self,
        cfg: &JocxConstants,
        owner: Address,
        block_number: Option<u64>
    ) -> eyre::Result<U256> {
        Ok(view_call(
            self,
            block_number,
            cfg.v3_staker(),
            v3_staker::rewardsCall { rewardToken: cfg.jocx_token(), owner }
        )
        .await??)
    }

    async fn total_positions(
        &self,
        cfg: &JocxConstants,
        block_number: Option<u64>
    ) -> eyre::Result<U256> {
        Ok(view_call(
            self,
            block_number,
            cfg.position_manager(),
            position_manager::totalSupplyCall {}
        )
        .await??)
    }
}
