use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use rand::Rng;

use crate::{
    actions::{ApprovalCoordinator, LiquidityFlow, StakingActions},
    apis::{JocxDataApi, JocxUserApi},
    constants::{JOCX_CONSTANTS_MAINNET, JocxConstants},
    stats::{DerivedPoolStats, estimate_pool_stats},
    types::{CanonicalPair, LiquidityPosition, PoolStateTracker, PoolView, TokenInfo}
};

/// The chain session everything else is handed explicitly: an eth provider,
/// the connected account (if any) and the deployment constants. No
/// component reaches for ambient globals.
#[derive(Clone)]
pub struct JocxApi<P>
where
    P: Provider
{
    provider:  P,
    account:   Option<Address>,
    constants: JocxConstants
}

impl<P: Provider> JocxApi<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, account: None, constants: JOCX_CONSTANTS_MAINNET }
    }

    /// Attaches the connected wallet address. Mutating flows refuse to run
    /// without one.
    pub fn with_account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }

    pub fn with_constants(mut self, constants: JocxConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn account(&self) -> Option<Address> {
        self.account
    }

    pub fn constants(&self) -> &JocxConstants {
        &self.constants
    }

    pub fn pair(&self) -> CanonicalPair {
        self.constants.pair()
    }

    pub fn liquidity_flow(&self) -> LiquidityFlow<'_, P> {
        LiquidityFlow::new(self)
    }

    pub fn staking(&self) -> StakingActions<'_, P> {
        StakingActions::new(self)
    }

    pub fn approval(&self, token: TokenInfo) -> ApprovalCoordinator {
        ApprovalCoordinator::new(token, self.constants.position_manager())
    }

    pub async fn pool_view(&self, block_number: Option<u64>) -> eyre::Result<Option<PoolView>> {
        self.provider.pool_view(&self.constants, block_number).await
    }

    /// Refreshes `tracker` with the soft-failure semantics of the pool
    /// reader: errors keep the last known values, a missing pool resets.
    pub async fn refresh_pool(&self, tracker: &mut PoolStateTracker, block_number: Option<u64>) {
        tracker.apply(self.pool_view(block_number).await);
    }

    /// The connected account's qualifying JOCX/USDT positions. Empty while
    /// disconnected.
    pub async fn positions(&self, block_number: Option<u64>) -> eyre::Result<Vec<LiquidityPosition>> {
        self.provider
            .all_user_positions(&self.constants, self.account, block_number)
            .await
    }

    pub async fn claimable_rewards(&self, block_number: Option<u64>) -> eyre::Result<U256> {
        let Some(account) = self.account else {
            return Ok(U256::ZERO);
        };
        self.provider
            .claimable_rewards(&self.constants, account, block_number)
            .await
    }

    /// (JOCX, USDT) wallet balances of the connected account.
    pub async fn token_balances(&self, block_number: Option<u64>) -> eyre::Result<(U256, U256)> {
        let Some(account) = self.account else {
            return Ok((U256::ZERO, U256::ZERO));
        };

        let pair = self.pair();
        Ok(tokio::try_join!(
            self.provider
                .token_balance(pair.jocx.address, account, block_number),
            self.provider
                .token_balance(pair.usdt.address, account, block_number)
        )?)
    }

    /// Estimated secondary statistics for the dashboard. `None` when the
    /// pool does not exist. The randomness source is injected so callers
    /// (and tests) control the jitter.
    pub async fn estimated_stats<R: Rng>(
        &self,
        rng: &mut R,
        block_number: Option<u64>
    ) -> eyre::Result<Option<DerivedPoolStats>> {
        let Some(view) = self.pool_view(block_number).await? else {
            return Ok(None);
        };

        let total_positions = self
            .provider
            .total_positions(&self.constants, block_number)
            .await?;
        let total_positions = u64::try_from(total_positions).unwrap_or(u64::MAX);

        Ok(Some(estimate_pool_stats(view.tvl_usd, total_positions, rng)))
    }
}
