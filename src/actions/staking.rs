use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use tracing::debug;

use super::status::ActionState;
use crate::{
    apis::{JocxDataApi, JocxUserApi, utils::send_call},
    constants::{CLAIM_ALL, STAKING_INCENTIVE_ID},
    providers::JocxApi,
    types::{LiquidityPosition, contract_bindings::v3_staker, errors::JocxSdkError}
};

/// Claiming only makes sense against a nonzero balance; a zero balance means
/// the control stays disabled and no transaction is attempted.
pub fn can_claim(claimable: U256) -> bool {
    !claimable.is_zero()
}

#[derive(Debug, Clone)]
pub struct StakeOutcome {
    pub tx_hash:   TxHash,
    pub claimable: U256,
    pub positions: Vec<LiquidityPosition>
}

#[derive(Debug, Clone)]
pub struct ClaimOutcome {
    pub tx_hash:   TxHash,
    pub claimable: U256
}

/// Stake / unstake / claim against the rewards staker. The three operations
/// are independent: each keeps its own state machine, so a pending claim
/// does not block a stake.
pub struct StakingActions<'a, P: Provider> {
    api:           &'a JocxApi<P>,
    stake_state:   ActionState,
    unstake_state: ActionState,
    claim_state:   ActionState
}

impl<'a, P: Provider> StakingActions<'a, P> {
    pub fn new(api: &'a JocxApi<P>) -> Self {
        Self {
            api,
            stake_state: ActionState::default(),
            unstake_state: ActionState::default(),
            claim_state: ActionState::default()
        }
    }

    pub fn stake_state(&self) -> ActionState {
        self.stake_state
    }

    pub fn unstake_state(&self) -> ActionState {
        self.unstake_state
    }

    pub fn claim_state(&self) -> ActionState {
        self.claim_state
    }

    /// Stakes the selected position NFT under the fixed incentive.
    pub async fn stake(&mut self, token_id: U256) -> eyre::Result<StakeOutcome> {
        let account = self.api.account().ok_or(JocxSdkError::WalletNotConnected)?;
        self.stake_state.begin("stake")?;

        match self
            .submit_incentive_call(
                account,
                v3_staker::stakeTokenCall { incentiveId: STAKING_INCENTIVE_ID, tokenId: token_id }
            )
            .await
        {
            Ok(outcome) => {
                self.stake_state.complete();
                Ok(outcome)
            }
            Err(err) => {
                self.stake_state.fail();
                Err(err)
            }
        }
    }

    /// Withdraws the selected position NFT from the incentive.
    pub async fn unstake(&mut self, token_id: U256) -> eyre::Result<StakeOutcome> {
        let account = self.api.account().ok_or(JocxSdkError::WalletNotConnected)?;
        self.unstake_state.begin("unstake")?;

        match self
            .submit_incentive_call(
                account,
                v3_staker::unstakeTokenCall {
                    incentiveId: STAKING_INCENTIVE_ID,
                    tokenId:     token_id
                }
            )
            .await
        {
            Ok(outcome) => {
                self.unstake_state.complete();
                Ok(outcome)
            }
            Err(err) => {
                self.unstake_state.fail();
                Err(err)
            }
        }
    }

    /// Claims all accrued JOCX rewards to the connected account. Not
    /// attempted when nothing is claimable.
    pub async fn claim(&mut self) -> eyre::Result<ClaimOutcome> {
        let api = self.api;
        let account = api.account().ok_or(JocxSdkError::WalletNotConnected)?;

        let claimable = api
            .provider()
            .claimable_rewards(api.constants(), account, None)
            .await?;
        if !can_claim(claimable) {
            return Err(JocxSdkError::NothingToClaim.into());
        }

        self.claim_state.begin("claim")?;

        match self.submit_claim(account).await {
            Ok(outcome) => {
                self.claim_state.complete();
                Ok(outcome)
            }
            Err(err) => {
                self.claim_state.fail();
                Err(err)
            }
        }
    }

    async fn submit_claim(&self, account: Address) -> eyre::Result<ClaimOutcome> {
        let api = self.api;
        let cfg = api.constants();

        debug!("submitting claim for all accrued rewards");
        let tx_hash = send_call(
            api.provider(),
            account,
            cfg.v3_staker(),
            v3_staker::claimRewardCall {
                rewardToken:     cfg.jocx_token(),
                to:              account,
                amountRequested: CLAIM_ALL
            }
        )
        .await?;

        let claimable = api.provider().claimable_rewards(cfg, account, None).await?;
        Ok(ClaimOutcome { tx_hash, claimable })
    }

    async fn submit_incentive_call<C>(
        &self,
        account: Address,
        call: C
    ) -> eyre::Result<StakeOutcome>
    where
        C: alloy_sol_types::SolCall + Send
    {
        let api = self.api;
        let cfg = api.constants();

        let tx_hash = send_call(api.provider(), account, cfg.v3_staker(), call).await?;

        // state displayed next to the controls goes stale once the stake
        // moves, so re-read it in the same step
        let (claimable, positions) = tokio::try_join!(
            api.provider().claimable_rewards(cfg, account, None),
            api.provider().all_user_positions(cfg, Some(account), None)
        )?;

        Ok(StakeOutcome { tx_hash, claimable, positions })
    }
}
