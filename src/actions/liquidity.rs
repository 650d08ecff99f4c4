use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use tracing::debug;

use super::{approval::ApprovalCoordinator, status::ActionState};
use crate::{
    apis::utils::send_call,
    builders::{LiquidityCall, LiquidityCallBuilder, LiquidityTarget},
    providers::JocxApi,
    types::errors::JocxSdkError
};

/// Which token the next approval transaction should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalTarget {
    Jocx,
    Usdt
}

impl ApprovalTarget {
    pub fn symbol(&self) -> &'static str {
        match self {
            ApprovalTarget::Jocx => "JOCX",
            ApprovalTarget::Usdt => "USDT"
        }
    }
}

/// Picks at most one token to approve. JOCX is the primary token and goes
/// first when both allowances fall short; two approvals are never issued
/// for the same submission.
pub fn next_approval(needs_jocx: bool, needs_usdt: bool) -> Option<ApprovalTarget> {
    match (needs_jocx, needs_usdt) {
        (true, _) => Some(ApprovalTarget::Jocx),
        (false, true) => Some(ApprovalTarget::Usdt),
        (false, false) => None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositKind {
    Minted,
    Increased
}

/// What one [`LiquidityFlow::submit`] call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityOutcome {
    /// An approval was needed and has confirmed; the liquidity call itself
    /// has not run yet. `other_token_pending` flags that the second token
    /// still needs its own approval on the next submission.
    Approved { token: ApprovalTarget, tx_hash: TxHash, other_token_pending: bool },
    /// The mint / increase-liquidity transaction confirmed.
    Deposited { kind: DepositKind, tx_hash: TxHash }
}

/// Drives a deposit into the JOCX/USDT pool: allowance checks, at most one
/// awaited approval per submission, then the mint or increase call.
pub struct LiquidityFlow<'a, P: Provider> {
    api:           &'a JocxApi<P>,
    jocx_approval: ApprovalCoordinator,
    usdt_approval: ApprovalCoordinator,
    jocx_amount:   String,
    usdt_amount:   String,
    target:        LiquidityTarget,
    state:         ActionState
}

impl<'a, P: Provider> LiquidityFlow<'a, P> {
    pub fn new(api: &'a JocxApi<P>) -> Self {
        let cfg = api.constants();
        let pair = cfg.pair();

        Self {
            api,
            jocx_approval: ApprovalCoordinator::new(pair.jocx, cfg.position_manager()),
            usdt_approval: ApprovalCoordinator::new(pair.usdt, cfg.position_manager()),
            jocx_amount: String::new(),
            usdt_amount: String::new(),
            target: LiquidityTarget::NewPosition,
            state: ActionState::default()
        }
    }

    pub fn set_amounts(&mut self, jocx_amount: impl Into<String>, usdt_amount: impl Into<String>) {
        self.jocx_amount = jocx_amount.into();
        self.usdt_amount = usdt_amount.into();
    }

    pub fn set_target(&mut self, target: LiquidityTarget) {
        self.target = target;
    }

    pub fn amounts(&self) -> (&str, &str) {
        (&self.jocx_amount, &self.usdt_amount)
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn jocx_approval(&self) -> &ApprovalCoordinator {
        &self.jocx_approval
    }

    pub fn usdt_approval(&self) -> &ApprovalCoordinator {
        &self.usdt_approval
    }

    /// Re-reads both allowances for the connected account.
    pub async fn refresh_allowances(&mut self) -> eyre::Result<()> {
        let api = self.api;
        let owner = api.account().ok_or(JocxSdkError::WalletNotConnected)?;

        self.jocx_approval.refresh(api.provider(), owner).await?;
        self.usdt_approval.refresh(api.provider(), owner).await?;
        Ok(())
    }

    /// Runs one submission step. Preconditions (connected wallet, both
    /// amounts present) abort before anything is sent. If an allowance is
    /// short, exactly one approval is submitted and awaited and the call
    /// returns without touching the pool; once both tokens are covered the
    /// deposit transaction itself goes out. Success clears the entered
    /// amounts; any failure keeps them so the user can retry as-is.
    pub async fn submit(&mut self) -> eyre::Result<LiquidityOutcome> {
        let account = self.api.account().ok_or(JocxSdkError::WalletNotConnected)?;
        if self.jocx_amount.trim().is_empty() || self.usdt_amount.trim().is_empty() {
            return Err(JocxSdkError::MissingAmount.into());
        }

        self.state.begin("liquidity")?;

        match self.run(account).await {
            Ok(outcome) => {
                if matches!(outcome, LiquidityOutcome::Deposited { .. }) {
                    self.jocx_amount.clear();
                    self.usdt_amount.clear();
                    self.jocx_approval.reset();
                    self.usdt_approval.reset();
                }
                self.state.complete();
                Ok(outcome)
            }
            Err(err) => {
                self.state.fail();
                Err(err)
            }
        }
    }

    async fn run(&mut self, account: Address) -> eyre::Result<LiquidityOutcome> {
        let api = self.api;

        self.jocx_approval.refresh(api.provider(), account).await?;
        self.usdt_approval.refresh(api.provider(), account).await?;

        let needs_jocx = !self.jocx_approval.has_allowance(&self.jocx_amount)?;
        let needs_usdt = !self.usdt_approval.has_allowance(&self.usdt_amount)?;

        if let Some(token) = next_approval(needs_jocx, needs_usdt) {
            let (coordinator, amount) = match token {
                ApprovalTarget::Jocx => (&mut self.jocx_approval, self.jocx_amount.as_str()),
                ApprovalTarget::Usdt => (&mut self.usdt_approval, self.usdt_amount.as_str())
            };

            debug!(token = token.symbol(), "allowance short, submitting approval");
            let tx_hash = coordinator.approve(api.provider(), account, amount).await?;

            return Ok(LiquidityOutcome::Approved {
                token,
                tx_hash,
                other_token_pending: matches!(token, ApprovalTarget::Jocx) && needs_usdt
            });
        }

        let cfg = api.constants();
        let pair = cfg.pair();
        let call = LiquidityCallBuilder::new(&pair, cfg.pool_fee(), account).build(
            self.target,
            &self.jocx_amount,
            &self.usdt_amount
        )?;

        debug!(kind = call.kind(), "submitting liquidity transaction");
        let (kind, tx_hash) = match &call {
            LiquidityCall::Mint(mint) => (
                DepositKind::Minted,
                send_call(api.provider(), account, cfg.position_manager(), mint.clone()).await?
            ),
            LiquidityCall::Increase(increase) => (
                DepositKind::Increased,
                send_call(api.provider(), account, cfg.position_manager(), increase.clone())
                    .await?
            )
        };

        Ok(LiquidityOutcome::Deposited { kind, tx_hash })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_tokens_short_approves_primary_only() {
        assert_eq!(next_approval(true, true), Some(ApprovalTarget::Jocx));
    }

    #[test]
    fn test_single_token_short_approves_that_token() {
        assert_eq!(next_approval(true, false), Some(ApprovalTarget::Jocx));
        assert_eq!(next_approval(false, true), Some(ApprovalTarget::Usdt));
    }

    #[test]
    fn test_covered_allowances_need_no_approval() {
        assert_eq!(next_approval(false, false), None);
    }
}
