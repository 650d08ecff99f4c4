use alloy_primitives::{Address, TxHash, U256, utils::format_units};
use alloy_provider::Provider;
use tracing::warn;

use super::status::ActionState;
use crate::{
    apis::{JocxDataApi, utils::send_call},
    builders::parse_amount,
    types::{TokenInfo, contract_bindings::erc20, errors::JocxSdkError}
};

/// Tracks one token's allowance against a fixed spender and runs the
/// approval transaction when the allowance falls short.
#[derive(Debug, Clone)]
pub struct ApprovalCoordinator {
    token:     TokenInfo,
    spender:   Address,
    allowance: U256,
    state:     ActionState
}

impl ApprovalCoordinator {
    pub fn new(token: TokenInfo, spender: Address) -> Self {
        Self { token, spender, allowance: U256::ZERO, state: ActionState::default() }
    }

    pub fn token(&self) -> &TokenInfo {
        &self.token
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn allowance_raw(&self) -> U256 {
        self.allowance
    }

    /// Current allowance as a decimal string in token units.
    pub fn allowance(&self) -> String {
        format_units(self.allowance, self.token.decimals).unwrap_or_else(|_| "0".to_string())
    }

    /// Whether the cached allowance covers `amount` (a decimal string).
    /// The amount is scaled to raw units before comparing, so both sides sit
    /// on the same integer scale; an exactly-equal allowance suffices.
    pub fn has_allowance(&self, amount: &str) -> Result<bool, JocxSdkError> {
        let needed = parse_amount(amount, self.token.decimals)?;
        Ok(self.allowance >= needed)
    }

    /// Re-reads the allowance from the chain.
    pub async fn refresh<P: Provider>(&mut self, provider: &P, owner: Address) -> eyre::Result<()> {
        self.allowance = provider
            .token_allowance(self.token.address, owner, self.spender, None)
            .await?;
        Ok(())
    }

    /// Submits an approval for `amount` and waits for the receipt. The
    /// amount is scaled by the token's on-chain decimal count. On success
    /// the allowance is re-read so callers see the post-approval value.
    pub async fn approve<P: Provider>(
        &mut self,
        provider: &P,
        owner: Address,
        amount: &str
    ) -> eyre::Result<TxHash> {
        self.state.begin("approval")?;

        match self.submit_approval(provider, owner, amount).await {
            Ok(tx_hash) => {
                self.state.complete();
                if let Err(err) = self.refresh(provider, owner).await {
                    warn!(token = self.token.symbol, %err, "allowance re-read failed");
                }
                Ok(tx_hash)
            }
            Err(err) => {
                self.state.fail();
                Err(err)
            }
        }
    }

    async fn submit_approval<P: Provider>(
        &self,
        provider: &P,
        owner: Address,
        amount: &str
    ) -> eyre::Result<TxHash> {
        let decimals = provider.token_decimals(self.token.address, None).await?;
        let raw = parse_amount(amount, decimals)?;

        Ok(send_call(
            provider,
            owner,
            self.token.address,
            erc20::approveCall { spender: self.spender, amount: raw }
        )
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::JOCX_CONSTANTS_MAINNET;

    fn usdt_coordinator(allowance: U256) -> ApprovalCoordinator {
        let cfg = JOCX_CONSTANTS_MAINNET;
        let mut coordinator = ApprovalCoordinator::new(cfg.pair().usdt, cfg.position_manager());
        coordinator.allowance = allowance;
        coordinator
    }

    #[test]
    fn test_has_allowance_equality_counts() {
        let coordinator = usdt_coordinator(U256::from(50_000_000u64));

        assert!(coordinator.has_allowance("49.999999").unwrap());
        assert!(coordinator.has_allowance("50").unwrap());
        assert!(!coordinator.has_allowance("50.000001").unwrap());
    }

    #[test]
    fn test_allowance_renders_in_token_units() {
        let coordinator = usdt_coordinator(U256::from(1_250_000u64));
        assert_eq!(coordinator.allowance(), "1.250000");
    }

    #[test]
    fn test_has_allowance_rejects_garbage_amounts() {
        let coordinator = usdt_coordinator(U256::from(1u8));
        assert!(coordinator.has_allowance("not a number").is_err());
    }
}
