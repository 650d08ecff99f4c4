use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use itertools::Itertools;
use tracing::warn;

use super::{data_api::JocxDataApi, utils::view_call};
use crate::{
    constants::JocxConstants,
    types::{LiquidityPosition, contract_bindings::position_manager, filter_canonical}
};

/// Position inventory for a connected account: NFT enumeration and the
/// filtered JOCX/USDT position list.
#[async_trait::async_trait]
pub trait JocxUserApi: JocxDataApi {
    async fn position_count(
        &self,
        cfg: &JocxConstants,
        owner: Address,
        block_number: Option<u64>
    ) -> eyre::Result<u64>;

    /// Token ids owned by `owner`, in enumeration order. Ids whose lookup
    /// fails are dropped rather than failing the whole enumeration.
    async fn position_token_ids(
        &self,
        cfg: &JocxConstants,
        owner: Address,
        block_number: Option<u64>
    ) -> eyre::Result<Vec<U256>>;

    async fn position_details(
        &self,
        cfg: &JocxConstants,
        token_id: U256,
        block_number: Option<u64>
    ) -> eyre::Result<LiquidityPosition>;

    /// All of `owner`'s positions in the canonical pair (either token order)
    /// that still hold liquidity. `None` for the owner means disconnected and
    /// yields an empty list, as does a zero NFT balance.
    async fn all_user_positions(
        &self,
        cfg: &JocxConstants,
        owner: Option<Address>,
        block_number: Option<u64>
    ) -> eyre::Result<Vec<LiquidityPosition>> {
        let Some(owner) = owner else {
            return Ok(Vec::new());
        };

        let token_ids = self.position_token_ids(cfg, owner, block_number).await?;
        if token_ids.is_empty() {
            return Ok(Vec::new());
        }

        let details = futures::future::join_all(
            token_ids
                .iter()
                .map(|token_id| self.position_details(cfg, *token_id, block_number))
        )
        .await;

        let positions = token_ids
            .into_iter()
            .zip(details)
            .filter_map(|(token_id, result)| match result {
                Ok(position) => Some(position),
                Err(err) => {
                    warn!(%token_id, %err, "dropping unreadable position");
                    None
                }
            })
            .collect_vec();

        Ok(filter_canonical(positions, &cfg.pair()))
    }
}

#[async_trait::async_trait]
impl<P: Provider> JocxUserApi for P {
    async fn position_count(
        &self,
        cfg: &JocxConstants,
        owner: Address,
        block_number: Option<u64>
    ) -> eyre::Result<u64> {
        let balance = view_call(
            self,
            block_number,
            cfg.position_manager(),
            position_manager::balanceOfCall { owner }
        )
        .await??;

        Ok(u64::try_from(balance).unwrap_or(u64::MAX))
    }

    async fn position_token_ids(
        &self,
        cfg: &JocxConstants,
        owner: Address,
        block_number: Option<u64>
    ) -> eyre::Result<Vec<U256>> {
        let count = self.position_count(cfg, owner, block_number).await?;

        let lookups = futures::future::join_all((0..count).map(|index| async move {
            view_call(
                self,
                block_number,
                cfg.position_manager(),
                position_manager::tokenOfOwnerByIndexCall { owner, index: U256::from(index) }
            )
            .await
        }))
        .await;

        Ok(lookups
            .into_iter()
            .enumerate()
            .filter_map(|(index, result)| match result {
                Ok(Ok(token_id)) => Some(token_id),
                Ok(Err(err)) => {
                    warn!(index, %err, "dropping undecodable token id");
                    None
                }
                Err(err) => {
                    warn!(index, %err, "dropping unreadable token id");
                    None
                }
            })
            .collect_vec())
    }

    async fn position_details(
        &self,
        cfg: &JocxConstants,
        token_id: U256,
        block_number: Option<u64>
    ) -> eyre::Result<LiquidityPosition> {
        let fields = view_call(
            self,
            block_number,
            cfg.position_manager(),
            position_manager::positionsCall { tokenId: token_id }
        )
        .await??;

        Ok(LiquidityPosition {
            token_id,
            token0: fields.token0,
            token1: fields.token1,
            fee: fields.fee.to::<u32>(),
            tick_lower: fields.tickLower.as_i32(),
            tick_upper: fields.tickUpper.as_i32(),
            liquidity: fields.liquidity,
            tokens_owed0: fields.tokensOwed0,
            tokens_owed1: fields.tokensOwed1
        })
    }
}
