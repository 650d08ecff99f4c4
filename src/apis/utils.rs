use std::time::{SystemTime, UNIX_EPOCH};

use alloy::transports::TransportErrorKind;
use alloy_eips::BlockId;
use alloy_json_rpc::RpcError;
use alloy_primitives::{Address, TxHash, TxKind, U256};
use alloy_provider::Provider;
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;
use tracing::debug;

use crate::types::errors::JocxSdkError;

pub(crate) async fn view_call<P, IC>(
    provider: &P,
    block_number: Option<u64>,
    contract: Address,
    call: IC
) -> Result<Result<IC::Return, alloy_sol_types::Error>, RpcError<TransportErrorKind>>
where
    P: Provider,
    IC: SolCall + Send
{
    let tx = TransactionRequest {
        to: Some(TxKind::Call(contract)),
        input: TransactionInput::both(call.abi_encode().into()),
        ..Default::default()
    };

    let data = provider
        .call(tx)
        .block(block_number.map(Into::into).unwrap_or(BlockId::latest()))
        .await?;
    Ok(IC::abi_decode_returns(&data))
}

/// Submits a state-changing call and waits for its receipt. A mined-but-
/// reverted transaction is an error, same as a transport failure.
pub(crate) async fn send_call<P, IC>(
    provider: &P,
    from: Address,
    contract: Address,
    call: IC
) -> Result<TxHash, JocxSdkError>
where
    P: Provider,
    IC: SolCall + Send
{
    let tx = TransactionRequest {
        from: Some(from),
        to: Some(TxKind::Call(contract)),
        input: TransactionInput::both(call.abi_encode().into()),
        ..Default::default()
    };

    let receipt = provider.send_transaction(tx).await?.get_receipt().await?;
    debug!(tx_hash = %receipt.transaction_hash, status = receipt.status(), "transaction mined");

    if !receipt.status() {
        return Err(JocxSdkError::TxReverted(receipt.transaction_hash));
    }
    Ok(receipt.transaction_hash)
}

/// Absolute unix-seconds expiry `secs` from now, for call deadlines.
pub(crate) fn deadline_from_now(secs: u64) -> U256 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    U256::from(now + secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_is_in_the_future() {
        let deadline = deadline_from_now(1800);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        assert!(deadline >= U256::from(now + 1790));
        assert!(deadline <= U256::from(now + 1810));
    }
}
