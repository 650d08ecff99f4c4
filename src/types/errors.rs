use alloy::transports::TransportErrorKind;
use alloy_json_rpc::RpcError;
use alloy_primitives::{TxHash, utils::UnitsError};

#[derive(Debug, thiserror::Error)]
pub enum JocxSdkError {
    #[error("eth call error: {0:?}")]
    EthCall(#[from] RpcError<TransportErrorKind>),
    #[error("abi error: {0:?}")]
    Abi(#[from] alloy_sol_types::Error),
    #[error("receipt error: {0:?}")]
    Receipt(#[from] alloy_provider::PendingTransactionError),
    #[error("transaction {0} reverted")]
    TxReverted(TxHash),
    #[error("tick math error: {0:?}")]
    TickMath(#[from] uniswap_v3_math::error::UniswapV3MathError),
    #[error("invalid token amount: {0:?}")]
    InvalidAmount(#[from] UnitsError),
    #[error("token amount must be a positive decimal")]
    NonPositiveAmount,
    #[error("both token amounts are required")]
    MissingAmount,
    #[error("wallet is not connected")]
    WalletNotConnected,
    #[error("a {0} transaction is already pending")]
    ActionInFlight(&'static str),
    #[error("no rewards available to claim")]
    NothingToClaim
}
