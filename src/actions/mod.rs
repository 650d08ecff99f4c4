pub(crate) mod approval;
pub(crate) mod liquidity;
pub(crate) mod staking;
pub(crate) mod status;

pub use approval::ApprovalCoordinator;
pub use liquidity::{ApprovalTarget, DepositKind, LiquidityFlow, LiquidityOutcome, next_approval};
pub use staking::{ClaimOutcome, StakeOutcome, StakingActions, can_claim};
pub use status::ActionState;
