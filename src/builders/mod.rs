mod liquidity;
pub use liquidity::{LiquidityCall, LiquidityCallBuilder, LiquidityTarget, parse_amount};
