use alloy_primitives::Address;
use serde::Serialize;

/// A token the system trades in: contract identity plus display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    pub address:  Address,
    pub decimals: u8,
    pub symbol:   &'static str
}

/// The fixed JOCX/USDT pair. Which side is token0 in pool and position math
/// is decided by lexicographic address order, never by argument order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CanonicalPair {
    pub jocx: TokenInfo,
    pub usdt: TokenInfo
}

impl CanonicalPair {
    pub fn new(jocx: TokenInfo, usdt: TokenInfo) -> Self {
        Self { jocx, usdt }
    }

    pub fn jocx_is_token0(&self) -> bool {
        sort_tokens(self.jocx.address, self.usdt.address).0 == self.jocx.address
    }

    pub fn token0(&self) -> &TokenInfo {
        if self.jocx_is_token0() { &self.jocx } else { &self.usdt }
    }

    pub fn token1(&self) -> &TokenInfo {
        if self.jocx_is_token0() { &self.usdt } else { &self.jocx }
    }

    /// Whether `(a, b)` is this pair, in either order.
    pub fn matches(&self, a: Address, b: Address) -> bool {
        (a == self.jocx.address && b == self.usdt.address)
            || (a == self.usdt.address && b == self.jocx.address)
    }
}

pub(crate) fn sort_tokens(token0: Address, token1: Address) -> (Address, Address) {
    if token0 < token1 { (token0, token1) } else { (token1, token0) }
}

/// `$1.2B` / `$3.4M` / `$5.6K` style rendering for dashboard figures.
pub fn format_usd_compact(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("${:.1}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${value:.0}")
    }
}
