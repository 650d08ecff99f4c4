//! ABI surfaces consumed on-chain. Call structs are encoded with
//! [`alloy_sol_types::SolCall`] and dispatched through the shared
//! `view_call`/`send_call` helpers.

pub mod erc20 {
    alloy::sol! {
        function totalSupply() returns (uint256);
        function balanceOf(address account) returns (uint256 balance);
        function decimals() returns (uint8);
        function allowance(address owner, address spender) returns (uint256);
        function approve(address spender, uint256 amount) returns (bool success);
    }
}

pub mod uniswap_v3_factory {
    alloy::sol! {
        function getPool(address tokenA, address tokenB, uint24 fee) returns (address pool);
    }
}

pub mod uniswap_v3_pool {
    alloy::sol! {
        function slot0() returns (
            uint160 sqrtPriceX96,
            int24 tick,
            uint16 observationIndex,
            uint16 observationCardinality,
            uint16 observationCardinalityNext,
            uint8 feeProtocol,
            bool unlocked
        );
        function liquidity() returns (uint128);
        function token0() returns (address);
        function token1() returns (address);
        function fee() returns (uint24);
    }
}

pub mod position_manager {
    alloy::sol! {
        struct MintParams {
            address token0;
            address token1;
            uint24 fee;
            int24 tickLower;
            int24 tickUpper;
            uint256 amount0Desired;
            uint256 amount1Desired;
            uint256 amount0Min;
            uint256 amount1Min;
            address recipient;
            uint256 deadline;
        }

        struct IncreaseLiquidityParams {
            uint256 tokenId;
            uint256 amount0Desired;
            uint256 amount1Desired;
            uint256 amount0Min;
            uint256 amount1Min;
            uint256 deadline;
        }

        function balanceOf(address owner) returns (uint256 balance);
        function totalSupply() returns (uint256);
        function tokenOfOwnerByIndex(address owner, uint256 index) returns (uint256 tokenId);
        function positions(uint256 tokenId) returns (
            uint96 nonce,
            address operator,
            address token0,
            address token1,
            uint24 fee,
            int24 tickLower,
            int24 tickUpper,
            uint128 liquidity,
            uint256 feeGrowthInside0LastX128,
            uint256 feeGrowthInside1LastX128,
            uint128 tokensOwed0,
            uint128 tokensOwed1
        );
        function mint(MintParams calldata params) returns (
            uint256 tokenId,
            uint128 liquidity,
            uint256 amount0,
            uint256 amount1
        );
        function increaseLiquidity(IncreaseLiquidityParams calldata params) returns (
            uint128 liquidity,
            uint256 amount0,
            uint256 amount1
        );
    }
}

pub mod v3_staker {
    alloy::sol! {
        function stakeToken(bytes32 incentiveId, uint256 tokenId);
        function unstakeToken(bytes32 incentiveId, uint256 tokenId);
        function claimReward(address rewardToken, address to, uint256 amountRequested) returns (uint256 reward);
        function rewards(address rewardToken, address owner) returns (uint256 rewardsOwed);
    }
}
