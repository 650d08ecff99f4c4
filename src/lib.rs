#![allow(async_fn_in_trait)]
#![allow(clippy::too_many_arguments)]

pub mod apis;
pub use providers::JocxApi;

pub mod actions;
pub mod builders;
pub mod constants;
pub mod math;
pub mod providers;
pub mod stats;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
