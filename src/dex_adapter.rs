//! # DEX Adapter Trait
//!
//! This module defines the abstraction the pricing pipeline uses to talk to a
//! liquidity protocol. An adapter lists the pools it can quote, compiles the swap
//! plan for a pair and reports achievable prices for candidate amounts.
//!
//! ## Refresh cycle
//!
//! The pipeline hands every adapter the latest batch of physical-pool metadata
//! once per cycle through [`DexAdapter::refresh`]. Adapters rebuild their view
//! from scratch; requests issued during the cycle read that view only.
//!
//! ## Example
//!
//! ```rust,no_run
//! use boosted_pool_router::dex_adapter::DexAdapter;
//! use boosted_pool_router::pools::PoolDescriptor;
//! use boosted_pool_router::router::SwapSide;
//! use ethers::types::U256;
//!
//! async fn quote(adapter: &dyn DexAdapter, batch: &[PoolDescriptor]) -> anyhow::Result<()> {
//!     adapter.refresh(batch);
//!     for pool in adapter.list_pools() {
//!         let (a, b) = (pool.tokens[0].address, pool.tokens[1].address);
//!         let prices = adapter
//!             .query_prices(&pool.id, a, b, &[U256::exp10(18)], SwapSide::Sell)
//!             .await?;
//!         println!("{} {:?}", pool.id, prices);
//!     }
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use async_trait::async_trait;
use ethers::types::{Address, U256};

use crate::pools::PoolDescriptor;
use crate::router::{SwapPlan, SwapSide};
use crate::virtual_pool::VirtualPoolDescriptor;

/// The main trait for protocol adapters.
///
/// All adapters must be `Send + Sync`: one adapter instance serves concurrent
/// pricing requests.
#[async_trait]
pub trait DexAdapter: Send + Sync {
    /// Returns the name of the protocol, used for logging.
    fn name(&self) -> &'static str;

    /// Rebuilds the adapter state from a fresh metadata batch and returns the
    /// number of pools it now lists.
    fn refresh(&self, pools: &[PoolDescriptor]) -> usize;

    /// Pools this adapter can quote, shaped like physical pool listings.
    fn list_pools(&self) -> Vec<VirtualPoolDescriptor>;

    /// Compiles the execution plan for swapping `amount` of `token_in` into
    /// `token_out` through `pool_id`.
    fn swap_plan(
        &self,
        pool_id: &str,
        token_in: Address,
        token_out: Address,
        amount: U256,
    ) -> Result<SwapPlan>;

    /// Prices each of `amounts`. A zero entry means the amount cannot be served.
    async fn query_prices(
        &self,
        pool_id: &str,
        token_in: Address,
        token_out: Address,
        amounts: &[U256],
        side: SwapSide,
    ) -> Result<Vec<U256>>;
}
