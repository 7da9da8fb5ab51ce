//! # Router Module
//!
//! Batched-swap primitives shared by the virtual pool compiler and the Vault encoder.
//! A `SwapPlan` mirrors the arguments of the Balancer Vault `batchSwap` call: an asset
//! list, a list of hops that reference assets by index, and one limit per asset.

use ethers::types::{Address, Bytes, H256, I256, U256};
use serde::Serialize;

/// Amount carried by every hop after the first one. The Vault reads a zero amount
/// as "consume the full output of the previous step".
pub const CHAINED_AMOUNT: U256 = U256::zero();

/// Per-asset limit meaning "no limit enforced by the plan".
pub const UNBOUNDED_LIMIT: I256 = I256::MAX;

/// Vault swap kind, encoded as `uint8` in `batchSwap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SwapKind {
    GivenIn = 0,
    GivenOut = 1,
}

/// Direction of a pricing request from the router's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SwapSide {
    /// The amount is what the user sells (exact input)
    Sell,
    /// The amount is what the user buys (exact output)
    Buy,
}

impl SwapSide {
    pub fn kind(self) -> SwapKind {
        match self {
            SwapSide::Sell => SwapKind::GivenIn,
            SwapSide::Buy => SwapKind::GivenOut,
        }
    }
}

impl std::fmt::Display for SwapSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapSide::Sell => write!(f, "SELL"),
            SwapSide::Buy => write!(f, "BUY"),
        }
    }
}

/// One hop of a batched swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapStep {
    /// Physical pool executing this hop
    pub pool_id: H256,
    /// Index of the input asset in `SwapPlan::assets`
    pub asset_in_index: usize,
    /// Index of the output asset in `SwapPlan::assets`
    pub asset_out_index: usize,
    /// Requested amount, or `CHAINED_AMOUNT`
    pub amount: U256,
    /// Pool-specific payload (empty for linear and phantom pools)
    pub user_data: Bytes,
}

impl SwapStep {
    pub fn is_chained(&self) -> bool {
        self.amount == CHAINED_AMOUNT
    }
}

/// A compiled multi-hop execution plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPlan {
    pub assets: Vec<Address>,
    pub swaps: Vec<SwapStep>,
    pub limits: Vec<I256>,
}

impl SwapPlan {
    pub fn token_in(&self) -> Option<Address> {
        self.assets.first().copied()
    }

    pub fn token_out(&self) -> Option<Address> {
        self.assets.last().copied()
    }

    /// Amount carried by the first hop.
    pub fn requested_amount(&self) -> U256 {
        self.swaps.first().map(|s| s.amount).unwrap_or_default()
    }

    /// Checks the structural invariants every compiled plan upholds: one more asset
    /// than hops, one limit per asset, hops chained left to right and only the first
    /// hop carrying an amount.
    pub fn is_well_formed(&self) -> bool {
        if self.swaps.is_empty()
            || self.assets.len() != self.swaps.len() + 1
            || self.limits.len() != self.assets.len()
        {
            return false;
        }
        self.swaps.iter().enumerate().all(|(i, step)| {
            step.asset_in_index == i
                && step.asset_out_index == i + 1
                && (i == 0) != step.is_chained()
        })
    }

    /// Route identifier built from the hop pool ids, used in logs.
    pub fn route_id(&self) -> String {
        self.swaps
            .iter()
            .map(|s| format!("{:#x}", s.pool_id))
            .collect::<Vec<_>>()
            .join("-")
    }
}
