//! Fail-closed reserve admission for virtual pools.
//!
//! A pool is only admitted for quoting when the supplied reserves show that the
//! output side can cover the request. Missing information rejects the pool.

use ethers::types::{Address, U256};
use std::collections::HashMap;
use tracing::debug;

use super::{PairContext, VirtualPoolError};
use crate::router::SwapSide;

/// Known main-token reserves of a virtual pool, keyed by main-token address.
///
/// For a virtual pool the relevant reserve of a main token is its balance inside
/// the linear pool wrapping it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReserves {
    balances: HashMap<Address, U256>,
}

impl PoolReserves {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, token: Address, balance: U256) {
        self.balances.insert(token, balance);
    }

    pub fn with(mut self, token: Address, balance: U256) -> Self {
        self.insert(token, balance);
        self
    }

    pub fn get(&self, token: &Address) -> Option<U256> {
        self.balances.get(token).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

impl FromIterator<(Address, U256)> for PoolReserves {
    fn from_iter<I: IntoIterator<Item = (Address, U256)>>(iter: I) -> Self {
        Self {
            balances: iter.into_iter().collect(),
        }
    }
}

/// Admits `pair` for a request of `amount` on `side`.
///
/// `Buy` amounts are in `token_out` units and must stay strictly below the
/// `token_out` reserve. `Sell` amounts are in `token_in` units; they are rescaled
/// to `token_out` decimals at par (boosted pools hold pegged assets) and must stay
/// strictly below the `token_out` reserve.
pub fn check_liquidity(
    reserves: &PoolReserves,
    amount: U256,
    side: SwapSide,
    pair: &PairContext,
) -> Result<(), VirtualPoolError> {
    let reject = |reason: &str| {
        debug!(
            "Virtual pool {} rejected for {} {:?}->{:?}: {}",
            pair.virtual_pool_id, side, pair.token_in, pair.token_out, reason
        );
        crate::metrics::record_liquidity_rejection();
        VirtualPoolError::LiquidityUnavailable {
            pool_id: pair.virtual_pool_id.clone(),
            reason: reason.to_string(),
        }
    };

    if reserves.is_empty() {
        return Err(reject("no reserve information"));
    }
    let (decimals_in, decimals_out) = match (pair.token_in_decimals, pair.token_out_decimals) {
        (Some(d_in), Some(d_out)) => (d_in, d_out),
        _ => return Err(reject("token pair is not served by this pool")),
    };
    let reserve_out = reserves
        .get(&pair.token_out)
        .ok_or_else(|| reject("no reserve for token out"))?;

    let required_out = match side {
        SwapSide::Buy => Some(amount),
        SwapSide::Sell => rescale(amount, decimals_in, decimals_out),
    }
    .ok_or_else(|| reject("requested amount overflows"))?;

    if required_out >= reserve_out {
        return Err(reject("insufficient reserve for token out"));
    }
    Ok(())
}

/// Boolean form of [`check_liquidity`].
pub fn is_usable(reserves: &PoolReserves, amount: U256, side: SwapSide, pair: &PairContext) -> bool {
    check_liquidity(reserves, amount, side, pair).is_ok()
}

fn rescale(amount: U256, from_decimals: u8, to_decimals: u8) -> Option<U256> {
    if from_decimals >= to_decimals {
        let factor = U256::from(10u8).checked_pow(U256::from(from_decimals - to_decimals))?;
        Some(amount / factor)
    } else {
        let factor = U256::from(10u8).checked_pow(U256::from(to_decimals - from_decimals))?;
        amount.checked_mul(factor)
    }
}
