//! Batched-swap plan compilation for virtual boosted pools.
//!
//! Every main token reaches the phantom pool only through its own linear pool, so a
//! trade between two distinct main tokens is always three hops:
//!
//! ```text
//! token_in --[linear(in)]--> bpt(in) --[phantom]--> bpt(out) --[linear(out)]--> token_out
//! ```
//!
//! Only the first hop carries the requested amount. The two later hops carry
//! `CHAINED_AMOUNT` so the Vault feeds each of them the previous hop's output.

use ethers::types::{Address, Bytes, H256, U256};
use tracing::debug;

use super::{MainToken, VirtualPoolDictionary, VirtualPoolError};
use crate::router::{SwapPlan, SwapStep, CHAINED_AMOUNT, UNBOUNDED_LIMIT};

/// Compiles the plan for swapping `amount` of `token_in` into `token_out` through
/// virtual pool `virtual_pool_id`.
///
/// Fails without a partial plan when the pool id is unknown, when either token is
/// not a main token of the pool, when both tokens are the same, or when `amount`
/// is zero.
pub fn compile_swap_plan(
    dictionary: &VirtualPoolDictionary,
    virtual_pool_id: &str,
    token_in: Address,
    token_out: Address,
    amount: U256,
) -> Result<SwapPlan, VirtualPoolError> {
    let result = compile(dictionary, virtual_pool_id, token_in, token_out, amount);
    match &result {
        Ok(plan) => {
            debug!("Compiled {} hop plan {} for {}", plan.swaps.len(), plan.route_id(), virtual_pool_id);
            crate::metrics::record_swap_plan("ok");
        }
        Err(e) => {
            debug!("Swap plan compilation failed: {}", e);
            crate::metrics::record_swap_plan(e.kind());
        }
    }
    result
}

fn compile(
    dictionary: &VirtualPoolDictionary,
    virtual_pool_id: &str,
    token_in: Address,
    token_out: Address,
    amount: U256,
) -> Result<SwapPlan, VirtualPoolError> {
    let info = dictionary
        .get(virtual_pool_id)
        .or_else(|| dictionary.get(&virtual_pool_id.to_lowercase()))
        .ok_or_else(|| VirtualPoolError::InvalidVirtualPoolId {
            pool_id: virtual_pool_id.to_string(),
        })?;

    let find = |token: Address| -> Result<&MainToken, VirtualPoolError> {
        info.main_token(&token).ok_or_else(|| VirtualPoolError::TokenMissing {
            pool_id: virtual_pool_id.to_string(),
            token,
        })
    };
    let main_in = find(token_in)?;
    let main_out = find(token_out)?;
    if token_in == token_out {
        return Err(VirtualPoolError::IdenticalTokens {
            pool_id: virtual_pool_id.to_string(),
            token: token_in,
        });
    }
    // The first hop must carry a real amount; zero means "chain" to the Vault.
    if amount.is_zero() {
        return Err(VirtualPoolError::ZeroAmount {
            pool_id: virtual_pool_id.to_string(),
        });
    }

    let assets = vec![token_in, main_in.pool_token(), main_out.pool_token(), token_out];
    let swaps = vec![
        hop(main_in.linear_pool_id, 0, amount),
        hop(info.phantom_pool_id, 1, CHAINED_AMOUNT),
        hop(main_out.linear_pool_id, 2, CHAINED_AMOUNT),
    ];
    let limits = vec![UNBOUNDED_LIMIT; assets.len()];

    Ok(SwapPlan {
        assets,
        swaps,
        limits,
    })
}

fn hop(pool_id: H256, asset_in_index: usize, amount: U256) -> SwapStep {
    SwapStep {
        pool_id,
        asset_in_index,
        asset_out_index: asset_in_index + 1,
        amount,
        user_data: Bytes::default(),
    }
}
