use ethers::types::{Address, H256};
use tracing::debug;

use super::{phantom_pool_id, VirtualPoolDescriptor, VirtualPoolError, VirtualPoolSnapshot};

/// Pair-specific context for quoting through a virtual pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairContext {
    pub virtual_pool_id: String,
    pub phantom_pool_id: H256,
    pub token_in: Address,
    pub token_out: Address,
    /// Decimals of `token_in`, if it is a main token of the pool
    pub token_in_decimals: Option<u8>,
    /// Decimals of `token_out`, if it is a main token of the pool
    pub token_out_decimals: Option<u8>,
}

impl PairContext {
    pub fn is_member_pair(&self) -> bool {
        self.token_in_decimals.is_some() && self.token_out_decimals.is_some()
    }
}

/// Resolves the context for `token_in -> token_out` through `descriptor`.
///
/// Token membership is not checked here: non-member tokens resolve with `None`
/// decimals and are rejected later by the liquidity gate or the path compiler.
pub fn resolve_pair(
    snapshot: &VirtualPoolSnapshot,
    descriptor: &VirtualPoolDescriptor,
    token_in: Address,
    token_out: Address,
) -> Result<PairContext, VirtualPoolError> {
    let unknown = || VirtualPoolError::UnknownVirtualPool {
        pool_id: descriptor.id.clone(),
    };

    let info = snapshot.get(&descriptor.id).ok_or_else(|| {
        debug!("Pair resolution for unknown virtual pool {}", descriptor.id);
        unknown()
    })?;
    let phantom_pool_id = phantom_pool_id(&descriptor.id).ok_or_else(unknown)?;

    Ok(PairContext {
        virtual_pool_id: descriptor.id.to_lowercase(),
        phantom_pool_id,
        token_in,
        token_out,
        token_in_decimals: info.main_token(&token_in).map(|t| t.decimals),
        token_out_decimals: info.main_token(&token_out).map(|t| t.decimals),
    })
}
