use ethers::types::Address;

/// Reasons a virtual pool cannot serve a request.
///
/// Every variant means "exclude this pool and keep evaluating alternatives"; none of
/// them is worth retrying against the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VirtualPoolError {
    #[error("unknown virtual pool {pool_id}")]
    UnknownVirtualPool { pool_id: String },
    #[error("invalid virtual pool id {pool_id}")]
    InvalidVirtualPoolId { pool_id: String },
    #[error("token {token:?} is not a main token of virtual pool {pool_id}")]
    TokenMissing { pool_id: String, token: Address },
    #[error("token in and token out are both {token:?} in virtual pool {pool_id}")]
    IdenticalTokens { pool_id: String, token: Address },
    #[error("zero amount requested from virtual pool {pool_id}")]
    ZeroAmount { pool_id: String },
    #[error("liquidity unavailable in virtual pool {pool_id}: {reason}")]
    LiquidityUnavailable { pool_id: String, reason: String },
}

impl VirtualPoolError {
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            VirtualPoolError::UnknownVirtualPool { .. } => "unknown_virtual_pool",
            VirtualPoolError::InvalidVirtualPoolId { .. } => "invalid_virtual_pool_id",
            VirtualPoolError::TokenMissing { .. } => "token_missing",
            VirtualPoolError::IdenticalTokens { .. } => "identical_tokens",
            VirtualPoolError::ZeroAmount { .. } => "zero_amount",
            VirtualPoolError::LiquidityUnavailable { .. } => "liquidity_unavailable",
        }
    }
}
