// src/pools.rs

use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};

/// A token as listed in pool metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub address: Address,
    pub decimals: u8,
}

/// Raw physical-pool metadata as delivered by the pool-metadata provider.
///
/// This is the loosely structured input of the virtual pool pipeline: every
/// Balancer pool in a batch arrives in this shape, whatever its type. The typed
/// views (`LinearPool`, `PhantomPool`) are derived from it on demand.
///
/// Field names follow the Balancer subgraph (`poolType`, `mainIndex`, ...), so a
/// subgraph page deserializes straight into `Vec<PoolDescriptor>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolDescriptor {
    /// Balancer pool id (bytes32)
    pub id: H256,
    /// Pool contract address, which is also the address of its pool token (BPT)
    pub address: Address,
    /// Protocol pool type tag (e.g. "AaveLinear", "StablePhantom")
    pub pool_type: String,
    /// Tokens in Vault order
    pub tokens: Vec<TokenDescriptor>,
    /// Index of the main token (linear pools only)
    #[serde(default)]
    pub main_index: Option<usize>,
    /// Index of the wrapped token (linear pools only)
    #[serde(default)]
    pub wrapped_index: Option<usize>,
}

impl PoolDescriptor {
    pub fn kind(&self) -> PoolKind {
        PoolKind::from_pool_type(&self.pool_type)
    }
}

/// Pool families relevant to virtual pool discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    /// Wraps one main token (`AaveLinear`, `ERC4626Linear`, ...)
    Linear,
    /// Aggregates the pool tokens of linear pools (`StablePhantom`, `ComposableStable`)
    Phantom,
    /// Anything else; ignored by the virtual pool pipeline
    Other,
}

impl PoolKind {
    pub fn from_pool_type(pool_type: &str) -> Self {
        match pool_type {
            "StablePhantom" | "ComposableStable" => PoolKind::Phantom,
            t if t.ends_with("Linear") => PoolKind::Linear,
            _ => PoolKind::Other,
        }
    }
}

/// A linear pool: wraps exactly one main token into its pool token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearPool {
    pub id: H256,
    pub address: Address,
    pub tokens: Vec<TokenDescriptor>,
    pub main_index: usize,
    pub wrapped_index: usize,
}

impl LinearPool {
    /// Builds the typed view of a linear pool.
    ///
    /// Returns `None` when the descriptor is not a linear pool or when its main or
    /// wrapped index does not point into its token list.
    pub fn from_descriptor(descriptor: &PoolDescriptor) -> Option<Self> {
        if descriptor.kind() != PoolKind::Linear {
            return None;
        }
        let main_index = descriptor.main_index?;
        let wrapped_index = descriptor.wrapped_index?;
        let len = descriptor.tokens.len();
        if main_index >= len || wrapped_index >= len || main_index == wrapped_index {
            return None;
        }
        Some(Self {
            id: descriptor.id,
            address: descriptor.address,
            tokens: descriptor.tokens.clone(),
            main_index,
            wrapped_index,
        })
    }

    pub fn main_token(&self) -> &TokenDescriptor {
        &self.tokens[self.main_index]
    }

    pub fn wrapped_token(&self) -> &TokenDescriptor {
        &self.tokens[self.wrapped_index]
    }

    /// The pool token this pool issues; it is what the phantom pool holds.
    pub fn pool_token(&self) -> Address {
        self.address
    }
}

/// A phantom pool: its token set is made of linear pool tokens (plus its own BPT).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhantomPool {
    pub id: H256,
    pub address: Address,
    pub tokens: Vec<Address>,
}

impl PhantomPool {
    pub fn from_descriptor(descriptor: &PoolDescriptor) -> Option<Self> {
        if descriptor.kind() != PoolKind::Phantom {
            return None;
        }
        Some(Self {
            id: descriptor.id,
            address: descriptor.address,
            tokens: descriptor.tokens.iter().map(|t| t.address).collect(),
        })
    }

    pub fn contains(&self, token: &Address) -> bool {
        self.tokens.contains(token)
    }
}
