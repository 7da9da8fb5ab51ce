//! # Virtual Boosted Pools
//!
//! A virtual boosted pool exposes direct main-token to main-token trading across a
//! phantom pool and the linear pools feeding it. None of it exists on-chain: the
//! pool is synthesized from a batch of physical-pool metadata and every trade is
//! compiled into a three-hop batched swap (linear in, phantom, linear out).
//!
//! ## Lifecycle
//!
//! Each refresh cycle builds a fresh [`VirtualPoolSnapshot`] from the metadata batch.
//! The snapshot is immutable; requests hold an `Arc` to it for their whole lifetime
//! while [`SnapshotStore`] swaps in the next one at the cycle boundary.
//!
//! ## Pipeline
//!
//! - [`topology`]: discovers phantom/linear topology and builds the dictionary
//! - [`descriptor`]: synthesizes listing entries for the pricing pipeline
//! - [`pair`]: resolves pair context for a quote request
//! - [`liquidity`]: fail-closed reserve admission check
//! - [`path`]: compiles the batched-swap plan

pub mod descriptor;
pub mod error;
pub mod liquidity;
pub mod pair;
pub mod path;
pub mod topology;

use arc_swap::ArcSwap;
use ethers::types::{Address, H256};
use indexmap::IndexMap;
use std::str::FromStr;
use std::sync::Arc;

pub use descriptor::VirtualPoolDescriptor;
pub use error::VirtualPoolError;
pub use liquidity::PoolReserves;
pub use pair::PairContext;

/// Pool-type tag of synthesized pools. No physical Balancer pool uses it.
pub const VIRTUAL_BOOSTED_POOL_TYPE: &str = "VirtualBoosted";

/// Appended to the phantom pool id and address to form virtual pool identifiers
/// (lower-cased `VIRTUAL_BOOSTED_POOL_TYPE`).
pub const VIRTUAL_POOL_SUFFIX: &str = "virtualboosted";

/// A real asset reachable through a virtual pool, with the linear pool wrapping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainToken {
    pub address: Address,
    pub decimals: u8,
    pub linear_pool_address: Address,
    pub linear_pool_id: H256,
}

impl MainToken {
    /// The linear pool token, which is how this asset is held by the phantom pool.
    pub fn pool_token(&self) -> Address {
        self.linear_pool_address
    }
}

/// Dictionary entry for one virtual pool.
///
/// `main_tokens` follows the order in which the linear pool tokens appear in the
/// phantom pool's token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualBoostedPoolInfo {
    pub phantom_pool_id: H256,
    pub phantom_pool_address: Address,
    pub main_tokens: Vec<MainToken>,
}

impl VirtualBoostedPoolInfo {
    pub fn main_token(&self, token: &Address) -> Option<&MainToken> {
        self.main_tokens.iter().find(|t| t.address == *token)
    }

    pub fn contains(&self, token: &Address) -> bool {
        self.main_token(token).is_some()
    }
}

/// Virtual pool id -> pool info, in phantom pool discovery order.
pub type VirtualPoolDictionary = IndexMap<String, VirtualBoostedPoolInfo>;

/// `<phantom id><suffix>`, lower-case hex.
pub fn virtual_pool_id(phantom_pool_id: &H256) -> String {
    format!("{:#x}{}", phantom_pool_id, VIRTUAL_POOL_SUFFIX)
}

/// `<phantom address><suffix>`, lower-case hex.
pub fn virtual_pool_address(phantom_pool_address: &Address) -> String {
    format!("{:#x}{}", phantom_pool_address, VIRTUAL_POOL_SUFFIX)
}

/// Recovers the phantom pool id from a virtual pool id.
pub fn phantom_pool_id(virtual_pool_id: &str) -> Option<H256> {
    let normalized = virtual_pool_id.to_lowercase();
    let raw = normalized.strip_suffix(VIRTUAL_POOL_SUFFIX)?;
    H256::from_str(raw).ok()
}

/// Immutable per-cycle view of every virtual pool discoverable in a metadata batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualPoolSnapshot {
    dictionary: VirtualPoolDictionary,
    descriptors: Vec<VirtualPoolDescriptor>,
    skipped_linear_pools: Vec<H256>,
}

impl VirtualPoolSnapshot {
    /// Builds a snapshot from one batch of physical-pool metadata.
    pub fn build(pools: &[crate::pools::PoolDescriptor]) -> Self {
        let index = topology::build_index(pools);
        let descriptors = descriptor::describe(&index.dictionary);
        crate::metrics::record_snapshot_built(descriptors.len(), index.skipped_linear_pools.len());
        Self {
            dictionary: index.dictionary,
            descriptors,
            skipped_linear_pools: index.skipped_linear_pools,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn dictionary(&self) -> &VirtualPoolDictionary {
        &self.dictionary
    }

    pub fn descriptors(&self) -> &[VirtualPoolDescriptor] {
        &self.descriptors
    }

    /// Ids of linear pools dropped during discovery (phantom pool absent from the
    /// batch, or unusable main/wrapped indices).
    pub fn skipped_linear_pools(&self) -> &[H256] {
        &self.skipped_linear_pools
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    /// Case-insensitive dictionary lookup.
    pub fn get(&self, virtual_pool_id: &str) -> Option<&VirtualBoostedPoolInfo> {
        self.dictionary
            .get(virtual_pool_id)
            .or_else(|| self.dictionary.get(&virtual_pool_id.to_lowercase()))
    }

    pub fn descriptor(&self, virtual_pool_id: &str) -> Option<&VirtualPoolDescriptor> {
        let normalized = virtual_pool_id.to_lowercase();
        self.descriptors.iter().find(|d| d.id == normalized)
    }

    /// Virtual pools whose main tokens include both `a` and `b`.
    pub fn pools_for_pair(&self, a: &Address, b: &Address) -> Vec<&VirtualPoolDescriptor> {
        if a == b {
            return Vec::new();
        }
        self.descriptors
            .iter()
            .filter(|d| d.contains_token(a) && d.contains_token(b))
            .collect()
    }
}

/// Holds the current snapshot; replaced wholesale once per refresh cycle.
pub struct SnapshotStore {
    current: ArcSwap<VirtualPoolSnapshot>,
}

impl SnapshotStore {
    pub fn new(snapshot: VirtualPoolSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Snapshot to use for the duration of one request.
    pub fn load(&self) -> Arc<VirtualPoolSnapshot> {
        self.current.load_full()
    }

    /// Installs `snapshot` and returns the one it replaces. Requests already holding
    /// the previous snapshot keep working against it.
    pub fn replace(&self, snapshot: VirtualPoolSnapshot) -> Arc<VirtualPoolSnapshot> {
        self.current.swap(Arc::new(snapshot))
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(VirtualPoolSnapshot::empty())
    }
}
