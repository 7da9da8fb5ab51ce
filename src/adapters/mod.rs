// DEX Adapters Module
// Protocol adapters implementing the DexAdapter trait

pub mod balancer_v2;

// Re-export the trait
pub use crate::dex_adapter::DexAdapter;
pub use balancer_v2::{BalancerVirtualBoostedAdapter, FundManagement};
