//! # Boosted Pool Router
//!
//! Virtual boosted pool routing for Balancer V2. A virtual boosted pool lets a
//! pricing pipeline trade the real assets behind a boosted pool (DAI, USDC, USDT)
//! as if they sat in a single pool, while execution goes through the physical
//! pools: linear pool in, phantom pool, linear pool out.
//!
//! ## Overview
//!
//! - **Topology**: discovers phantom pools and the linear pools feeding them from a
//!   batch of physical-pool metadata
//! - **Listing**: synthesizes pool descriptors under a dedicated pool type
//! - **Quoting**: resolves pair context and gates requests on reserves
//! - **Execution**: compiles each trade into a three-hop Vault batched swap
//!
//! ## Architecture
//!
//! ### Metadata Layer
//! [`subgraph`] fetches linear and phantom pools; [`pools`] classifies them.
//!
//! ### Virtual Pool Layer
//! [`virtual_pool`] builds an immutable snapshot per refresh cycle and exposes the
//! pair resolver, the liquidity gate and the swap path compiler.
//!
//! ### Adapter Layer
//! [`adapters::balancer_v2`] implements [`DexAdapter`] on top of the snapshot and
//! the Vault contract binding.

// Core Types
/// Physical pool metadata and classification
pub mod pools;
/// Routing primitives (SwapStep, SwapPlan, SwapSide)
pub mod router;
/// Virtual boosted pool topology, pair resolution and plan compilation
pub mod virtual_pool;
/// Trait for DEX-specific adapters
pub mod dex_adapter;

// DEX Adapters
/// Protocol-specific adapters
pub mod adapters;

// Contracts (Public ABIs Only)
/// Smart contract ABIs
pub mod contracts;

// Metadata Sources
/// Balancer subgraph client
pub mod subgraph;

// Infrastructure
/// Metrics and observability
pub mod metrics;

// Settings & Configuration
/// Configuration management
pub mod settings;

// Re-exports for convenience
pub use adapters::BalancerVirtualBoostedAdapter;
pub use dex_adapter::DexAdapter;
pub use pools::PoolDescriptor;
pub use router::{SwapPlan, SwapSide};
pub use settings::{Network, Settings};
pub use virtual_pool::{VirtualPoolError, VirtualPoolSnapshot};
