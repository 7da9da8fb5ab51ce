use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers::prelude::*;
use futures::future::{join_all, try_join_all};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::time::{timeout, Duration};

use crate::contracts::IBalancerV2Vault;
use crate::dex_adapter::DexAdapter;
use crate::pools::PoolDescriptor;
use crate::router::{SwapPlan, SwapSide};
use crate::settings::{Network, NetworkConfig, Settings};
use crate::virtual_pool::{
    liquidity, pair, path, PairContext, PoolReserves, SnapshotStore, VirtualPoolDescriptor,
    VirtualPoolError, VirtualPoolSnapshot,
};

type BatchSwapStepTuple = ([u8; 32], U256, U256, U256, Bytes);
type FundManagementTuple = (Address, bool, Address, bool);

/// Vault `FundManagement` argument of `batchSwap` / `queryBatchSwap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FundManagement {
    pub sender: Address,
    pub from_internal_balance: bool,
    pub recipient: Address,
    pub to_internal_balance: bool,
}

impl FundManagement {
    /// Funds pulled from and paid to `account`'s external balances.
    pub fn external(account: Address) -> Self {
        Self {
            sender: account,
            from_internal_balance: false,
            recipient: account,
            to_internal_balance: false,
        }
    }

    fn as_tuple(&self) -> FundManagementTuple {
        (
            self.sender,
            self.from_internal_balance,
            self.recipient,
            self.to_internal_balance,
        )
    }
}

fn swap_tuples(plan: &SwapPlan) -> Vec<BatchSwapStepTuple> {
    plan.swaps
        .iter()
        .map(|s| {
            (
                s.pool_id.0,
                U256::from(s.asset_in_index),
                U256::from(s.asset_out_index),
                s.amount,
                s.user_data.clone(),
            )
        })
        .collect()
}

/// Magnitude of the Vault delta of asset `index`; the Vault reports assets paid
/// out as negative deltas.
fn output_amount(deltas: &[I256], index: usize) -> U256 {
    match deltas.get(index) {
        Some(delta) if delta.is_negative() => delta.unsigned_abs(),
        _ => U256::zero(),
    }
}

/// Balancer V2 adapter for virtual boosted pools.
///
/// Holds the per-cycle snapshot of virtual pools and the network's Vault binding.
/// Swap plans are compiled off-chain; prices come from `queryBatchSwap` so the
/// quoted amount is exactly what the compiled plan yields on-chain.
pub struct BalancerVirtualBoostedAdapter<M> {
    network: Network,
    vault: IBalancerV2Vault<M>,
    snapshots: SnapshotStore,
    query_timeout: Duration,
}

impl<M: Middleware + 'static> BalancerVirtualBoostedAdapter<M> {
    pub fn new(client: Arc<M>, network: Network, config: &NetworkConfig, query_timeout: Duration) -> Self {
        Self {
            network,
            vault: IBalancerV2Vault::new(config.vault, client),
            snapshots: SnapshotStore::default(),
            query_timeout,
        }
    }

    pub fn from_settings(client: Arc<M>, settings: &Settings) -> Self {
        Self::new(
            client,
            settings.network,
            &settings.active,
            settings.pricing.query_timeout(),
        )
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn vault_address(&self) -> Address {
        self.vault.address()
    }

    /// Snapshot of the current cycle. Hold on to it for the whole request.
    pub fn snapshot(&self) -> Arc<VirtualPoolSnapshot> {
        self.snapshots.load()
    }

    /// Builds a fresh snapshot from `pools` and makes it current.
    pub fn rebuild(&self, pools: &[PoolDescriptor]) -> Arc<VirtualPoolSnapshot> {
        let snapshot = VirtualPoolSnapshot::build(pools);
        info!(
            "Balancer virtual boosted pools refreshed on {}: {} pools listed, {} linear pools skipped",
            self.network,
            snapshot.len(),
            snapshot.skipped_linear_pools().len()
        );
        self.snapshots.replace(snapshot);
        self.snapshots.load()
    }

    /// Pair context for `token_in -> token_out` through `pool_id`.
    pub fn pair_data(
        &self,
        snapshot: &VirtualPoolSnapshot,
        pool_id: &str,
        token_in: Address,
        token_out: Address,
    ) -> Result<PairContext, VirtualPoolError> {
        let descriptor = snapshot
            .descriptor(pool_id)
            .ok_or_else(|| VirtualPoolError::UnknownVirtualPool {
                pool_id: pool_id.to_string(),
            })?;
        pair::resolve_pair(snapshot, descriptor, token_in, token_out)
    }

    pub fn check_liquidity(
        &self,
        reserves: &PoolReserves,
        amount: U256,
        side: SwapSide,
        pair: &PairContext,
    ) -> Result<(), VirtualPoolError> {
        liquidity::check_liquidity(reserves, amount, side, pair)
    }

    pub fn compile_swap_plan(
        &self,
        snapshot: &VirtualPoolSnapshot,
        pool_id: &str,
        token_in: Address,
        token_out: Address,
        amount: U256,
    ) -> Result<SwapPlan, VirtualPoolError> {
        path::compile_swap_plan(snapshot.dictionary(), pool_id, token_in, token_out, amount)
    }

    /// Encodes `plan` as `batchSwap` calldata for this network's Vault.
    pub fn encode_batch_swap(&self, plan: &SwapPlan, funds: FundManagement, deadline: U256) -> Result<Bytes> {
        if !plan.is_well_formed() {
            return Err(anyhow!("refusing to encode malformed plan {}", plan.route_id()));
        }
        self.vault
            .batch_swap(
                SwapSide::Sell.kind() as u8,
                swap_tuples(plan),
                plan.assets.clone(),
                funds.as_tuple(),
                plan.limits.clone(),
                deadline,
            )
            .calldata()
            .ok_or_else(|| anyhow!("batchSwap calldata unavailable"))
    }

    /// Main-token reserves of a virtual pool, read from each linear pool.
    pub async fn fetch_reserves(&self, pool_id: &str) -> Result<PoolReserves> {
        self.reserves_for(&self.snapshot(), pool_id).await
    }

    async fn reserves_for(&self, snapshot: &VirtualPoolSnapshot, pool_id: &str) -> Result<PoolReserves> {
        let info = snapshot
            .get(pool_id)
            .ok_or_else(|| VirtualPoolError::UnknownVirtualPool {
                pool_id: pool_id.to_string(),
            })?;

        let lookups = info.main_tokens.iter().map(|main| async move {
            let call = self.vault.get_pool_tokens(main.linear_pool_id.0);
            let (tokens, balances, _) = timeout(self.query_timeout, call.call()).await??;
            let balance = tokens
                .iter()
                .position(|t| *t == main.address)
                .and_then(|i| balances.get(i).copied());
            Ok::<_, anyhow::Error>((main.address, balance))
        });

        let reserves = try_join_all(lookups)
            .await?
            .into_iter()
            .filter_map(|(token, balance)| balance.map(|b| (token, b)))
            .collect();
        Ok(reserves)
    }

    /// Prices `amounts` of `token_in` in `token_out` through `pool_id`.
    ///
    /// The pair is resolved and the linear pool reserves are read once; amounts the
    /// liquidity gate rejects price to zero without an RPC call. Admitted amounts are
    /// compiled into a plan and priced with `queryBatchSwap`. Failed or timed out
    /// lookups price to zero. Buy-side requests are not supported and price every
    /// amount to zero.
    pub async fn get_prices(
        &self,
        pool_id: &str,
        token_in: Address,
        token_out: Address,
        amounts: &[U256],
        side: SwapSide,
    ) -> Result<Vec<U256>> {
        let snapshot = self.snapshot();
        // Surfaces unknown pools and tokens once instead of per amount.
        self.compile_swap_plan(&snapshot, pool_id, token_in, token_out, U256::one())?;

        if side == SwapSide::Buy {
            debug!("{} pricing not supported for virtual pool {}", side, pool_id);
            return Ok(vec![U256::zero(); amounts.len()]);
        }

        let pair = self.pair_data(&snapshot, pool_id, token_in, token_out)?;
        let reserves = match self.reserves_for(&snapshot, pool_id).await {
            Ok(reserves) => reserves,
            Err(e) => {
                warn!("Reserve lookup failed for virtual pool {}: {}", pool_id, e);
                PoolReserves::new()
            }
        };

        let quotes = amounts
            .iter()
            .map(|amount| self.query_amount(&snapshot, &pair, &reserves, *amount));
        Ok(join_all(quotes).await)
    }

    async fn query_amount(
        &self,
        snapshot: &VirtualPoolSnapshot,
        pair: &PairContext,
        reserves: &PoolReserves,
        amount: U256,
    ) -> U256 {
        if amount.is_zero() || !liquidity::is_usable(reserves, amount, SwapSide::Sell, pair) {
            return U256::zero();
        }
        let pool_id = pair.virtual_pool_id.as_str();
        let plan = match self.compile_swap_plan(snapshot, pool_id, pair.token_in, pair.token_out, amount) {
            Ok(plan) => plan,
            Err(e) => {
                debug!("No plan for {} {}: {}", pool_id, amount, e);
                return U256::zero();
            }
        };

        let call = self.vault.query_batch_swap(
            SwapSide::Sell.kind() as u8,
            swap_tuples(&plan),
            plan.assets.clone(),
            FundManagement::default().as_tuple(),
        );
        match timeout(self.query_timeout, call.call()).await {
            Ok(Ok(deltas)) => output_amount(&deltas, plan.assets.len() - 1),
            Ok(Err(e)) => {
                warn!("queryBatchSwap failed for {} amount {}: {}", plan.route_id(), amount, e);
                U256::zero()
            }
            Err(_) => {
                warn!(
                    "queryBatchSwap timed out after {:?} for {} amount {}",
                    self.query_timeout,
                    plan.route_id(),
                    amount
                );
                U256::zero()
            }
        }
    }
}

#[async_trait]
impl<M: Middleware + 'static> DexAdapter for BalancerVirtualBoostedAdapter<M> {
    fn name(&self) -> &'static str {
        "BalancerV2VirtualBoosted"
    }

    fn refresh(&self, pools: &[PoolDescriptor]) -> usize {
        self.rebuild(pools).len()
    }

    fn list_pools(&self) -> Vec<VirtualPoolDescriptor> {
        self.snapshot().descriptors().to_vec()
    }

    fn swap_plan(
        &self,
        pool_id: &str,
        token_in: Address,
        token_out: Address,
        amount: U256,
    ) -> Result<SwapPlan> {
        Ok(self.compile_swap_plan(&self.snapshot(), pool_id, token_in, token_out, amount)?)
    }

    async fn query_prices(
        &self,
        pool_id: &str,
        token_in: Address,
        token_out: Address,
        amounts: &[U256],
        side: SwapSide,
    ) -> Result<Vec<U256>> {
        self.get_prices(pool_id, token_in, token_out, amounts, side).await
    }
}
