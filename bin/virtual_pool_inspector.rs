//! # Virtual Pool Inspector
//!
//! Builds the virtual boosted pool snapshot for the configured network and prints
//! listings, compiled swap plans or on-chain quotes.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin virtual_pool_inspector -- list
//! cargo run --bin virtual_pool_inspector -- plan --pool <id> --token-in <addr> --token-out <addr> --amount 1000000000000000000
//! cargo run --bin virtual_pool_inspector -- --rpc-url <url> quote --pool <id> --token-in <addr> --token-out <addr> --amount 1000000000000000000
//! ```
//!
//! Pool metadata comes from the network's Balancer subgraph unless `--pools-file`
//! points at a JSON array of pool descriptors.

use anyhow::{anyhow, Context, Result};
use boosted_pool_router::{
    adapters::{BalancerVirtualBoostedAdapter, FundManagement},
    dex_adapter::DexAdapter,
    pools::PoolDescriptor,
    router::{SwapPlan, SwapSide},
    settings::Settings,
    subgraph::BalancerSubgraphClient,
};
use clap::{Parser, Subcommand};
use ethers::prelude::{Address, Http, Provider, U256};
use log::info;
use serde_json::json;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Inspect Balancer virtual boosted pools
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Configuration file. Defaults to Config.toml in the working directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file holding a pool metadata batch, used instead of the subgraph.
    #[arg(long)]
    pools_file: Option<PathBuf>,

    /// JSON-RPC endpoint of the configured network. Only `quote` sends requests.
    #[arg(long, default_value = "http://localhost:8545")]
    rpc_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List virtual pools and the linear pools that could not be attached.
    List,
    /// Compile the batched-swap plan for a pair.
    Plan {
        #[command(flatten)]
        trade: Trade,
        /// Also print the batchSwap calldata for this account.
        #[arg(long)]
        account: Option<String>,
    },
    /// Price amounts through the Vault's queryBatchSwap.
    Quote {
        #[command(flatten)]
        trade: Trade,
    },
}

#[derive(clap::Args, Debug)]
struct Trade {
    /// Virtual pool id
    #[arg(long)]
    pool: String,
    #[arg(long)]
    token_in: String,
    #[arg(long)]
    token_out: String,
    /// Amount in token_in base units (decimal)
    #[arg(long)]
    amount: String,
}

impl Trade {
    fn parse(&self) -> Result<(Address, Address, U256)> {
        let token_in = Address::from_str(&self.token_in).map_err(|e| anyhow!("invalid token_in: {}", e))?;
        let token_out = Address::from_str(&self.token_out).map_err(|e| anyhow!("invalid token_out: {}", e))?;
        let amount = U256::from_dec_str(&self.amount).map_err(|e| anyhow!("invalid amount: {}", e))?;
        Ok((token_in, token_out, amount))
    }
}

fn plan_json(plan: &SwapPlan) -> serde_json::Value {
    json!({
        "assets": plan.assets,
        "swaps": plan.swaps.iter().map(|s| json!({
            "poolId": s.pool_id,
            "assetInIndex": s.asset_in_index,
            "assetOutIndex": s.asset_out_index,
            "amount": s.amount.to_string(),
            "userData": s.user_data,
        })).collect::<Vec<_>>(),
        "limits": plan.limits.iter().map(|l| l.to_string()).collect::<Vec<_>>(),
    })
}

async fn load_pools(args: &Args, settings: &Settings) -> Result<Vec<PoolDescriptor>> {
    match &args.pools_file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => BalancerSubgraphClient::from_settings(settings)?.fetch_pools().await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    #[cfg(feature = "observability")]
    tracing_subscriber::fmt().with_target(false).init();
    #[cfg(not(feature = "observability"))]
    env_logger::init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::from_path(path)?,
        None => Settings::new()?,
    };
    info!("Inspecting virtual boosted pools on {}", settings.network);

    let pools = load_pools(&args, &settings).await?;
    let provider = Provider::<Http>::try_from(args.rpc_url.as_str())?;
    let adapter = BalancerVirtualBoostedAdapter::from_settings(Arc::new(provider), &settings);
    adapter.refresh(&pools);

    match &args.command {
        Command::List => {
            let snapshot = adapter.snapshot();
            let skipped: Vec<String> = snapshot
                .skipped_linear_pools()
                .iter()
                .map(|id| format!("{:#x}", id))
                .collect();
            let output = json!({
                "network": settings.network.as_str(),
                "pools": snapshot.descriptors(),
                "skippedLinearPools": skipped,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Plan { trade, account } => {
            let (token_in, token_out, amount) = trade.parse()?;
            let plan = adapter.swap_plan(&trade.pool, token_in, token_out, amount)?;

            let mut output = plan_json(&plan);
            if let Some(account) = account {
                let account = Address::from_str(account).map_err(|e| anyhow!("invalid account: {}", e))?;
                let calldata =
                    adapter.encode_batch_swap(&plan, FundManagement::external(account), U256::MAX)?;
                output["calldata"] = json!(calldata);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Quote { trade } => {
            let (token_in, token_out, amount) = trade.parse()?;
            let prices = adapter
                .query_prices(&trade.pool, token_in, token_out, &[amount], SwapSide::Sell)
                .await?;
            let output = json!({
                "pool": trade.pool,
                "amountIn": amount.to_string(),
                "amountOut": prices.first().map(|p| p.to_string()),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
