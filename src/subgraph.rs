//! # Balancer Subgraph Client
//!
//! Fetches the physical-pool metadata that virtual pools are built from: linear
//! pools (with their main/wrapped indices) and the phantom pools aggregating them.
//! Pages are requested by last id rather than `skip`, which is the paging approach
//! the subgraph documentation recommends for large result sets.

use anyhow::{anyhow, Result};
use ethers::types::H256;
use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::time::{sleep, Duration};
use url::Url;

use crate::pools::PoolDescriptor;
use crate::settings::Settings;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Pool types relevant to virtual boosted pools.
pub const VIRTUAL_POOL_SOURCE_TYPES: &[&str] = &[
    "AaveLinear",
    "ERC4626Linear",
    "EulerLinear",
    "GearboxLinear",
    "Linear",
    "ReaperLinear",
    "YearnLinear",
    "StablePhantom",
    "ComposableStable",
];

const POOLS_QUERY: &str = r#"
    query Pools($pageSize: Int, $lastId: ID, $poolTypes: [String!]) {
        pools(
            first: $pageSize
            orderBy: id
            orderDirection: asc
            where: { id_gt: $lastId, poolType_in: $poolTypes }
        ) {
            id
            address
            poolType
            mainIndex
            wrappedIndex
            tokens(orderBy: index) {
                address
                decimals
            }
        }
    }
"#;

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

#[derive(Deserialize, Debug)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

impl<T> GraphQLResponse<T> {
    fn into_data(self) -> Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(anyhow!("subgraph query failed: {}", messages.join("; ")));
        }
        self.data.ok_or_else(|| anyhow!("subgraph response without data"))
    }
}

#[derive(Deserialize, Debug)]
struct PoolsData {
    pools: Vec<PoolDescriptor>,
}

/// Client to the Balancer V2 subgraph of one network.
pub struct BalancerSubgraphClient {
    client: Client,
    url: Url,
    page_size: usize,
}

impl BalancerSubgraphClient {
    pub fn new(url: Url, page_size: usize, timeout: Duration) -> Result<Self> {
        if page_size == 0 {
            return Err(anyhow!("subgraph page size must be > 0"));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            page_size,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            settings.active.subgraph_url.clone(),
            settings.subgraph.page_size,
            settings.subgraph.timeout(),
        )
    }

    /// Retrieves every linear and phantom pool known to the subgraph.
    pub async fn fetch_pools(&self) -> Result<Vec<PoolDescriptor>> {
        let mut pools = Vec::new();
        let mut last_id = H256::zero();

        loop {
            let page = self.query_page(last_id).await?;
            let no_more_pages = page.len() != self.page_size;
            if let Some(last_pool) = page.last() {
                last_id = last_pool.id;
            }
            debug!("Fetched {} pools from subgraph (last id {:#x})", page.len(), last_id);
            pools.extend(page);

            if no_more_pages {
                break;
            }
        }

        info!("Fetched {} linear/phantom pools from {}", pools.len(), self.url);
        Ok(pools)
    }

    async fn query_page(&self, last_id: H256) -> Result<Vec<PoolDescriptor>> {
        let body = json!({
            "query": POOLS_QUERY,
            "variables": {
                "pageSize": self.page_size,
                "lastId": last_id,
                "poolTypes": VIRTUAL_POOL_SOURCE_TYPES,
            },
        });

        let mut attempts = 0;
        loop {
            match self.post::<PoolsData>(&body).await {
                Ok(data) => return Ok(data.pools),
                Err(e) => {
                    attempts += 1;
                    if attempts >= MAX_RETRIES {
                        return Err(anyhow!("Subgraph query failed after {} attempts: {}", attempts, e));
                    }
                    warn!(
                        "Subgraph query failed, retrying in {:?}. Attempt {}/{}. Error: {}",
                        RETRY_DELAY, attempts, MAX_RETRIES, e
                    );
                    sleep(RETRY_DELAY).await;
                }
            }
        }
    }

    async fn post<T: DeserializeOwned>(&self, body: &serde_json::Value) -> Result<T> {
        let response: GraphQLResponse<T> = self
            .client
            .post(self.url.clone())
            .json(body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_data()
    }
}
