use config::{Config, ConfigError, File, Source};
use ethers::types::Address;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Networks the adapter can be deployed on.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    Mainnet,
    Polygon,
    Arbitrum,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Mainnet, Network::Polygon, Network::Arbitrum];

    pub fn chain_id(self) -> u64 {
        match self {
            Network::Mainnet => 1,
            Network::Polygon => 137,
            Network::Arbitrum => 42161,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Polygon => "polygon",
            Network::Arbitrum => "arbitrum",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Network::ALL
            .into_iter()
            .find(|n| n.as_str() == normalized)
            .ok_or_else(|| ConfigError::Message(format!("unknown network '{}'", s)))
    }
}

/// Per-network deployment data.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Balancer V2 Vault
    pub vault: Address,
    /// Balancer subgraph endpoint
    pub subgraph_url: Url,
}

/// Network address book, validated once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBook {
    entries: BTreeMap<Network, NetworkConfig>,
}

impl AddressBook {
    /// Fails when any of `required` has no entry.
    pub fn validated(
        entries: BTreeMap<Network, NetworkConfig>,
        required: &[Network],
    ) -> Result<Self, ConfigError> {
        let missing: Vec<&str> = required
            .iter()
            .filter(|n| !entries.contains_key(n))
            .map(|n| n.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Message(format!(
                "missing network configuration for: {}",
                missing.join(", ")
            )));
        }
        Ok(Self { entries })
    }

    pub fn get(&self, network: Network) -> Option<&NetworkConfig> {
        self.entries.get(&network)
    }

    pub fn networks(&self) -> impl Iterator<Item = Network> + '_ {
        self.entries.keys().copied()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Subgraph {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_subgraph_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_page_size() -> usize {
    1000
}
fn default_subgraph_timeout_seconds() -> u64 {
    10
}

impl Default for Subgraph {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            timeout_seconds: default_subgraph_timeout_seconds(),
        }
    }
}

impl Subgraph {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Pricing {
    #[serde(default = "default_query_timeout_seconds")]
    pub query_timeout_seconds: u64,
}

fn default_query_timeout_seconds() -> u64 {
    8
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            query_timeout_seconds: default_query_timeout_seconds(),
        }
    }
}

impl Pricing {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_seconds)
    }
}

/// Settings as they appear in `Config.toml`, before validation.
#[derive(Debug, Deserialize, Clone)]
pub struct RawSettings {
    pub network: Network,
    #[serde(default)]
    pub subgraph: Subgraph,
    #[serde(default)]
    pub pricing: Pricing,
    #[serde(default)]
    pub networks: BTreeMap<Network, NetworkConfig>,
}

/// Validated settings. The active network always has an address book entry.
#[derive(Debug, Clone)]
pub struct Settings {
    pub network: Network,
    pub active: NetworkConfig,
    pub address_book: AddressBook,
    pub subgraph: Subgraph,
    pub pricing: Pricing,
}

impl TryFrom<RawSettings> for Settings {
    type Error = ConfigError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        if raw.subgraph.page_size == 0 {
            return Err(ConfigError::Message("subgraph.page_size must be > 0".to_string()));
        }
        let address_book = AddressBook::validated(raw.networks, &[raw.network])?;
        let active = address_book
            .get(raw.network)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound(format!("networks.{}", raw.network)))?;
        Ok(Self {
            network: raw.network,
            active,
            address_book,
            subgraph: raw.subgraph,
            pricing: raw.pricing,
        })
    }
}

impl Settings {
    /// Loads `Config.toml` from the working directory.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(File::with_name("Config.toml"))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(File::from(path.as_ref()))
    }

    fn load<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let s = Config::builder().add_source(source).build()?;
        let mut raw: RawSettings = s.try_deserialize()?;
        apply_env_overrides(&mut raw)?;
        Settings::try_from(raw)
    }
}

// Environment variable overrides (SDK_NETWORK, SDK_SUBGRAPH_URL)
fn apply_env_overrides(raw: &mut RawSettings) -> Result<(), ConfigError> {
    if let Ok(network) = env::var("SDK_NETWORK") {
        if !network.trim().is_empty() {
            raw.network = network.parse()?;
        }
    }
    if let Ok(url) = env::var("SDK_SUBGRAPH_URL") {
        let trimmed = url.trim();
        if !trimmed.is_empty() {
            let url = Url::parse(trimmed)
                .map_err(|e| ConfigError::Message(format!("invalid SDK_SUBGRAPH_URL: {}", e)))?;
            match raw.networks.get_mut(&raw.network) {
                Some(entry) => entry.subgraph_url = url,
                None => log::warn!(
                    "SDK_SUBGRAPH_URL ignored: no configuration for network {}",
                    raw.network
                ),
            }
        }
    }
    Ok(())
}
