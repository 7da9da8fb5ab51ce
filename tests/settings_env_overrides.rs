//! SDK_* environment overrides. Kept in their own test binary: the process
//! environment is shared by every test of a binary.

use boosted_pool_router::settings::{Network, Settings};
use std::env;
use std::io::Write;

#[test]
fn test_env_overrides() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(
        br#"
        network = "mainnet"

        [networks.mainnet]
        vault = "0xBA12222222228d8Ba445958a75a0704d566BF2C8"
        subgraph_url = "https://example.org/subgraphs/balancer-v2"

        [networks.arbitrum]
        vault = "0xBA12222222228d8Ba445958a75a0704d566BF2C8"
        subgraph_url = "https://example.org/subgraphs/balancer-arbitrum-v2"
        "#,
    )
    .unwrap();

    env::set_var("SDK_NETWORK", "Arbitrum");
    env::set_var("SDK_SUBGRAPH_URL", "https://indexer.example.com/balancer");
    let settings = Settings::from_path(file.path()).unwrap();
    assert_eq!(settings.network, Network::Arbitrum);
    assert_eq!(settings.active.subgraph_url.as_str(), "https://indexer.example.com/balancer");
    // Only the active network's entry is overridden.
    assert_eq!(
        settings.address_book.get(Network::Mainnet).unwrap().subgraph_url.as_str(),
        "https://example.org/subgraphs/balancer-v2"
    );

    env::set_var("SDK_NETWORK", "polygon");
    env::remove_var("SDK_SUBGRAPH_URL");
    assert!(Settings::from_path(file.path()).is_err());

    env::set_var("SDK_NETWORK", "goerli");
    assert!(Settings::from_path(file.path()).is_err());

    env::remove_var("SDK_NETWORK");
    let settings = Settings::from_path(file.path()).unwrap();
    assert_eq!(settings.network, Network::Mainnet);
}
