//! Mainnet bb-a-USD fixture: three Aave linear pools (DAI, USDC, USDT) feeding
//! one StablePhantom pool.

#![allow(dead_code)]

use boosted_pool_router::pools::{PoolDescriptor, TokenDescriptor};
use ethers::types::{Address, H256};
use std::str::FromStr;

pub const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
pub const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
pub const USDT: &str = "0xdAC17F958D2ee523a2206206994597C13D831ec7";

pub const A_DAI: &str = "0x02d60b84491589974263d922D9cC7a3152618Ef6";
pub const A_USDC: &str = "0xd093fA4Fb80D09bB30817FDcd442d4d02eD3E5de";
pub const A_USDT: &str = "0xf8Fd466F12e236f4c96F7Cce6c79EAdB819abF58";

pub const BB_A_DAI: &str = "0x804CdB9116a10bB78768D3252355a1b18067bF8f";
pub const BB_A_USDC: &str = "0x9210F1204b5a24742Eba12f710636D76240dF3d0";
pub const BB_A_USDT: &str = "0x2BBf681cC4eb09218BEe85EA2a5d3D13Fa40fC0C";
pub const BB_A_USD: &str = "0x7B50775383d3D6f0215A8F290f2C9e2eEBBEceb2";

pub const BB_A_DAI_ID: &str = "0x804cdb9116a10bb78768d3252355a1b18067bf8f0000000000000000000000fb";
pub const BB_A_USDC_ID: &str = "0x9210f1204b5a24742eba12f710636d76240df3d00000000000000000000000fc";
pub const BB_A_USDT_ID: &str = "0x2bbf681cc4eb09218bee85ea2a5d3d13fa40fc0c0000000000000000000000fd";
pub const BB_A_USD_ID: &str = "0x7b50775383d3d6f0215a8f290f2c9e2eebbeceb20000000000000000000000fe";

pub const VIRTUAL_POOL_ID: &str =
    "0x7b50775383d3d6f0215a8f290f2c9e2eebbeceb20000000000000000000000fevirtualboosted";

pub fn addr(s: &str) -> Address {
    Address::from_str(s).unwrap()
}

pub fn id(s: &str) -> H256 {
    H256::from_str(s).unwrap()
}

fn token(address: &str, decimals: u8) -> TokenDescriptor {
    TokenDescriptor {
        address: addr(address),
        decimals,
    }
}

fn linear(
    pool_id: &str,
    address: &str,
    tokens: Vec<TokenDescriptor>,
    main_index: usize,
    wrapped_index: usize,
) -> PoolDescriptor {
    PoolDescriptor {
        id: id(pool_id),
        address: addr(address),
        pool_type: "AaveLinear".to_string(),
        tokens,
        main_index: Some(main_index),
        wrapped_index: Some(wrapped_index),
    }
}

/// Linear pools list their tokens sorted by address, as the Vault does.
pub fn bb_a_dai() -> PoolDescriptor {
    linear(
        BB_A_DAI_ID,
        BB_A_DAI,
        vec![token(A_DAI, 18), token(DAI, 18), token(BB_A_DAI, 18)],
        1,
        0,
    )
}

pub fn bb_a_usdc() -> PoolDescriptor {
    linear(
        BB_A_USDC_ID,
        BB_A_USDC,
        vec![token(BB_A_USDC, 18), token(USDC, 6), token(A_USDC, 6)],
        1,
        2,
    )
}

pub fn bb_a_usdt() -> PoolDescriptor {
    linear(
        BB_A_USDT_ID,
        BB_A_USDT,
        vec![token(BB_A_USDT, 18), token(USDT, 6), token(A_USDT, 6)],
        1,
        2,
    )
}

pub fn bb_a_usd() -> PoolDescriptor {
    PoolDescriptor {
        id: id(BB_A_USD_ID),
        address: addr(BB_A_USD),
        pool_type: "StablePhantom".to_string(),
        tokens: vec![
            token(BB_A_USDT, 18),
            token(BB_A_USD, 18),
            token(BB_A_DAI, 18),
            token(BB_A_USDC, 18),
        ],
        main_index: None,
        wrapped_index: None,
    }
}

/// The full metadata batch, in subgraph order.
pub fn batch() -> Vec<PoolDescriptor> {
    vec![bb_a_usdt(), bb_a_usd(), bb_a_dai(), bb_a_usdc()]
}
