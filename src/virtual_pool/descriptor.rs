use ethers::types::Address;
use serde::Serialize;

use super::{
    virtual_pool_address, VirtualBoostedPoolInfo, VirtualPoolDictionary, VIRTUAL_BOOSTED_POOL_TYPE,
};
use crate::pools::TokenDescriptor;

/// Listing entry for a virtual pool, shaped like a physical pool listing.
///
/// Only main tokens are exposed; the linear and phantom pool tokens bridging the
/// hops stay hidden from the pricing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualPoolDescriptor {
    pub id: String,
    pub address: String,
    pub pool_type: String,
    pub tokens: Vec<TokenDescriptor>,
}

impl VirtualPoolDescriptor {
    pub fn from_info(id: &str, info: &VirtualBoostedPoolInfo) -> Self {
        Self {
            id: id.to_string(),
            address: virtual_pool_address(&info.phantom_pool_address),
            pool_type: VIRTUAL_BOOSTED_POOL_TYPE.to_string(),
            tokens: info
                .main_tokens
                .iter()
                .map(|t| TokenDescriptor {
                    address: t.address,
                    decimals: t.decimals,
                })
                .collect(),
        }
    }

    pub fn contains_token(&self, token: &Address) -> bool {
        self.tokens.iter().any(|t| t.address == *token)
    }
}

/// One descriptor per dictionary entry, in dictionary order.
pub fn describe(dictionary: &VirtualPoolDictionary) -> Vec<VirtualPoolDescriptor> {
    dictionary
        .iter()
        .map(|(id, info)| VirtualPoolDescriptor::from_info(id, info))
        .collect()
}
