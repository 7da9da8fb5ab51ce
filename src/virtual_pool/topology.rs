//! Phantom/linear topology discovery.
//!
//! A linear pool belongs to the phantom pool whose token list holds its pool token.
//! Grouping linear pools by phantom pool yields one virtual pool per phantom pool,
//! with main tokens ordered by the position of their linear pool token inside the
//! phantom pool's token list. Path compilation depends on that order being stable.

use ethers::types::H256;
use tracing::{debug, info, warn};

use super::{virtual_pool_id, MainToken, VirtualBoostedPoolInfo, VirtualPoolDictionary};
use crate::pools::{LinearPool, PhantomPool, PoolDescriptor, PoolKind};

/// Result of one topology pass over a metadata batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyIndex {
    pub dictionary: VirtualPoolDictionary,
    /// Linear pools that could not be attached to a phantom pool of the batch
    pub skipped_linear_pools: Vec<H256>,
}

/// Builds the virtual pool dictionary from a batch of physical pools.
///
/// Linear pools whose phantom pool is missing from the batch are skipped and
/// reported in `skipped_linear_pools`; a partial batch yields a partial dictionary,
/// never an error.
pub fn build_index(pools: &[PoolDescriptor]) -> TopologyIndex {
    let mut linear_pools = Vec::new();
    let mut phantom_pools = Vec::new();
    let mut skipped = Vec::new();

    for descriptor in pools {
        match descriptor.kind() {
            PoolKind::Linear => match LinearPool::from_descriptor(descriptor) {
                Some(pool) => linear_pools.push(pool),
                None => {
                    warn!(
                        "Skipping linear pool {:#x}: main/wrapped index unusable ({:?}/{:?} of {} tokens)",
                        descriptor.id,
                        descriptor.main_index,
                        descriptor.wrapped_index,
                        descriptor.tokens.len()
                    );
                    skipped.push(descriptor.id);
                }
            },
            PoolKind::Phantom => {
                if let Some(pool) = PhantomPool::from_descriptor(descriptor) {
                    phantom_pools.push(pool);
                }
            }
            PoolKind::Other => {}
        }
    }

    // Linear pools attached to each phantom pool, indexed like `phantom_pools`.
    let mut groups: Vec<Vec<&LinearPool>> = vec![Vec::new(); phantom_pools.len()];
    for linear in &linear_pools {
        match phantom_pools.iter().position(|p| p.contains(&linear.pool_token())) {
            Some(i) => groups[i].push(linear),
            None => {
                warn!(
                    "Skipping linear pool {:#x}: no phantom pool in batch holds its pool token {:?}",
                    linear.id,
                    linear.pool_token()
                );
                skipped.push(linear.id);
            }
        }
    }

    let mut dictionary = VirtualPoolDictionary::new();
    for (phantom, group) in phantom_pools.iter().zip(groups) {
        if group.is_empty() {
            continue;
        }

        let main_tokens: Vec<MainToken> = phantom
            .tokens
            .iter()
            .filter_map(|token| group.iter().find(|l| l.pool_token() == *token))
            .map(|linear| {
                let main = linear.main_token();
                MainToken {
                    address: main.address,
                    decimals: main.decimals,
                    linear_pool_address: linear.address,
                    linear_pool_id: linear.id,
                }
            })
            .collect();

        let id = virtual_pool_id(&phantom.id);
        if dictionary.contains_key(&id) {
            debug!("Phantom pool {:#x} listed twice in batch, keeping first", phantom.id);
            continue;
        }
        dictionary.insert(
            id,
            VirtualBoostedPoolInfo {
                phantom_pool_id: phantom.id,
                phantom_pool_address: phantom.address,
                main_tokens,
            },
        );
    }

    info!(
        "Virtual pool topology built: {} pools from {} linear / {} phantom pools ({} linear skipped)",
        dictionary.len(),
        linear_pools.len(),
        phantom_pools.len(),
        skipped.len()
    );

    TopologyIndex {
        dictionary,
        skipped_linear_pools: skipped,
    }
}
