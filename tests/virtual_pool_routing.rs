//! Integration tests for virtual boosted pool routing on the mainnet bb-a-USD
//! topology.

mod common;

use boosted_pool_router::{
    pools::PoolDescriptor,
    router::{SwapSide, CHAINED_AMOUNT, UNBOUNDED_LIMIT},
    virtual_pool::{
        liquidity, pair, path, PoolReserves, SnapshotStore, VirtualPoolError, VirtualPoolSnapshot,
        VIRTUAL_BOOSTED_POOL_TYPE,
    },
};
use common::*;
use ethers::types::{Address, U256};
use itertools::Itertools;

fn snapshot() -> VirtualPoolSnapshot {
    VirtualPoolSnapshot::build(&batch())
}

fn one_dai() -> U256 {
    U256::from_dec_str("1000000000000000000").unwrap()
}

#[test]
fn test_dai_to_usdc_plan() {
    let snapshot = snapshot();
    let plan = path::compile_swap_plan(
        snapshot.dictionary(),
        VIRTUAL_POOL_ID,
        addr(DAI),
        addr(USDC),
        one_dai(),
    )
    .unwrap();

    assert_eq!(
        plan.assets,
        vec![addr(DAI), addr(BB_A_DAI), addr(BB_A_USDC), addr(USDC)]
    );

    assert_eq!(plan.swaps.len(), 3);
    let pools: Vec<_> = plan.swaps.iter().map(|s| s.pool_id).collect();
    assert_eq!(pools, vec![id(BB_A_DAI_ID), id(BB_A_USD_ID), id(BB_A_USDC_ID)]);
    for (i, step) in plan.swaps.iter().enumerate() {
        assert_eq!(step.asset_in_index, i);
        assert_eq!(step.asset_out_index, i + 1);
        assert!(step.user_data.is_empty());
    }
    assert_eq!(plan.swaps[0].amount.to_string(), "1000000000000000000");
    assert_eq!(plan.swaps[1].amount.to_string(), "0");
    assert_eq!(plan.swaps[2].amount.to_string(), "0");

    assert_eq!(plan.limits, vec![UNBOUNDED_LIMIT; 4]);
    assert!(plan.is_well_formed());
}

#[test]
fn test_every_ordered_pair_compiles() {
    let snapshot = snapshot();
    let mains = [addr(DAI), addr(USDC), addr(USDT)];
    let linear_of = |token: Address| match token {
        t if t == addr(DAI) => addr(BB_A_DAI),
        t if t == addr(USDC) => addr(BB_A_USDC),
        _ => addr(BB_A_USDT),
    };

    for (token_in, token_out) in mains.iter().copied().tuple_combinations().flat_map(|(a, b)| [(a, b), (b, a)]) {
        let amount = U256::from(12_345u64);
        let plan = path::compile_swap_plan(snapshot.dictionary(), VIRTUAL_POOL_ID, token_in, token_out, amount)
            .unwrap();

        assert_eq!(plan.assets.len(), plan.swaps.len() + 1);
        assert_eq!(plan.limits.len(), plan.assets.len());
        assert_eq!(plan.assets[1], linear_of(token_in));
        assert_eq!(plan.assets[2], linear_of(token_out));
        assert_eq!(plan.swaps[1].pool_id, id(BB_A_USD_ID));
        assert_eq!(plan.requested_amount(), amount);
        assert!(plan.swaps.iter().skip(1).all(|s| s.amount == CHAINED_AMOUNT));
    }
}

#[test]
fn test_compilation_is_idempotent() {
    let snapshot = snapshot();
    let compile = || {
        path::compile_swap_plan(snapshot.dictionary(), VIRTUAL_POOL_ID, addr(USDT), addr(DAI), one_dai())
    };
    assert_eq!(compile().unwrap(), compile().unwrap());

    // Rebuilding from the same batch yields the same snapshot.
    assert_eq!(VirtualPoolSnapshot::build(&batch()), snapshot);
}

#[test]
fn test_batch_order_does_not_change_plans() {
    let reference = snapshot();
    for permutation in batch().into_iter().permutations(4) {
        let snapshot = VirtualPoolSnapshot::build(&permutation);
        assert_eq!(snapshot.dictionary(), reference.dictionary());
    }
}

#[test]
fn test_listing_exposes_main_tokens_in_phantom_order() {
    let snapshot = snapshot();
    assert_eq!(snapshot.len(), 1);

    let descriptor = &snapshot.descriptors()[0];
    assert_eq!(descriptor.id, VIRTUAL_POOL_ID);
    assert_eq!(
        descriptor.address,
        "0x7b50775383d3d6f0215a8f290f2c9e2eebbeceb2virtualboosted"
    );
    assert_eq!(descriptor.pool_type, VIRTUAL_BOOSTED_POOL_TYPE);

    let tokens: Vec<(Address, u8)> = descriptor.tokens.iter().map(|t| (t.address, t.decimals)).collect();
    assert_eq!(tokens, vec![(addr(USDT), 6), (addr(DAI), 18), (addr(USDC), 6)]);

    let json = serde_json::to_value(descriptor).unwrap();
    assert_eq!(json["poolType"], "VirtualBoosted");

    assert_eq!(snapshot.pools_for_pair(&addr(DAI), &addr(USDT)).len(), 1);
    assert!(snapshot.pools_for_pair(&addr(DAI), &addr(A_DAI)).is_empty());
}

#[test]
fn test_unknown_pool_id() {
    let snapshot = snapshot();
    let err = path::compile_swap_plan(
        snapshot.dictionary(),
        "0x7b50775383d3d6f0215a8f290f2c9e2eebbeceb20000000000000000000000fe",
        addr(DAI),
        addr(USDC),
        one_dai(),
    )
    .unwrap_err();
    assert!(matches!(err, VirtualPoolError::InvalidVirtualPoolId { .. }));
}

#[test]
fn test_missing_tokens() {
    let snapshot = snapshot();
    // Wrapped and linear pool tokens are not tradable main tokens.
    for outsider in [addr(A_DAI), addr(BB_A_USDC), addr(BB_A_USD)] {
        let err = path::compile_swap_plan(snapshot.dictionary(), VIRTUAL_POOL_ID, outsider, addr(USDC), one_dai())
            .unwrap_err();
        assert_eq!(
            err,
            VirtualPoolError::TokenMissing {
                pool_id: VIRTUAL_POOL_ID.to_string(),
                token: outsider,
            }
        );

        let err = path::compile_swap_plan(snapshot.dictionary(), VIRTUAL_POOL_ID, addr(DAI), outsider, one_dai())
            .unwrap_err();
        assert!(matches!(err, VirtualPoolError::TokenMissing { token, .. } if token == outsider));
    }
}

#[test]
fn test_same_token_rejected() {
    let snapshot = snapshot();
    let err = path::compile_swap_plan(snapshot.dictionary(), VIRTUAL_POOL_ID, addr(DAI), addr(DAI), one_dai())
        .unwrap_err();
    assert!(matches!(err, VirtualPoolError::IdenticalTokens { .. }));
}

#[test]
fn test_zero_amount_rejected() {
    let snapshot = snapshot();
    let err = path::compile_swap_plan(snapshot.dictionary(), VIRTUAL_POOL_ID, addr(DAI), addr(USDC), U256::zero())
        .unwrap_err();
    assert!(matches!(err, VirtualPoolError::ZeroAmount { .. }));
}

#[test]
fn test_mixed_case_identifiers() {
    let snapshot = snapshot();
    let upper_id = VIRTUAL_POOL_ID.to_uppercase().replacen("0X", "0x", 1);
    let lower_dai = addr(&DAI.to_lowercase());

    let plan = path::compile_swap_plan(snapshot.dictionary(), &upper_id, lower_dai, addr(USDC), one_dai()).unwrap();
    assert_eq!(plan.token_in(), Some(addr(DAI)));
    assert!(snapshot.get(&upper_id).is_some());
    assert!(snapshot.descriptor(&upper_id).is_some());
}

#[test]
fn test_missing_phantom_skips_linear_pools() {
    let batch: Vec<PoolDescriptor> = vec![bb_a_dai(), bb_a_usdc(), bb_a_usdt()];
    let snapshot = VirtualPoolSnapshot::build(&batch);
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.skipped_linear_pools().len(), 3);
}

#[test]
fn test_partial_batch_lists_remaining_tokens() {
    let batch = vec![bb_a_usd(), bb_a_dai(), bb_a_usdc()];
    let snapshot = VirtualPoolSnapshot::build(&batch);
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.skipped_linear_pools().is_empty());

    let err = path::compile_swap_plan(snapshot.dictionary(), VIRTUAL_POOL_ID, addr(USDT), addr(DAI), one_dai())
        .unwrap_err();
    assert!(matches!(err, VirtualPoolError::TokenMissing { .. }));
}

#[test]
fn test_pair_resolution_and_liquidity_gate() {
    let snapshot = snapshot();
    let descriptor = snapshot.descriptor(VIRTUAL_POOL_ID).unwrap();
    let ctx = pair::resolve_pair(&snapshot, descriptor, addr(DAI), addr(USDC)).unwrap();
    assert_eq!(ctx.phantom_pool_id, id(BB_A_USD_ID));
    assert_eq!(ctx.token_in_decimals, Some(18));
    assert_eq!(ctx.token_out_decimals, Some(6));

    // 1 DAI needs 1 USDC (6 decimals) of reserve.
    let reserves = PoolReserves::new().with(addr(USDC), U256::from(1_000_001u64));
    assert!(liquidity::is_usable(&reserves, one_dai(), SwapSide::Sell, &ctx));
    let reserves = PoolReserves::new().with(addr(USDC), U256::from(1_000_000u64));
    assert!(!liquidity::is_usable(&reserves, one_dai(), SwapSide::Sell, &ctx));

    assert!(!liquidity::is_usable(&PoolReserves::new(), one_dai(), SwapSide::Sell, &ctx));
    assert!(!liquidity::is_usable(&PoolReserves::new(), one_dai(), SwapSide::Buy, &ctx));
}

#[test]
fn test_snapshot_store_swaps_whole_snapshot() {
    let store = SnapshotStore::default();
    assert!(store.load().is_empty());

    store.replace(snapshot());
    let in_flight = store.load();
    store.replace(VirtualPoolSnapshot::build(&[bb_a_dai()]));

    assert_eq!(in_flight.len(), 1);
    assert!(store.load().is_empty());
    assert_eq!(store.load().skipped_linear_pools(), &[id(BB_A_DAI_ID)]);
}
