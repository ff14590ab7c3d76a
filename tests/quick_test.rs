use oysterpack_near_liquid_staking::domain::{
    ExchangeRate, ExchangeRateMode, LiquiditySource, PrincipalPool, YoctoNear, YoctoReceipt,
};
use oysterpack_near_liquid_staking::near::YOCTO;
use quickcheck_macros::quickcheck;
use std::cmp::Ordering;

/// scales the generated value into a realistic yoctoNEAR amount, i.e., up to ~4 billion NEAR
fn yocto(value: u32, fraction: u32) -> u128 {
    value as u128 * YOCTO + fraction as u128
}

fn rate(assets: u128, supply: u128) -> ExchangeRate {
    ExchangeRate::new(assets.into(), supply.into(), ExchangeRateMode::Dynamic)
}

#[quickcheck]
fn round_trip_never_creates_value(assets: u32, supply: u32, amount: u32, fraction: u32) -> bool {
    let rate = rate(yocto(assets, fraction), yocto(supply, 0));
    let near: YoctoNear = yocto(amount, fraction).into();
    match rate.near_to_receipts(near) {
        Ok(receipts) => rate.receipts_to_near(receipts).map_or(false, |value| value <= near),
        // unbacked receipts or an unrepresentable amount are rejected
        Err(_) => supply > 0,
    }
}

#[quickcheck]
fn staking_never_lowers_exchange_rate(
    assets: u32,
    supply: u32,
    amount: u32,
    fraction: u32,
) -> bool {
    let assets = yocto(assets, fraction);
    let supply = yocto(supply, 0);
    let before = rate(assets, supply);
    let near = yocto(amount, fraction);
    let receipts = match before.near_to_receipts(near.into()) {
        Ok(receipts) => receipts,
        // unbacked receipts, or an amount too large to convert, which requires near > assets
        Err(_) => return assets == 0 || near > assets,
    };
    let after = rate(assets + near, supply + receipts.value());
    after.compare(&before) != Ordering::Less
}

#[quickcheck]
fn redeeming_never_lowers_exchange_rate(assets: u32, supply: u32, receipts: u32) -> bool {
    if supply == 0 || assets == 0 {
        return true;
    }
    let assets = yocto(assets, 0);
    let supply = yocto(supply, 0);
    let receipts = yocto(receipts, 0).min(supply);
    let before = rate(assets, supply);
    // receipts never exceed the supply, thus the NEAR value never exceeds the assets
    let near = before.receipts_to_near(YoctoReceipt(receipts)).unwrap();
    if receipts == supply {
        // the last redeemer takes all managed assets
        return near.value() == assets;
    }
    let after = rate(assets - near.value(), supply - receipts);
    after.compare(&before) != Ordering::Less
}

/// the pool accounts for every yoctoNEAR across its buckets
#[quickcheck]
fn redeem_preserves_pool_accounting(staked: u32, delegated: u32, redeemed: u32) -> bool {
    let staked = staked as u128 + 1;
    let delegated = delegated as u128 % staked;
    let redeemed = redeemed as u128 % staked + 1;

    let mut pool = PrincipalPool::default();
    pool.credit_stake(staked.into());
    if delegated > 0 {
        pool.apply_delegation(delegated.into()).unwrap();
    }
    let assets_before = pool.total_managed_assets();
    match pool.redeem(redeemed.into()).unwrap() {
        LiquiditySource::Local => {
            pool.total_managed_assets().value() + redeemed == assets_before.value()
                && pool.reserved_liquidity() == YoctoNear::ZERO
        }
        LiquiditySource::Delegate {
            local_reserved,
            shortfall,
        } => {
            local_reserved + shortfall == redeemed.into()
                && pool.reserved_liquidity() == local_reserved
                && pool.total_managed_assets().value() + redeemed == assets_before.value()
        }
    }
}
