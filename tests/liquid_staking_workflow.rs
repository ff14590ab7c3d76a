
use near_sdk::json_types::ValidAccountId;
use oysterpack_near_liquid_staking::{
    domain::{BasisPoints, ExchangeRateMode, WithdrawalState},
    errors::{
        settlement::SLASHING_DETECTED,
        staking_delegate_failures::{
            CLAIM_WITHDRAWAL_FAILURE, DEPOSIT_FAILURE, REPORT_BALANCES_FAILURE,
            REQUEST_WITHDRAWAL_FAILURE,
        },
    },
    interface::{
        Operator, ReceiptToken, Redemption, SettingsRegistry, SettingsUpdate, StakingService,
    },
    near::YOCTO,
};
use std::cmp::Ordering;
use std::convert::TryFrom;
use test_utils::*;

fn receipt_balance(ctx: &TestContext, account_id: &str) -> u128 {
    ctx.call_as(account_id);
    ctx.contract
        .ft_balance_of(ValidAccountId::try_from(account_id).unwrap())
        .0
}

fn total_managed_assets(ctx: &TestContext) -> u128 {
    ctx.call_as(OPERATOR);
    ctx.contract.exchange_rate().total_managed_assets.value()
}

fn exchange_rate_value(ctx: &TestContext) -> u128 {
    ctx.call_as(OPERATOR);
    ctx.contract.exchange_rate().value.value()
}

fn receipt_supply(ctx: &TestContext) -> u128 {
    ctx.call_as(OPERATOR);
    ctx.contract.ft_total_supply().0
}

fn total_principal(ctx: &TestContext) -> u128 {
    ctx.call_as(OPERATOR);
    ctx.contract.principal_pool().total_principal.value()
}

/// Given Alfio stakes 100 NEAR
/// And all of it is delegated
/// When the staking delegate earns 10 NEAR in rewards
/// And rewards are settled
/// Then the fee is minted as receipts to the treasury
/// And the exchange rate goes up
/// And Bob receives fewer receipts for his stake
#[test]
fn rewards_raise_exchange_rate() {
    let mut ctx = TestContext::new(contract_settings());

    assert_eq!(ctx.stake(ALFIO, 100 * YOCTO), 100 * YOCTO);
    assert_eq!(exchange_rate_value(&ctx), YOCTO);
    assert_eq!(
        ctx.delegate_principal(None).unwrap().value(),
        100 * YOCTO
    );

    ctx.distribute_rewards(10 * YOCTO);
    let settlement = ctx.settle_rewards().unwrap();
    assert_eq!(settlement.rewards.value(), 10 * YOCTO);
    assert_eq!(settlement.fee.value(), YOCTO);
    assert_eq!(settlement.fee_receipts.value(), 100 * YOCTO / 109);
    assert_eq!(
        receipt_balance(&ctx, TREASURY),
        settlement.fee_receipts.value()
    );
    assert_eq!(total_managed_assets(&ctx), 110 * YOCTO);
    let rate = exchange_rate_value(&ctx);
    assert!(rate > YOCTO);

    let receipts = ctx.stake(BOB, 11 * YOCTO);
    assert!(receipts < 11 * YOCTO);
    // staking does not dilute the exchange rate
    assert!(exchange_rate_value(&ctx) >= rate);

    // settling again without new rewards changes nothing
    let settlement = ctx.settle_rewards().unwrap();
    assert_eq!(settlement.rewards.value(), 0);
    assert_eq!(settlement.fee_receipts.value(), 0);
}

/// Given Alfio's stake has been delegated
/// When Alfio unstakes
/// Then the redemption is deferred until the staking delegate unbonds the funds
/// And the withdrawal can be claimed once unlocked
#[test]
fn unstake_deferred_until_unbonded() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(Some(80 * YOCTO)).unwrap();

    let request = match ctx.unstake(ALFIO, 50 * YOCTO) {
        Redemption::Deferred { request } => request,
        redemption => panic!("expected deferred redemption: {:?}", redemption),
    };
    assert_eq!(request.amount.value(), 50 * YOCTO);
    assert_eq!(request.local_reserved.value(), 20 * YOCTO);
    assert_eq!(request.delegate_amount.value(), 30 * YOCTO);
    assert_eq!(request.state, WithdrawalState::Pending);
    assert_eq!(
        request.unlock_timestamp.as_ref().unwrap().value(),
        UNBONDING_PERIOD
    );
    assert_eq!(receipt_balance(&ctx, ALFIO), 50 * YOCTO);
    assert_eq!(total_managed_assets(&ctx), 50 * YOCTO);

    ctx.advance_time(UNBONDING_PERIOD);
    assert_eq!(
        ctx.withdrawal_request(request.id.value()).state,
        WithdrawalState::Claimable
    );
    let paid = ctx
        .claim_withdrawal(ALFIO, request.id.value())
        .unwrap();
    assert_eq!(paid.value(), 50 * YOCTO);
    assert_eq!(
        ctx.withdrawal_request(request.id.value()).state,
        WithdrawalState::Settled
    );

    ctx.call_as(OPERATOR);
    let state = ctx.contract.contract_state();
    assert_eq!(state.outstanding_withdrawal_requests.0, 0);
    assert_eq!(state.pool.reserved_liquidity.value(), 0);
    assert_eq!(state.pool.total_principal.value(), 50 * YOCTO);
    assert_eq!(state.pool.delegated_principal.value(), 50 * YOCTO);
    assert!(state.delegate_lock.is_none());
}

#[test]
fn unstake_paid_from_undelegated_principal() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(Some(50 * YOCTO)).unwrap();

    match ctx.unstake(ALFIO, 50 * YOCTO) {
        Redemption::Paid { amount } => assert_eq!(amount.value(), 50 * YOCTO),
        redemption => panic!("expected paid redemption: {:?}", redemption),
    }
    assert_eq!(receipt_balance(&ctx, ALFIO), 50 * YOCTO);
}

/// Given 1 NEAR is staked at genesis
/// When all of the receipts are unstaked
/// Then exactly 1 NEAR is paid out from the undelegated principal
/// And the pool is back to genesis
#[test]
fn unstake_all_at_genesis_empties_pool() {
    let mut ctx = TestContext::new(contract_settings());
    let receipts = ctx.stake(ALFIO, YOCTO);
    assert_eq!(receipts, YOCTO);
    assert_eq!(exchange_rate_value(&ctx), YOCTO);

    match ctx.unstake(ALFIO, receipts) {
        Redemption::Paid { amount } => assert_eq!(amount.value(), YOCTO),
        redemption => panic!("expected paid redemption: {:?}", redemption),
    }
    assert_eq!(total_principal(&ctx), 0);
    assert_eq!(receipt_supply(&ctx), 0);
    assert_eq!(total_managed_assets(&ctx), 0);
    assert_eq!(exchange_rate_value(&ctx), YOCTO);
}

/// Given Bob has 7 NEAR staked
/// When Alfio stakes and immediately unstakes all of his receipts
/// Then Alfio gets back exactly what he staked
/// And the receipt supply and total principal are restored
#[test]
fn stake_unstake_round_trip_restores_pool() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(BOB, 7 * YOCTO);
    let supply_before = receipt_supply(&ctx);
    let principal_before = total_principal(&ctx);

    let amount = 123 * YOCTO + 456_789;
    let receipts = ctx.stake(ALFIO, amount);
    match ctx.unstake(ALFIO, receipts) {
        Redemption::Paid { amount: paid } => assert_eq!(paid.value(), amount),
        redemption => panic!("expected paid redemption: {:?}", redemption),
    }
    assert_eq!(receipt_balance(&ctx, ALFIO), 0);
    assert_eq!(receipt_supply(&ctx), supply_before);
    assert_eq!(total_principal(&ctx), principal_before);
}

/// Given Alfio stakes 1 NEAR and it is all delegated
/// When Alfio unstakes all of his receipts
/// Then the payout is deferred until the funds are unbonded
/// And once claimed, Alfio gets back exactly 1 NEAR and the pool is empty
#[test]
fn deferred_round_trip_restores_pool() {
    let mut ctx = TestContext::new(contract_settings());
    let receipts = ctx.stake(ALFIO, YOCTO);
    ctx.delegate_principal(None).unwrap();

    let request_id = match ctx.unstake(ALFIO, receipts) {
        Redemption::Deferred { request } => request.id.value(),
        redemption => panic!("expected deferred redemption: {:?}", redemption),
    };
    assert_eq!(receipt_supply(&ctx), 0);
    assert_eq!(total_principal(&ctx), 0);

    ctx.advance_time(UNBONDING_PERIOD);
    assert_eq!(ctx.claim_withdrawal(ALFIO, request_id).unwrap().value(), YOCTO);
    ctx.call_as(OPERATOR);
    let state = ctx.contract.contract_state();
    assert_eq!(state.pool.total_principal.value(), 0);
    assert_eq!(state.pool.reserved_liquidity.value(), 0);
    assert_eq!(state.pool.delegated_principal.value(), 0);
}

#[test]
#[should_panic(expected = "[ERR] [NOT_YET_UNLOCKED]")]
fn claim_before_unlocked() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(None).unwrap();
    ctx.unstake(ALFIO, 50 * YOCTO);

    ctx.advance_time(UNBONDING_PERIOD - 1);
    ctx.claim_withdrawal(ALFIO, 1).unwrap();
}

#[test]
fn delegate_unavailable_for_deposit() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);

    ctx.set_delegate_online(false);
    assert_eq!(ctx.delegate_principal(None), Err(DEPOSIT_FAILURE.into()));
    ctx.call_as(OPERATOR);
    let pool = ctx.contract.principal_pool();
    assert_eq!(pool.undelegated_principal.value(), 100 * YOCTO);
    assert_eq!(pool.delegated_principal.value(), 0);
    assert!(ctx.delegate_lock().is_none());

    ctx.set_delegate_online(true);
    assert!(ctx.delegate_principal(None).is_ok());
}

#[test]
fn delegate_unavailable_for_withdrawal_request() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(None).unwrap();
    ctx.call_as(OPERATOR);
    let pool_before = ctx.contract.principal_pool();

    ctx.set_delegate_online(false);
    match ctx.unstake(ALFIO, 50 * YOCTO) {
        Redemption::Cancelled { request_id, reason } => {
            assert_eq!(reason, REQUEST_WITHDRAWAL_FAILURE.to_string());
            assert_eq!(
                ctx.withdrawal_request(request_id.value()).state,
                WithdrawalState::Cancelled
            );
        }
        redemption => panic!("expected cancelled redemption: {:?}", redemption),
    }
    // the redemption is rolled back
    assert_eq!(receipt_balance(&ctx, ALFIO), 100 * YOCTO);
    ctx.call_as(OPERATOR);
    assert_eq!(ctx.contract.principal_pool(), pool_before);
    assert_eq!(ctx.contract.contract_state().outstanding_withdrawal_requests.0, 0);
}

#[test]
fn delegate_unavailable_for_claim() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(None).unwrap();
    ctx.unstake(ALFIO, 50 * YOCTO);
    ctx.advance_time(UNBONDING_PERIOD);

    ctx.set_delegate_online(false);
    assert_eq!(
        ctx.claim_withdrawal(ALFIO, 1),
        Err(CLAIM_WITHDRAWAL_FAILURE.into())
    );
    assert_eq!(ctx.withdrawal_request(1).state, WithdrawalState::Claimable);
    assert!(ctx.delegate_lock().is_none());

    ctx.set_delegate_online(true);
    // the operator can claim on behalf of the requester
    assert_eq!(ctx.claim_withdrawal(OPERATOR, 1).unwrap().value(), 50 * YOCTO);
    assert_eq!(ctx.withdrawal_request(1).state, WithdrawalState::Settled);
}

#[test]
fn delegate_unavailable_for_settlement() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(None).unwrap();
    ctx.distribute_rewards(10 * YOCTO);

    ctx.set_delegate_online(false);
    assert_eq!(ctx.settle_rewards(), Err(REPORT_BALANCES_FAILURE.into()));
    assert_eq!(total_managed_assets(&ctx), 100 * YOCTO);
    assert!(ctx.delegate_lock().is_none());
}

/// Given the staking delegate was slashed beyond the slashing tolerance
/// When rewards are settled
/// Then the loss is reported and settlement is halted
/// And once the operator acknowledges the slashing, the loss is written off and settlement resumes
#[test]
fn slashing_beyond_tolerance_halts_settlement() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(None).unwrap();
    let rate = exchange_rate_value(&ctx);

    ctx.slash(5 * YOCTO);
    assert_eq!(ctx.settle_rewards(), Err(SLASHING_DETECTED.into()));
    assert_eq!(exchange_rate_value(&ctx), rate);
    ctx.call_as(OPERATOR);
    let report = ctx.contract.contract_state().slashing_report.unwrap();
    assert_eq!(report.loss.value(), 5 * YOCTO);

    ctx.call_as(OPERATOR);
    let report = ctx.contract.acknowledge_slashing();
    assert_eq!(report.loss.value(), 5 * YOCTO);
    assert_eq!(total_managed_assets(&ctx), 95 * YOCTO);
    assert!(exchange_rate_value(&ctx) < rate);

    ctx.distribute_rewards(YOCTO);
    assert_eq!(ctx.settle_rewards().unwrap().rewards.value(), YOCTO);
}

#[test]
#[should_panic(expected = "[ERR] [SLASHING_TOLERANCE_EXCEEDED] rewards settlement is halted")]
fn settlement_halted_until_slashing_acknowledged() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(None).unwrap();
    ctx.slash(5 * YOCTO);
    let _ = ctx.settle_rewards();
    let _ = ctx.settle_rewards();
}

#[test]
fn loss_within_tolerance_is_absorbed() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(None).unwrap();
    let rate = exchange_rate_value(&ctx);

    ctx.slash(YOCTO / 2);
    let settlement = ctx.settle_rewards().unwrap();
    assert_eq!(settlement.loss.value(), YOCTO / 2);
    assert_eq!(total_managed_assets(&ctx), 100 * YOCTO - YOCTO / 2);
    assert!(exchange_rate_value(&ctx) < rate);
}

#[test]
fn stake_beyond_liquidity_buffer_is_auto_delegated() {
    let mut settings = contract_settings();
    settings.liquidity_buffer = Some((20 * YOCTO).into());
    let mut ctx = TestContext::new(settings);

    ctx.stake(ALFIO, 15 * YOCTO);
    ctx.call_as(OPERATOR);
    assert_eq!(
        ctx.contract.principal_pool().delegated_principal.value(),
        0
    );

    ctx.stake(BOB, 25 * YOCTO);
    ctx.call_as(OPERATOR);
    let pool = ctx.contract.principal_pool();
    assert_eq!(pool.undelegated_principal.value(), 20 * YOCTO);
    assert_eq!(pool.delegated_principal.value(), 20 * YOCTO);
    assert!(ctx.delegate_lock().is_none());
}

#[test]
#[should_panic(expected = "[ERR] [CONTRACT_LOCKED]")]
fn stake_blocked_while_delegate_call_in_progress() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.call_as(OPERATOR);
    ctx.contract.settle_rewards();

    ctx.call_with_deposit(BOB, YOCTO);
    ctx.contract.user_stake();
}

#[test]
fn fixed_exchange_rate_mode() {
    let mut settings = contract_settings();
    settings.exchange_rate_mode = Some(ExchangeRateMode::Fixed);
    settings.fee_rate = Some(BasisPoints(500));
    let mut ctx = TestContext::new(settings);

    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(None).unwrap();
    ctx.distribute_rewards(10 * YOCTO);
    let settlement = ctx.settle_rewards().unwrap();
    assert_eq!(settlement.fee.value(), YOCTO / 2);
    assert_eq!(settlement.fee_receipts.value(), YOCTO / 2);

    assert_eq!(exchange_rate_value(&ctx), YOCTO);
    assert_eq!(ctx.stake(BOB, 10 * YOCTO), 10 * YOCTO);
}

#[test]
#[should_panic(expected = "[ERR] [INVALID_CONFIG] exchange rate mode cannot be changed")]
fn exchange_rate_mode_pinned_once_staked() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.call_as(OPERATOR);
    ctx.contract.update_settings(SettingsUpdate {
        exchange_rate_mode: Some(ExchangeRateMode::Fixed),
        ..Default::default()
    });
}

/// receipts outstanding always cover the redeemable NEAR, i.e., the last staker out is made whole
#[test]
fn all_receipts_redeemable() {
    let mut ctx = TestContext::new(contract_settings());
    ctx.stake(ALFIO, 100 * YOCTO);
    ctx.delegate_principal(None).unwrap();
    ctx.distribute_rewards(7 * YOCTO);
    ctx.settle_rewards().unwrap();
    ctx.stake(BOB, 3 * YOCTO);

    let alfio_receipts = receipt_balance(&ctx, ALFIO);
    let rate_before = exchange_rate_value(&ctx);
    match ctx.unstake(ALFIO, alfio_receipts) {
        Redemption::Deferred { request } => {
            assert!(request.amount.value() > 100 * YOCTO);
        }
        redemption => panic!("expected deferred redemption: {:?}", redemption),
    }
    ctx.call_as(OPERATOR);
    let rate_after = ctx.contract.exchange_rate();
    assert_ne!(rate_after.value.value().cmp(&rate_before), Ordering::Less);

    let bob_receipts = receipt_balance(&ctx, BOB);
    let treasury_receipts = receipt_balance(&ctx, TREASURY);
    ctx.call_as(OPERATOR);
    assert_eq!(
        ctx.contract.ft_total_supply().0,
        bob_receipts + treasury_receipts
    );
}
