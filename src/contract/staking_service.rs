//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    domain::{
        BlockTimestamp, LiquiditySource, WithdrawalRequest, WithdrawalRequestId, YoctoNear,
        YoctoReceipt,
    },
    errors::{
        asserts::PREDECESSOR_MUST_BE_REQUESTER_OR_OPERATOR,
        staking_service::{
            INSUFFICIENT_RECEIPTS_FOR_REDEEM_REQUEST, REDEEM_TOO_SMALL, STAKE_BELOW_MINIMUM,
            STAKE_TOO_SMALL_TO_MINT, ZERO_REDEEM_AMOUNT, ZERO_STAKE_AMOUNT,
        },
        withdrawal_requests::REQUEST_NOT_FOUND,
        ErrorConst,
    },
    interface::{
        self, ext_redeeming_workflow_callbacks, ext_staking_delegate,
        staking_service::events::{Staked, Unstaked},
        Redemption, StakingService,
    },
    near::{log, log_events::LOG_EVENT_AUTO_DELEGATE, NO_DEPOSIT},
};
use near_sdk::{near_bindgen, Promise, PromiseOrValue};

#[near_bindgen]
impl StakingService for LiquidStakingContract {
    fn exchange_rate(&self) -> interface::ExchangeRate {
        self.exchange_rate_snapshot().into()
    }

    fn principal_pool(&self) -> interface::PrincipalPool {
        self.pool.into()
    }

    fn withdrawal_request(
        &self,
        request_id: interface::WithdrawalRequestId,
    ) -> Option<interface::WithdrawalRequest> {
        self.withdrawal_requests
            .get(&request_id.into())
            .map(|request| interface::WithdrawalRequest::new(&request, BlockTimestamp::from_env()))
    }

    #[payable]
    fn user_stake(&mut self) -> interface::YoctoReceipt {
        self.assert_not_locked();
        let account_id = env::predecessor_account_id();
        let receipts = self
            .stake(&account_id, env::attached_deposit().into())
            .unwrap_or_else(|err| err.panic());
        self.auto_delegate();
        receipts.into()
    }

    fn user_unstake(&mut self, amount: interface::YoctoReceipt) -> PromiseOrValue<Redemption> {
        self.assert_not_locked();
        let account_id = env::predecessor_account_id();
        self.unstake(&account_id, amount.into())
            .unwrap_or_else(|err| err.panic())
    }

    fn claim_withdrawal(&mut self, request_id: interface::WithdrawalRequestId) -> Promise {
        self.assert_not_locked();
        let request_id: WithdrawalRequestId = request_id.into();
        let mut request = self
            .withdrawal_requests
            .get(&request_id)
            .unwrap_or_else(|| REQUEST_NOT_FOUND.panic());
        let predecessor = env::predecessor_account_id();
        PREDECESSOR_MUST_BE_REQUESTER_OR_OPERATOR
            .assert(|| predecessor == *request.requester() || predecessor == self.operator_id);
        let handle = request
            .mark_claimable(BlockTimestamp::from_env())
            .unwrap_or_else(|err| err.panic());
        self.withdrawal_requests.insert(&request_id, &request);
        self.delegate_lock = Some(DelegateLock::ClaimingWithdrawal { request_id });

        let gas_config = self.settings.gas_config();
        ext_staking_delegate::claim_withdrawal(
            handle.into(),
            self.settings.delegate_id(),
            NO_DEPOSIT.into(),
            gas_config.staking_delegate().claim_withdrawal(),
        )
        .then(ext_redeeming_workflow_callbacks::on_claim_withdrawal(
            request_id.into(),
            &env::current_account_id(),
            NO_DEPOSIT.into(),
            gas_config.callbacks().on_claim_withdrawal(),
        ))
    }
}

impl LiquidStakingContract {
    /// mints receipts for the NEAR at the current exchange rate
    fn stake(
        &mut self,
        account_id: &AccountId,
        amount: YoctoNear,
    ) -> Result<YoctoReceipt, ErrorConst> {
        if amount.value() == 0 {
            return Err(ZERO_STAKE_AMOUNT);
        }
        if amount < self.settings.minimum_stake() {
            return Err(STAKE_BELOW_MINIMUM);
        }
        let exchange_rate = self.exchange_rate_snapshot();
        let receipts = exchange_rate.near_to_receipts(amount)?;
        if receipts.value() == 0 {
            return Err(STAKE_TOO_SMALL_TO_MINT);
        }

        self.pool.credit_stake(amount);
        self.receipt_token.mint(account_id, receipts);
        log(Staked {
            account_id,
            amount: amount.value(),
            receipts_minted: receipts.value(),
            exchange_rate: exchange_rate.value().value(),
        });
        Ok(receipts)
    }

    /// delegates the undelegated principal in excess of the liquidity buffer
    fn auto_delegate(&mut self) {
        let liquidity_buffer = match self.settings.liquidity_buffer() {
            Some(liquidity_buffer) => liquidity_buffer,
            None => return,
        };
        let undelegated_principal = self.pool.undelegated_principal();
        if undelegated_principal <= liquidity_buffer {
            return;
        }
        let excess = undelegated_principal - liquidity_buffer;
        LOG_EVENT_AUTO_DELEGATE.log(format!(
            "undelegated principal exceeds the liquidity buffer by {}",
            excess
        ));
        // the promise is detached - the callback releases the lock
        self.start_delegation(excess)
            .unwrap_or_else(|err| err.panic());
    }

    /// Burns the receipts and pays out their NEAR value from the undelegated principal if it
    /// suffices. Otherwise a withdrawal request is created for the shortfall.
    fn unstake(
        &mut self,
        account_id: &AccountId,
        receipts: YoctoReceipt,
    ) -> Result<PromiseOrValue<Redemption>, ErrorConst> {
        if receipts.value() == 0 {
            return Err(ZERO_REDEEM_AMOUNT);
        }
        if self.receipt_token.balance_of(account_id) < receipts {
            return Err(INSUFFICIENT_RECEIPTS_FOR_REDEEM_REQUEST);
        }
        let amount = self.exchange_rate_snapshot().receipts_to_near(receipts)?;
        if amount.value() == 0 {
            return Err(REDEEM_TOO_SMALL);
        }

        let rollback = self.pool;
        self.receipt_token.burn(account_id, receipts)?;
        match self.pool.redeem(amount)? {
            LiquiditySource::Local => {
                Promise::new(account_id.clone()).transfer(amount.value());
                log(Unstaked {
                    account_id,
                    receipts_burned: receipts.value(),
                    amount: amount.value(),
                });
                Ok(PromiseOrValue::Value(Redemption::Paid {
                    amount: amount.into(),
                }))
            }
            LiquiditySource::Delegate {
                local_reserved,
                shortfall,
            } => {
                let request_id = self.withdrawal_request_id_sequence.next();
                self.withdrawal_request_id_sequence = request_id;
                let request = WithdrawalRequest::new(
                    request_id,
                    account_id.clone(),
                    receipts,
                    local_reserved,
                    shortfall,
                );
                self.withdrawal_requests.insert(&request_id, &request);
                self.outstanding_withdrawal_requests += 1;
                self.delegate_lock = Some(DelegateLock::RequestingWithdrawal {
                    request_id,
                    rollback,
                });

                let gas_config = self.settings.gas_config();
                let promise = ext_staking_delegate::request_withdrawal(
                    shortfall.value().into(),
                    self.settings.delegate_id(),
                    NO_DEPOSIT.into(),
                    gas_config.staking_delegate().request_withdrawal(),
                )
                .then(ext_redeeming_workflow_callbacks::on_request_withdrawal(
                    request_id.into(),
                    &env::current_account_id(),
                    NO_DEPOSIT.into(),
                    gas_config.callbacks().on_request_withdrawal(),
                ));
                Ok(PromiseOrValue::Promise(promise))
            }
        }
    }
}
