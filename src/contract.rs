pub mod operator;
pub mod receipt_token;
pub mod redeeming_workflow_callbacks;
pub mod settings_registry;
pub mod settlement_callbacks;
pub mod staking_service;
pub mod staking_workflow_callbacks;

use crate::domain::{self, YoctoNear};
use crate::errors::{
    asserts::{BLOCKED_BY_DELEGATE_CALL, PREDECESSOR_MUST_BE_OPERATOR},
    illegal_state::{UNEXPECTED_DELEGATE_LOCK, WITHDRAWAL_REQUEST_SHOULD_EXIST},
    ErrorConst,
};
use crate::interface::{ext_staking_delegate, ext_staking_workflow_callbacks};
use crate::near::NO_DEPOSIT;
use crate::LiquidStakingContract;
use near_sdk::{env, Promise};

impl LiquidStakingContract {
    /// asserts that the predecessor account ID must be the operator
    fn assert_predecessor_is_operator(&self) {
        PREDECESSOR_MUST_BE_OPERATOR.assert(|| env::predecessor_account_id() == self.operator_id);
    }

    /// asserts that no staking delegate call is in progress
    fn assert_not_locked(&self) {
        BLOCKED_BY_DELEGATE_CALL.assert(|| self.delegate_lock.is_none());
    }

    fn exchange_rate_snapshot(&self) -> domain::ExchangeRate {
        self.pool.exchange_rate(
            self.receipt_token.total_supply(),
            self.settings.exchange_rate_mode(),
        )
    }

    /// the staking delegate holds funds on behalf of the contract or is being called
    fn delegate_in_use(&self) -> bool {
        self.pool.delegate_balance().value() > 0
            || self.outstanding_withdrawal_requests > 0
            || self.delegate_lock.is_some()
    }

    /// takes the delegate lock, which must be held by the callback that is processing the result
    fn take_delegate_lock(&mut self) -> domain::DelegateLock {
        self.delegate_lock
            .take()
            .unwrap_or_else(|| UNEXPECTED_DELEGATE_LOCK.panic())
    }

    fn registered_withdrawal_request(
        &self,
        request_id: domain::WithdrawalRequestId,
    ) -> domain::WithdrawalRequest {
        self.withdrawal_requests
            .get(&request_id)
            .unwrap_or_else(|| WITHDRAWAL_REQUEST_SHOULD_EXIST.panic())
    }

    /// Locks the contract and deposits the principal with the staking delegate. The ledger is only
    /// updated once the deposit succeeds.
    fn start_delegation(&mut self, amount: YoctoNear) -> Result<Promise, ErrorConst> {
        self.pool.check_delegation(amount)?;
        self.delegate_lock = Some(domain::DelegateLock::Delegating { amount });

        let gas_config = self.settings.gas_config();
        let deposit = ext_staking_delegate::deposit(
            self.settings.delegate_id(),
            amount.value(),
            gas_config.staking_delegate().deposit(),
        );
        let on_delegate_principal = ext_staking_workflow_callbacks::on_delegate_principal(
            amount.into(),
            &env::current_account_id(),
            NO_DEPOSIT.into(),
            gas_config.callbacks().on_delegate_principal(),
        );
        Ok(deposit.then(on_delegate_principal))
    }
}
