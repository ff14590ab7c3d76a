//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    errors::{
        illegal_state::UNEXPECTED_DELEGATE_LOCK, staking_delegate_failures::DEPOSIT_FAILURE,
        Failure,
    },
    interface::{self, staking_service::events::PrincipalDelegated},
    near::{self, log, log_events::LOG_EVENT_DELEGATE_CALL_ROLLED_BACK},
};
use near_sdk::near_bindgen;

#[near_bindgen]
impl LiquidStakingContract {
    /// Releases the delegate lock. The principal is moved to the delegated side of the pool only if
    /// the staking delegate accepted the deposit - otherwise the NEAR was refunded to the contract
    /// and the pool is left as is.
    pub fn on_delegate_principal(
        &mut self,
        amount: interface::YoctoNear,
    ) -> Result<interface::YoctoNear, Failure> {
        near::assert_predecessor_is_self();

        let amount: domain::YoctoNear = amount.into();
        match self.take_delegate_lock() {
            DelegateLock::Delegating { amount: locked } if locked == amount => {}
            _ => UNEXPECTED_DELEGATE_LOCK.panic(),
        }

        if !near::is_promise_success() {
            DEPOSIT_FAILURE.log();
            LOG_EVENT_DELEGATE_CALL_ROLLED_BACK.log(format!("deposit amount={}", amount));
            return Err(DEPOSIT_FAILURE.into());
        }

        // checked when the call was made and the lock has blocked changes since
        self.pool
            .apply_delegation(amount)
            .unwrap_or_else(|err| err.panic());
        log(PrincipalDelegated {
            amount: amount.value(),
            delegated_principal: self.pool.delegated_principal().value(),
            undelegated_principal: self.pool.undelegated_principal().value(),
        });
        Ok(amount.into())
    }
}
