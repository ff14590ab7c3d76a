//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    domain::{BlockTimestamp, WithdrawalRequestId, YoctoNear},
    errors::{
        illegal_state::UNEXPECTED_DELEGATE_LOCK,
        staking_delegate_failures::{CLAIM_WITHDRAWAL_FAILURE, REQUEST_WITHDRAWAL_FAILURE},
        Failure,
    },
    interface::{
        self,
        staking_service::events::{
            WithdrawalClaimed, WithdrawalRequestCancelled, WithdrawalRequested,
        },
        DelegateWithdrawal, Redemption,
    },
    near::{self, log, log_events::LOG_EVENT_DELEGATE_CALL_ROLLED_BACK},
};
use near_sdk::{json_types::U128, near_bindgen, Promise};

#[near_bindgen]
impl LiquidStakingContract {
    /// If the staking delegate accepted the withdrawal, then its handle and unlock time are recorded on
    /// the request.
    ///
    /// If the staking delegate rejected it, then the redemption is rolled back: the pool is restored to
    /// its state before the redemption, the burned receipts are minted back to the requester, and the
    /// request is cancelled.
    pub fn on_request_withdrawal(
        &mut self,
        request_id: interface::WithdrawalRequestId,
    ) -> Redemption {
        near::assert_predecessor_is_self();

        let request_id: WithdrawalRequestId = request_id.into();
        let rollback = match self.take_delegate_lock() {
            DelegateLock::RequestingWithdrawal {
                request_id: locked,
                rollback,
            } if locked == request_id => rollback,
            _ => UNEXPECTED_DELEGATE_LOCK.panic(),
        };
        let mut request = self.registered_withdrawal_request(request_id);

        match near::promise_result_value::<DelegateWithdrawal>() {
            Some(withdrawal) => {
                request.acknowledge(withdrawal.handle.0, withdrawal.unlock_timestamp.0.into());
                self.withdrawal_requests.insert(&request_id, &request);
                log(WithdrawalRequested {
                    request_id: request_id.value(),
                    account_id: request.requester(),
                    receipts_burned: request.receipts_burned().value(),
                    amount: request.amount().value(),
                    local_reserved: request.local_reserved().value(),
                    delegate_amount: request.delegate_amount().value(),
                    unlock_timestamp: withdrawal.unlock_timestamp.0,
                });
                let now = BlockTimestamp::from_env();
                Redemption::Deferred {
                    request: interface::WithdrawalRequest::new(&request, now),
                }
            }
            None => {
                REQUEST_WITHDRAWAL_FAILURE.log();
                self.pool = rollback;
                self.receipt_token
                    .mint(request.requester(), request.receipts_burned());
                request.cancel();
                self.withdrawal_requests.insert(&request_id, &request);
                self.outstanding_withdrawal_requests -= 1;
                LOG_EVENT_DELEGATE_CALL_ROLLED_BACK.log(format!(
                    "withdrawal request_id={} amount={}",
                    request_id.value(),
                    request.delegate_amount()
                ));
                log(WithdrawalRequestCancelled {
                    request_id: request_id.value(),
                    account_id: request.requester(),
                    receipts_restored: request.receipts_burned().value(),
                });
                Redemption::Cancelled {
                    request_id: request_id.into(),
                    reason: REQUEST_WITHDRAWAL_FAILURE.to_string(),
                }
            }
        }
    }

    /// If the funds were claimed from the staking delegate, then the requester is paid the NEAR owed
    /// and the request is settled. NEAR returned by the staking delegate beyond the withdrawn amount is
    /// credited back to the pool.
    ///
    /// If the claim failed, then the request stays claimable and can be claimed again.
    pub fn on_claim_withdrawal(
        &mut self,
        request_id: interface::WithdrawalRequestId,
    ) -> Result<interface::YoctoNear, Failure> {
        near::assert_predecessor_is_self();

        let request_id: WithdrawalRequestId = request_id.into();
        match self.take_delegate_lock() {
            DelegateLock::ClaimingWithdrawal { request_id: locked } if locked == request_id => {}
            _ => UNEXPECTED_DELEGATE_LOCK.panic(),
        }
        let mut request = self.registered_withdrawal_request(request_id);

        let claimed: YoctoNear = match near::promise_result_value::<U128>() {
            Some(claimed) => claimed.0.into(),
            None => {
                CLAIM_WITHDRAWAL_FAILURE.log();
                return Err(CLAIM_WITHDRAWAL_FAILURE.into());
            }
        };

        let payout = request.payout(claimed);
        if claimed > request.delegate_amount() {
            self.pool
                .credit_liquidity(claimed - request.delegate_amount());
        }
        self.pool.release_reserved(request.local_reserved());
        request.settle();
        self.withdrawal_requests.insert(&request_id, &request);
        self.outstanding_withdrawal_requests -= 1;

        Promise::new(request.requester().clone()).transfer(payout.value());
        log(WithdrawalClaimed {
            request_id: request_id.value(),
            account_id: request.requester(),
            amount: payout.value(),
        });
        Ok(payout.into())
    }
}
