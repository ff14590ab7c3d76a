use crate::domain::{PrincipalPool, WithdrawalRequestId, YoctoNear};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

/// Held while a staking delegate call is in flight. Only the callback for the call releases it.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq)]
pub enum DelegateLock {
    Delegating {
        amount: YoctoNear,
    },
    /// `rollback` is the pool as it was before the redemption was debited
    RequestingWithdrawal {
        request_id: WithdrawalRequestId,
        rollback: PrincipalPool,
    },
    ClaimingWithdrawal {
        request_id: WithdrawalRequestId,
    },
    SettlingRewards,
}
