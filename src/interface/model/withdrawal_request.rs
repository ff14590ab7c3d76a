use crate::domain::{self, WithdrawalState};
use crate::interface::{BlockTimestamp, WithdrawalRequestId, YoctoNear, YoctoReceipt};
use near_sdk::{
    json_types::U64,
    serde::{Deserialize, Serialize},
    AccountId,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct WithdrawalRequest {
    pub id: WithdrawalRequestId,
    pub requester: AccountId,
    pub receipts_burned: YoctoReceipt,
    /// total NEAR owed to the requester
    pub amount: YoctoNear,
    /// portion of the amount that was covered by the local pool
    pub local_reserved: YoctoNear,
    /// portion of the amount that is withdrawn from the staking delegate
    pub delegate_amount: YoctoNear,
    pub delegate_handle: Option<U64>,
    pub request_timestamp: BlockTimestamp,
    pub unlock_timestamp: Option<BlockTimestamp>,
    pub state: WithdrawalState,
}

impl WithdrawalRequest {
    /// `now` is used to report pending requests whose funds have unlocked as claimable
    pub fn new(request: &domain::WithdrawalRequest, now: domain::BlockTimestamp) -> Self {
        Self {
            id: request.id().into(),
            requester: request.requester().clone(),
            receipts_burned: request.receipts_burned().into(),
            amount: request.amount().into(),
            local_reserved: request.local_reserved().into(),
            delegate_amount: request.delegate_amount().into(),
            delegate_handle: request.delegate_handle().map(Into::into),
            request_timestamp: request.request_timestamp().into(),
            unlock_timestamp: request.unlock_timestamp().map(Into::into),
            state: request.effective_state(now),
        }
    }
}

/// result of redeeming receipts
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub enum Redemption {
    /// NEAR was transferred to the redeemer immediately
    Paid { amount: YoctoNear },
    /// NEAR is being unbonded by the staking delegate and can be claimed once unlocked
    Deferred { request: WithdrawalRequest },
    /// the staking delegate rejected the withdrawal - the burned receipts were restored
    Cancelled {
        request_id: WithdrawalRequestId,
        reason: String,
    },
}
