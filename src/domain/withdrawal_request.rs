use crate::domain::{BlockTimestamp, YoctoNear, YoctoReceipt};
use crate::errors::withdrawal_requests::{
    FUNDS_NOT_YET_UNLOCKED, REQUEST_ALREADY_SETTLED, REQUEST_CANCELLED,
};
use crate::errors::ErrorConst;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    AccountId,
};
use std::ops::Deref;

#[derive(
    BorshSerialize,
    BorshDeserialize,
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Default,
    Hash,
)]
pub struct WithdrawalRequestId(pub u64);

impl WithdrawalRequestId {
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for WithdrawalRequestId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Deref for WithdrawalRequestId {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(
    BorshSerialize, BorshDeserialize, Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq,
)]
#[serde(crate = "near_sdk::serde")]
pub enum WithdrawalState {
    /// waiting on the staking delegate to unbond the funds
    Pending,
    /// funds are unlocked at the staking delegate and can be claimed
    Claimable,
    /// funds have been paid out to the requester
    Settled,
    /// the staking delegate rejected the withdrawal and the burned receipts were restored
    Cancelled,
}

/// Redemption that could not be paid out of the undelegated principal.
///
/// The NEAR owed to the requester is fixed when the request is created:
/// `amount = local_reserved + delegate_amount`
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct WithdrawalRequest {
    id: WithdrawalRequestId,
    requester: AccountId,
    receipts_burned: YoctoReceipt,
    amount: YoctoNear,
    local_reserved: YoctoNear,
    delegate_amount: YoctoNear,
    delegate_handle: Option<u64>,
    request_timestamp: BlockTimestamp,
    unlock_timestamp: Option<BlockTimestamp>,
    state: WithdrawalState,
}

impl WithdrawalRequest {
    pub fn new(
        id: WithdrawalRequestId,
        requester: AccountId,
        receipts_burned: YoctoReceipt,
        local_reserved: YoctoNear,
        delegate_amount: YoctoNear,
    ) -> Self {
        Self {
            id,
            requester,
            receipts_burned,
            amount: local_reserved + delegate_amount,
            local_reserved,
            delegate_amount,
            delegate_handle: None,
            request_timestamp: BlockTimestamp::from_env(),
            unlock_timestamp: None,
            state: WithdrawalState::Pending,
        }
    }

    pub fn id(&self) -> WithdrawalRequestId {
        self.id
    }

    pub fn requester(&self) -> &AccountId {
        &self.requester
    }

    pub fn receipts_burned(&self) -> YoctoReceipt {
        self.receipts_burned
    }

    pub fn amount(&self) -> YoctoNear {
        self.amount
    }

    pub fn local_reserved(&self) -> YoctoNear {
        self.local_reserved
    }

    pub fn delegate_amount(&self) -> YoctoNear {
        self.delegate_amount
    }

    pub fn delegate_handle(&self) -> Option<u64> {
        self.delegate_handle
    }

    pub fn request_timestamp(&self) -> BlockTimestamp {
        self.request_timestamp
    }

    pub fn unlock_timestamp(&self) -> Option<BlockTimestamp> {
        self.unlock_timestamp
    }

    pub fn state(&self) -> WithdrawalState {
        self.state
    }

    /// a pending request whose funds have unlocked is reported as claimable
    pub fn effective_state(&self, now: BlockTimestamp) -> WithdrawalState {
        match (self.state, self.unlock_timestamp) {
            (WithdrawalState::Pending, Some(unlock_timestamp)) if now >= unlock_timestamp => {
                WithdrawalState::Claimable
            }
            (state, _) => state,
        }
    }

    /// records the staking delegate's withdrawal handle
    pub fn acknowledge(&mut self, delegate_handle: u64, unlock_timestamp: BlockTimestamp) {
        self.delegate_handle = Some(delegate_handle);
        self.unlock_timestamp = Some(unlock_timestamp);
    }

    /// Transitions the request to [WithdrawalState::Claimable] and returns the delegate handle to
    /// claim the funds with.
    ///
    /// A claimable request can be claimed again, i.e., when a prior claim attempt failed.
    pub fn mark_claimable(&mut self, now: BlockTimestamp) -> Result<u64, ErrorConst> {
        match self.state {
            WithdrawalState::Settled => return Err(REQUEST_ALREADY_SETTLED),
            WithdrawalState::Cancelled => return Err(REQUEST_CANCELLED),
            WithdrawalState::Pending | WithdrawalState::Claimable => {}
        }
        match (self.delegate_handle, self.unlock_timestamp) {
            (Some(handle), Some(unlock_timestamp)) if now >= unlock_timestamp => {
                self.state = WithdrawalState::Claimable;
                Ok(handle)
            }
            _ => Err(FUNDS_NOT_YET_UNLOCKED),
        }
    }

    pub fn settle(&mut self) {
        self.state = WithdrawalState::Settled;
    }

    pub fn cancel(&mut self) {
        self.state = WithdrawalState::Cancelled;
    }

    /// NEAR paid out to the requester, given what the staking delegate returned
    ///
    /// NEAR returned beyond the delegate amount is not owed to the requester.
    pub fn payout(&self, claimed: YoctoNear) -> YoctoNear {
        self.local_reserved + claimed.min(self.delegate_amount)
    }
}
