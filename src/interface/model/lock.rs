use crate::{
    domain,
    interface::{WithdrawalRequestId, YoctoNear},
};
use near_sdk::serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub enum DelegateLock {
    /// principal is being deposited with the staking delegate
    Delegating { amount: YoctoNear },
    /// a withdrawal is being requested from the staking delegate for the withdrawal request
    RequestingWithdrawal { request_id: WithdrawalRequestId },
    /// unlocked funds are being claimed from the staking delegate for the withdrawal request
    ClaimingWithdrawal { request_id: WithdrawalRequestId },
    /// balances are being retrieved from the staking delegate
    SettlingRewards,
}

impl From<domain::DelegateLock> for DelegateLock {
    fn from(lock: domain::DelegateLock) -> Self {
        match lock {
            domain::DelegateLock::Delegating { amount } => DelegateLock::Delegating {
                amount: amount.into(),
            },
            domain::DelegateLock::RequestingWithdrawal { request_id, .. } => {
                DelegateLock::RequestingWithdrawal {
                    request_id: request_id.into(),
                }
            }
            domain::DelegateLock::ClaimingWithdrawal { request_id } => {
                DelegateLock::ClaimingWithdrawal {
                    request_id: request_id.into(),
                }
            }
            domain::DelegateLock::SettlingRewards => DelegateLock::SettlingRewards,
        }
    }
}
