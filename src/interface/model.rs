pub mod contract_state;
mod exchange_rate;
mod lock;
mod principal_pool;
mod settings;
mod settlement;
mod withdrawal_request;

pub use contract_state::ContractState;
pub use exchange_rate::ExchangeRate;
pub use lock::DelegateLock;
pub use principal_pool::PrincipalPool;
pub use settings::{ContractSettings, Settings, SettingsUpdate};
pub use settlement::{RewardsSettlement, SlashingReport};
pub use withdrawal_request::{Redemption, WithdrawalRequest};

use crate::domain;
use near_sdk::{
    json_types::{U128, U64},
    serde::{Deserialize, Serialize},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct YoctoNear(pub U128);

impl From<domain::YoctoNear> for YoctoNear {
    fn from(value: domain::YoctoNear) -> Self {
        Self(value.0.into())
    }
}

impl From<u128> for YoctoNear {
    fn from(value: u128) -> Self {
        Self(value.into())
    }
}

impl From<YoctoNear> for domain::YoctoNear {
    fn from(value: YoctoNear) -> Self {
        Self(value.value())
    }
}

impl YoctoNear {
    pub fn value(&self) -> u128 {
        self.0 .0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct YoctoReceipt(pub U128);

impl From<domain::YoctoReceipt> for YoctoReceipt {
    fn from(value: domain::YoctoReceipt) -> Self {
        Self(value.0.into())
    }
}

impl From<u128> for YoctoReceipt {
    fn from(value: u128) -> Self {
        Self(value.into())
    }
}

impl From<YoctoReceipt> for domain::YoctoReceipt {
    fn from(value: YoctoReceipt) -> Self {
        Self(value.value())
    }
}

impl YoctoReceipt {
    pub fn value(&self) -> u128 {
        self.0 .0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct BlockHeight(pub U64);

impl From<domain::BlockHeight> for BlockHeight {
    fn from(value: domain::BlockHeight) -> Self {
        Self(value.0.into())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct BlockTimestamp(pub U64);

impl From<domain::BlockTimestamp> for BlockTimestamp {
    fn from(value: domain::BlockTimestamp) -> Self {
        Self(value.0.into())
    }
}

impl BlockTimestamp {
    pub fn value(&self) -> u64 {
        self.0 .0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct WithdrawalRequestId(pub U64);

impl From<domain::WithdrawalRequestId> for WithdrawalRequestId {
    fn from(value: domain::WithdrawalRequestId) -> Self {
        Self(value.0.into())
    }
}

impl From<u64> for WithdrawalRequestId {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<WithdrawalRequestId> for domain::WithdrawalRequestId {
    fn from(value: WithdrawalRequestId) -> Self {
        Self(value.value())
    }
}

impl WithdrawalRequestId {
    pub fn value(&self) -> u64 {
        self.0 .0
    }
}
