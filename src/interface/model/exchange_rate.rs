use crate::domain::{self, ExchangeRateMode};
use crate::interface::{YoctoNear, YoctoReceipt};
use near_sdk::serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct ExchangeRate {
    pub total_managed_assets: YoctoNear,
    pub receipt_supply: YoctoReceipt,
    pub mode: ExchangeRateMode,
    /// value of 1 receipt token
    pub value: YoctoNear,
}

impl From<domain::ExchangeRate> for ExchangeRate {
    fn from(rate: domain::ExchangeRate) -> Self {
        Self {
            total_managed_assets: rate.total_managed_assets().into(),
            receipt_supply: rate.receipt_supply().into(),
            mode: rate.mode(),
            value: rate.value().into(),
        }
    }
}
