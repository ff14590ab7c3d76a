use crate::domain;
use crate::interface::{BlockTimestamp, ExchangeRate, YoctoNear, YoctoReceipt};
use near_sdk::serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct RewardsSettlement {
    /// balance reported by the staking delegate
    pub observed: YoctoNear,
    pub rewards: YoctoNear,
    /// loss absorbed because it was within the slashing tolerance
    pub loss: YoctoNear,
    pub fee: YoctoNear,
    /// receipts minted to the treasury for the fee
    pub fee_receipts: YoctoReceipt,
    pub exchange_rate: ExchangeRate,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct SlashingReport {
    pub last_known: YoctoNear,
    pub reported: YoctoNear,
    pub loss: YoctoNear,
    pub timestamp: BlockTimestamp,
}

impl From<domain::SlashingReport> for SlashingReport {
    fn from(report: domain::SlashingReport) -> Self {
        Self {
            last_known: report.last_known.into(),
            reported: report.reported.into(),
            loss: report.loss.into(),
            timestamp: report.timestamp.into(),
        }
    }
}
