use crate::domain::{BlockTimestamp, YoctoNear};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

/// Recorded when the staking delegate reports a balance drop beyond the slashing tolerance.
/// Rewards settlement is halted until the operator acknowledges it.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq)]
pub struct SlashingReport {
    pub last_known: YoctoNear,
    pub reported: YoctoNear,
    pub loss: YoctoNear,
    pub timestamp: BlockTimestamp,
}

impl SlashingReport {
    pub fn new(last_known: YoctoNear, reported: YoctoNear) -> Self {
        Self {
            last_known,
            reported,
            loss: last_known.saturating_sub(reported),
            timestamp: BlockTimestamp::from_env(),
        }
    }
}
