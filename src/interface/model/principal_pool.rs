use crate::domain;
use crate::interface::YoctoNear;
use near_sdk::serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct PrincipalPool {
    pub total_principal: YoctoNear,
    pub undelegated_principal: YoctoNear,
    pub delegated_principal: YoctoNear,
    pub accrued_rewards: YoctoNear,
    /// NEAR set aside for withdrawal requests - not part of the managed assets
    pub reserved_liquidity: YoctoNear,
    /// cumulative NEAR value of the fee receipts minted to the treasury
    pub total_fees: YoctoNear,
    /// undelegated + delegated principal + accrued rewards
    pub total_managed_assets: YoctoNear,
}

impl From<domain::PrincipalPool> for PrincipalPool {
    fn from(pool: domain::PrincipalPool) -> Self {
        Self {
            total_principal: pool.total_principal().into(),
            undelegated_principal: pool.undelegated_principal().into(),
            delegated_principal: pool.delegated_principal().into(),
            accrued_rewards: pool.accrued_rewards().into(),
            reserved_liquidity: pool.reserved_liquidity().into(),
            total_fees: pool.total_fees().into(),
            total_managed_assets: pool.total_managed_assets().into(),
        }
    }
}
