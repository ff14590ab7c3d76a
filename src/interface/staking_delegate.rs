use near_sdk::{
    ext_contract,
    json_types::{U128, U64},
    serde::{Deserialize, Serialize},
    AccountId,
};

/// Staking delegate interface that the contract delegates principal to.
///
/// All calls are cross-contract calls that are processed via callbacks.
#[ext_contract(ext_staking_delegate)]
pub trait StakingDelegate {
    /// delegates the attached deposit
    ///
    /// #[payable]
    fn deposit(&mut self);

    /// Starts unbonding the amount. The funds can be claimed via [StakingDelegate::claim_withdrawal]
    /// once unlocked.
    fn request_withdrawal(&mut self, amount: U128) -> DelegateWithdrawal;

    /// Transfers the unlocked funds to the predecessor and returns the amount transferred.
    ///
    /// ## Panics
    /// if the funds are not yet unlocked
    fn claim_withdrawal(&mut self, handle: U64) -> U128;

    fn report_balances(&self, account_id: AccountId) -> DelegateBalances;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct DelegateBalances {
    pub delegated: U128,
    pub accrued_rewards: U128,
}

impl DelegateBalances {
    pub fn total(&self) -> u128 {
        self.delegated.0 + self.accrued_rewards.0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct DelegateWithdrawal {
    pub handle: U64,
    pub unlock_timestamp: U64,
}
