//! Staking delegate used to exercise the liquid staking contract workflows.
//!
//! Implements the delegate interface consumed by the liquid staking contract:
//! - `deposit` - delegates the attached deposit
//! - `request_withdrawal` - unbonds delegated funds, which can be claimed once the unbonding period
//!   has elapsed
//! - `claim_withdrawal` - transfers unbonded funds back to the delegator
//! - `report_balances` - reports the delegator's delegated balance and accrued rewards
//!
//! The remaining functions are test hooks used to simulate validator rewards, slashing, and an
//! unavailable delegate.

use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::collections::LookupMap;
use near_sdk::json_types::{U128, U64};
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::{env, near_bindgen, setup_alloc, AccountId, PanicOnDefault, Promise};

setup_alloc!();

const ACCOUNTS_KEY_PREFIX: [u8; 1] = [100];
const WITHDRAWALS_KEY_PREFIX: [u8; 1] = [101];

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct StakingDelegate {
    accounts: LookupMap<AccountId, DelegatorAccount>,
    withdrawals: LookupMap<u64, PendingWithdrawal>,
    withdrawal_id_sequence: u64,
    /// how long, in nanoseconds, unbonded funds are locked before they can be claimed
    unbonding_period: u64,
    online: bool,
}

#[near_bindgen]
impl StakingDelegate {
    #[init]
    pub fn new(unbonding_period: U64) -> Self {
        assert!(!env::state_exists(), "contract is already initialized");
        Self {
            accounts: LookupMap::new(ACCOUNTS_KEY_PREFIX.to_vec()),
            withdrawals: LookupMap::new(WITHDRAWALS_KEY_PREFIX.to_vec()),
            withdrawal_id_sequence: 0,
            unbonding_period: unbonding_period.0,
            online: true,
        }
    }

    #[payable]
    pub fn deposit(&mut self) {
        self.assert_online();
        let amount = env::attached_deposit();
        assert!(amount > 0, "deposit is required");

        let account_id = env::predecessor_account_id();
        let mut account = self.account(&account_id);
        account.delegated += amount;
        self.accounts.insert(&account_id, &account);
    }

    pub fn request_withdrawal(&mut self, amount: U128) -> DelegateWithdrawal {
        self.assert_online();
        let amount = amount.0;
        assert!(amount > 0, "withdrawal amount must not be zero");

        let account_id = env::predecessor_account_id();
        let mut account = self.account(&account_id);
        assert!(
            account.delegated + account.accrued_rewards >= amount,
            "insufficient delegated balance"
        );
        if account.delegated >= amount {
            account.delegated -= amount;
        } else {
            account.accrued_rewards -= amount - account.delegated;
            account.delegated = 0;
        }
        account.unbonding += amount;
        self.accounts.insert(&account_id, &account);

        self.withdrawal_id_sequence += 1;
        let withdrawal = PendingWithdrawal {
            account_id,
            amount,
            unlock_timestamp: env::block_timestamp() + self.unbonding_period,
        };
        self.withdrawals
            .insert(&self.withdrawal_id_sequence, &withdrawal);

        DelegateWithdrawal {
            handle: self.withdrawal_id_sequence.into(),
            unlock_timestamp: withdrawal.unlock_timestamp.into(),
        }
    }

    pub fn claim_withdrawal(&mut self, handle: U64) -> U128 {
        self.assert_online();
        let withdrawal = self
            .withdrawals
            .get(&handle.0)
            .expect("withdrawal does not exist");
        assert_eq!(
            withdrawal.account_id,
            env::predecessor_account_id(),
            "withdrawal is owned by another account"
        );
        assert!(
            env::block_timestamp() >= withdrawal.unlock_timestamp,
            "withdrawal is not yet unlocked"
        );
        self.withdrawals.remove(&handle.0);

        let mut account = self.account(&withdrawal.account_id);
        account.unbonding -= withdrawal.amount;
        self.accounts.insert(&withdrawal.account_id, &account);

        Promise::new(withdrawal.account_id).transfer(withdrawal.amount);
        withdrawal.amount.into()
    }

    pub fn report_balances(&self, account_id: AccountId) -> DelegateBalances {
        self.assert_online();
        let account = self.account(&account_id);
        DelegateBalances {
            delegated: account.delegated.into(),
            accrued_rewards: account.accrued_rewards.into(),
        }
    }

    pub fn unbonding_period(&self) -> U64 {
        self.unbonding_period.into()
    }

    pub fn unbonding_balance(&self, account_id: AccountId) -> U128 {
        self.account(&account_id).unbonding.into()
    }

    // test hooks

    /// rewards that are compounded into the delegated balance
    pub fn distribute_rewards(&mut self, account_id: AccountId, amount: U128) {
        let mut account = self.account(&account_id);
        account.delegated += amount.0;
        self.accounts.insert(&account_id, &account);
    }

    /// rewards that are reported separately from the delegated balance
    pub fn accrue_rewards(&mut self, account_id: AccountId, amount: U128) {
        let mut account = self.account(&account_id);
        account.accrued_rewards += amount.0;
        self.accounts.insert(&account_id, &account);
    }

    pub fn slash(&mut self, account_id: AccountId, amount: U128) {
        let mut account = self.account(&account_id);
        account.delegated = account.delegated.saturating_sub(amount.0);
        self.accounts.insert(&account_id, &account);
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }
}

impl StakingDelegate {
    fn account(&self, account_id: &AccountId) -> DelegatorAccount {
        self.accounts.get(account_id).unwrap_or_default()
    }

    fn assert_online(&self) {
        assert!(self.online, "staking delegate is unavailable");
    }
}

#[derive(BorshDeserialize, BorshSerialize, Debug, Clone, Copy, Default)]
pub struct DelegatorAccount {
    pub delegated: u128,
    pub accrued_rewards: u128,
    pub unbonding: u128,
}

#[derive(BorshDeserialize, BorshSerialize, Debug, Clone)]
pub struct PendingWithdrawal {
    pub account_id: AccountId,
    pub amount: u128,
    pub unlock_timestamp: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct DelegateBalances {
    pub delegated: U128,
    pub accrued_rewards: U128,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct DelegateWithdrawal {
    pub handle: U64,
    pub unlock_timestamp: U64,
}
