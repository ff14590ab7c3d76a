use crate::domain::YoctoReceipt;
use crate::errors::staking_service::INSUFFICIENT_RECEIPTS_FOR_REDEEM_REQUEST;
use crate::errors::ErrorConst;
use crate::near::storage_keys::RECEIPT_BALANCES_KEY_PREFIX;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    collections::LookupMap,
    AccountId,
};

/// Receipt token balances.
///
/// Supply is only minted and burned by the staking workflows. Zero balances are not stored.
#[derive(BorshSerialize, BorshDeserialize)]
pub struct ReceiptTokenLedger {
    balances: LookupMap<AccountId, YoctoReceipt>,
    total_supply: YoctoReceipt,
}

impl Default for ReceiptTokenLedger {
    fn default() -> Self {
        Self {
            balances: LookupMap::new(RECEIPT_BALANCES_KEY_PREFIX.to_vec()),
            total_supply: YoctoReceipt::ZERO,
        }
    }
}

impl ReceiptTokenLedger {
    pub fn balance_of(&self, account_id: &AccountId) -> YoctoReceipt {
        self.balances.get(account_id).unwrap_or_default()
    }

    pub fn total_supply(&self) -> YoctoReceipt {
        self.total_supply
    }

    pub(crate) fn mint(&mut self, account_id: &AccountId, amount: YoctoReceipt) {
        if amount.value() == 0 {
            return;
        }
        let balance = self.balance_of(account_id) + amount;
        self.balances.insert(account_id, &balance);
        self.total_supply += amount;
    }

    pub(crate) fn burn(
        &mut self,
        account_id: &AccountId,
        amount: YoctoReceipt,
    ) -> Result<(), ErrorConst> {
        let balance = self.balance_of(account_id);
        if balance < amount {
            return Err(INSUFFICIENT_RECEIPTS_FOR_REDEEM_REQUEST);
        }
        let balance = balance - amount;
        if balance.value() == 0 {
            self.balances.remove(account_id);
        } else {
            self.balances.insert(account_id, &balance);
        }
        self.total_supply -= amount;
        Ok(())
    }
}
