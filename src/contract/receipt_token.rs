//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::interface::ReceiptToken;
use near_sdk::{
    json_types::{ValidAccountId, U128},
    near_bindgen,
};

#[near_bindgen]
impl ReceiptToken for LiquidStakingContract {
    fn ft_total_supply(&self) -> U128 {
        self.receipt_token.total_supply().value().into()
    }

    fn ft_balance_of(&self, account_id: ValidAccountId) -> U128 {
        self.receipt_token.balance_of(account_id.as_ref()).value().into()
    }
}
