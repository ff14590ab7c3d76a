use near_sdk::json_types::{ValidAccountId, U128};

/// Read-only view of the receipt token ledger, using the NEP-141 method names.
///
/// Receipts are minted and burned only by the staking workflows.
pub trait ReceiptToken {
    fn ft_total_supply(&self) -> U128;

    fn ft_balance_of(&self, account_id: ValidAccountId) -> U128;
}
