use crate::interface::{
    BlockHeight, BlockTimestamp, DelegateLock, ExchangeRate, PrincipalPool, SlashingReport,
    WithdrawalRequestId, YoctoNear, YoctoReceipt,
};
use near_sdk::{
    json_types::U64,
    serde::{Deserialize, Serialize},
    AccountId,
};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(crate = "near_sdk::serde")]
pub struct ContractState {
    pub block_height: BlockHeight,
    pub block_timestamp: BlockTimestamp,
    pub settings_change_block_height: BlockHeight,

    pub delegate_id: AccountId,

    pub pool: PrincipalPool,
    pub receipt_supply: YoctoReceipt,
    pub exchange_rate: ExchangeRate,

    pub withdrawal_request_id_sequence: WithdrawalRequestId,
    /// withdrawal requests that have not yet been settled
    pub outstanding_withdrawal_requests: U64,

    pub delegate_lock: Option<DelegateLock>,
    /// while present, rewards settlement is halted
    pub slashing_report: Option<SlashingReport>,

    /// NEAR balance of the contract account
    pub account_balance: YoctoNear,
}
