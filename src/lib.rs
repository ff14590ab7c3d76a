pub mod config;
pub mod contract;
pub mod core;
pub mod domain;
pub mod errors;
pub mod interface;
pub mod near;

#[cfg(test)]
pub mod test_utils;

use crate::domain::{
    BlockHeight, DelegateLock, PrincipalPool, ReceiptTokenLedger, Settings, SlashingReport,
    WithdrawalRequest, WithdrawalRequestId,
};
use crate::errors::settings::OPERATOR_ID_MUST_NOT_BE_CONTRACT_ID;
use crate::near::storage_keys::WITHDRAWAL_REQUESTS_KEY_PREFIX;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    collections::LookupMap,
    env, near_bindgen, setup_alloc, AccountId, PanicOnDefault,
};

setup_alloc!();

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct LiquidStakingContract {
    /// Operator is allowed to perform operator actions on the contract
    operator_id: AccountId,

    settings: Settings,
    /// when the settings were last changed
    /// the block info can be looked up via its block index: https://docs.near.org/docs/api/rpc#block
    settings_change_block_height: BlockHeight,

    pool: PrincipalPool,
    receipt_token: ReceiptTokenLedger,

    withdrawal_requests: LookupMap<WithdrawalRequestId, WithdrawalRequest>,
    withdrawal_request_id_sequence: WithdrawalRequestId,
    /// requests that are neither settled nor cancelled
    outstanding_withdrawal_requests: u64,

    /// at most 1 staking delegate call can be in flight
    delegate_lock: Option<DelegateLock>,
    /// while present, rewards settlement is halted
    slashing_report: Option<SlashingReport>,
}

#[near_bindgen]
impl LiquidStakingContract {
    /// ## Panics
    /// - if the contract is already initialized
    /// - `INVALID_CONFIG` if the settings are invalid, or the operator is the contract itself
    #[init]
    pub fn new(settings: interface::ContractSettings) -> Self {
        assert!(!env::state_exists(), "contract is already initialized");

        let operator_id: AccountId = settings.operator_id.clone().into();
        OPERATOR_ID_MUST_NOT_BE_CONTRACT_ID.assert(|| operator_id != env::current_account_id());

        let mut contract_settings = Settings::new(
            settings.delegate_id.clone().into(),
            settings.treasury_id.clone().into(),
        );
        contract_settings
            .apply_update(&settings.settings_update(), false, false)
            .unwrap_or_else(|err| err.panic());

        Self {
            operator_id,
            settings: contract_settings,
            settings_change_block_height: BlockHeight::from_env(),
            pool: PrincipalPool::default(),
            receipt_token: ReceiptTokenLedger::default(),
            withdrawal_requests: LookupMap::new(WITHDRAWAL_REQUESTS_KEY_PREFIX.to_vec()),
            withdrawal_request_id_sequence: WithdrawalRequestId::default(),
            outstanding_withdrawal_requests: 0,
            delegate_lock: None,
            slashing_report: None,
        }
    }
}
