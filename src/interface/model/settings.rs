use crate::config::GasConfig;
use crate::domain::{self, BasisPoints, ExchangeRateMode};
use crate::interface::YoctoNear;
use near_sdk::{
    json_types::ValidAccountId,
    serde::{Deserialize, Serialize},
    AccountId,
};

/// Settings snapshot
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct Settings {
    pub receipt_token_id: AccountId,
    pub delegate_id: AccountId,
    pub fee_rate: BasisPoints,
    pub minimum_stake: YoctoNear,
    pub treasury_id: AccountId,
    pub exchange_rate_mode: ExchangeRateMode,
    pub slashing_tolerance: BasisPoints,
    pub liquidity_buffer: Option<YoctoNear>,
    pub gas_config: GasConfig,
}

impl From<&domain::Settings> for Settings {
    fn from(settings: &domain::Settings) -> Self {
        Self {
            receipt_token_id: settings.receipt_token_id().clone(),
            delegate_id: settings.delegate_id().clone(),
            fee_rate: settings.fee_rate(),
            minimum_stake: settings.minimum_stake().into(),
            treasury_id: settings.treasury_id().clone(),
            exchange_rate_mode: settings.exchange_rate_mode(),
            slashing_tolerance: settings.slashing_tolerance(),
            liquidity_buffer: settings.liquidity_buffer().map(Into::into),
            gas_config: *settings.gas_config(),
        }
    }
}

/// Only the settings that are specified are changed.
///
/// A zero `liquidity_buffer` disables auto-delegation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(crate = "near_sdk::serde")]
pub struct SettingsUpdate {
    pub receipt_token_id: Option<ValidAccountId>,
    pub delegate_id: Option<ValidAccountId>,
    pub treasury_id: Option<ValidAccountId>,
    pub fee_rate: Option<BasisPoints>,
    pub minimum_stake: Option<YoctoNear>,
    pub slashing_tolerance: Option<BasisPoints>,
    pub exchange_rate_mode: Option<ExchangeRateMode>,
    pub liquidity_buffer: Option<YoctoNear>,
}

/// Used to initialize the contract. Unspecified settings fall back to the defaults.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(crate = "near_sdk::serde")]
pub struct ContractSettings {
    pub operator_id: ValidAccountId,
    pub delegate_id: ValidAccountId,
    pub treasury_id: ValidAccountId,
    pub fee_rate: Option<BasisPoints>,
    pub minimum_stake: Option<YoctoNear>,
    pub slashing_tolerance: Option<BasisPoints>,
    pub liquidity_buffer: Option<YoctoNear>,
    pub exchange_rate_mode: Option<ExchangeRateMode>,
}

impl ContractSettings {
    pub fn new(
        operator_id: ValidAccountId,
        delegate_id: ValidAccountId,
        treasury_id: ValidAccountId,
    ) -> Self {
        Self {
            operator_id,
            delegate_id,
            treasury_id,
            fee_rate: None,
            minimum_stake: None,
            slashing_tolerance: None,
            liquidity_buffer: None,
            exchange_rate_mode: None,
        }
    }

    /// expressed as an update, which is validated and applied on top of the defaults
    pub fn settings_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            delegate_id: Some(self.delegate_id.clone()),
            fee_rate: self.fee_rate,
            minimum_stake: self.minimum_stake.clone(),
            slashing_tolerance: self.slashing_tolerance,
            exchange_rate_mode: self.exchange_rate_mode,
            liquidity_buffer: self.liquidity_buffer.clone(),
            ..Default::default()
        }
    }
}
