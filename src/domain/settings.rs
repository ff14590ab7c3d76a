use crate::config::GasConfig;
use crate::domain::{BasisPoints, YoctoNear};
use crate::errors::settings::{
    DELEGATE_IN_USE, EXCHANGE_RATE_MODE_LOCKED, FEE_RATE_OUT_OF_RANGE, INVALID_ACCOUNT_ID,
    SLASHING_TOLERANCE_OUT_OF_RANGE,
};
use crate::errors::ErrorConst;
use crate::interface::SettingsUpdate;
use crate::near::YOCTO;
use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    env,
    serde::{Deserialize, Serialize},
    AccountId,
};

/// 10%
pub const DEFAULT_FEE_RATE: BasisPoints = BasisPoints(1000);
/// 0.001 NEAR
pub const DEFAULT_MINIMUM_STAKE: YoctoNear = YoctoNear(YOCTO / 1000);
/// 1%
pub const DEFAULT_SLASHING_TOLERANCE: BasisPoints = BasisPoints(100);

/// How receipts are priced against the pool's managed assets.
#[derive(
    BorshSerialize, BorshDeserialize, Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq,
)]
#[serde(crate = "near_sdk::serde")]
pub enum ExchangeRateMode {
    /// exchange rate = total managed assets / receipt supply
    Dynamic,
    /// receipts are always minted and redeemed 1:1 with NEAR
    Fixed,
}

impl Default for ExchangeRateMode {
    fn default() -> Self {
        ExchangeRateMode::Dynamic
    }
}

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    receipt_token_id: AccountId,
    delegate_id: AccountId,
    fee_rate: BasisPoints,
    minimum_stake: YoctoNear,
    treasury_id: AccountId,
    exchange_rate_mode: ExchangeRateMode,
    slashing_tolerance: BasisPoints,
    liquidity_buffer: Option<YoctoNear>,
    gas_config: GasConfig,
}

impl Settings {
    /// the receipt token is hosted by the contract itself
    pub fn new(delegate_id: AccountId, treasury_id: AccountId) -> Self {
        Self {
            receipt_token_id: env::current_account_id(),
            delegate_id,
            fee_rate: DEFAULT_FEE_RATE,
            minimum_stake: DEFAULT_MINIMUM_STAKE,
            treasury_id,
            exchange_rate_mode: ExchangeRateMode::default(),
            slashing_tolerance: DEFAULT_SLASHING_TOLERANCE,
            liquidity_buffer: None,
            gas_config: GasConfig::default(),
        }
    }

    pub fn receipt_token_id(&self) -> &AccountId {
        &self.receipt_token_id
    }

    pub fn delegate_id(&self) -> &AccountId {
        &self.delegate_id
    }

    pub fn fee_rate(&self) -> BasisPoints {
        self.fee_rate
    }

    pub fn minimum_stake(&self) -> YoctoNear {
        self.minimum_stake
    }

    pub fn treasury_id(&self) -> &AccountId {
        &self.treasury_id
    }

    pub fn exchange_rate_mode(&self) -> ExchangeRateMode {
        self.exchange_rate_mode
    }

    pub fn slashing_tolerance(&self) -> BasisPoints {
        self.slashing_tolerance
    }

    pub fn liquidity_buffer(&self) -> Option<YoctoNear> {
        self.liquidity_buffer
    }

    pub fn gas_config(&self) -> &GasConfig {
        &self.gas_config
    }

    pub fn gas_config_mut(&mut self) -> &mut GasConfig {
        &mut self.gas_config
    }

    /// Validates the whole update before applying any of it.
    ///
    /// - `delegate_in_use` - funds are delegated or withdrawal requests are outstanding, which pins
    ///   the staking delegate
    /// - `receipts_outstanding` - receipts have been minted, which pins the exchange rate mode
    ///
    /// A zero liquidity buffer disables auto-delegation.
    pub fn apply_update(
        &mut self,
        update: &SettingsUpdate,
        delegate_in_use: bool,
        receipts_outstanding: bool,
    ) -> Result<(), ErrorConst> {
        if let Some(fee_rate) = update.fee_rate {
            if !fee_rate.is_valid() {
                return Err(FEE_RATE_OUT_OF_RANGE);
            }
        }
        if let Some(slashing_tolerance) = update.slashing_tolerance {
            if !slashing_tolerance.is_valid() {
                return Err(SLASHING_TOLERANCE_OUT_OF_RANGE);
            }
        }
        if let Some(delegate_id) = update.delegate_id.as_ref() {
            let delegate_id: &AccountId = delegate_id.as_ref();
            if *delegate_id == env::current_account_id() {
                return Err(INVALID_ACCOUNT_ID);
            }
            if delegate_in_use && *delegate_id != self.delegate_id {
                return Err(DELEGATE_IN_USE);
            }
        }
        if let Some(mode) = update.exchange_rate_mode {
            if receipts_outstanding && mode != self.exchange_rate_mode {
                return Err(EXCHANGE_RATE_MODE_LOCKED);
            }
        }

        if let Some(receipt_token_id) = update.receipt_token_id.as_ref() {
            self.receipt_token_id = receipt_token_id.clone().into();
        }
        if let Some(delegate_id) = update.delegate_id.as_ref() {
            self.delegate_id = delegate_id.clone().into();
        }
        if let Some(treasury_id) = update.treasury_id.as_ref() {
            self.treasury_id = treasury_id.clone().into();
        }
        if let Some(fee_rate) = update.fee_rate {
            self.fee_rate = fee_rate;
        }
        if let Some(minimum_stake) = update.minimum_stake.as_ref() {
            self.minimum_stake = minimum_stake.value().into();
        }
        if let Some(slashing_tolerance) = update.slashing_tolerance {
            self.slashing_tolerance = slashing_tolerance;
        }
        if let Some(mode) = update.exchange_rate_mode {
            self.exchange_rate_mode = mode;
        }
        if let Some(liquidity_buffer) = update.liquidity_buffer.as_ref() {
            self.liquidity_buffer = match liquidity_buffer.value() {
                0 => None,
                amount => Some(amount.into()),
            };
        }
        Ok(())
    }
}
