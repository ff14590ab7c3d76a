use crate::core::U256;
use crate::domain::{ExchangeRateMode, YoctoNear, YoctoReceipt};
use crate::errors::exchange_rate::{CONVERSION_OVERFLOW, RECEIPTS_HAVE_NO_BACKING};
use crate::errors::ErrorConst;
use crate::near::YOCTO;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use std::cmp::Ordering;

/// Receipt token exchange rate snapshot.
///
/// exchange rate = [total_managed_assets] / [receipt_supply]
///
/// While the receipt supply is zero, i.e., at genesis, the exchange rate is 1:1. In
/// [ExchangeRateMode::Fixed] mode, conversions are always 1:1.
///
/// All conversions are rounded down, i.e., rounding always favors the pool, which keeps the
/// exchange rate from decreasing.
#[derive(BorshSerialize, BorshDeserialize, Debug, Copy, Clone, Default, PartialEq)]
pub struct ExchangeRate {
    total_managed_assets: YoctoNear,
    receipt_supply: YoctoReceipt,
    mode: ExchangeRateMode,
}

impl ExchangeRate {
    pub fn new(
        total_managed_assets: YoctoNear,
        receipt_supply: YoctoReceipt,
        mode: ExchangeRateMode,
    ) -> Self {
        Self {
            total_managed_assets,
            receipt_supply,
            mode,
        }
    }

    pub fn total_managed_assets(&self) -> YoctoNear {
        self.total_managed_assets
    }

    pub fn receipt_supply(&self) -> YoctoReceipt {
        self.receipt_supply
    }

    pub fn mode(&self) -> ExchangeRateMode {
        self.mode
    }

    fn is_one_to_one(&self) -> bool {
        self.mode == ExchangeRateMode::Fixed || self.receipt_supply.value() == 0
    }

    /// Converts NEAR to receipts rounded down.
    ///
    /// ## Errors
    /// - [RECEIPTS_HAVE_NO_BACKING] if receipts are outstanding but all managed assets were lost
    /// - [CONVERSION_OVERFLOW] if the receipts would not fit into a u128
    pub fn near_to_receipts(&self, near: YoctoNear) -> Result<YoctoReceipt, ErrorConst> {
        if self.is_one_to_one() {
            return Ok(near.value().into());
        }
        if self.total_managed_assets.value() == 0 {
            return Err(RECEIPTS_HAVE_NO_BACKING);
        }
        mul_div(*near, *self.receipt_supply, *self.total_managed_assets).map(YoctoReceipt)
    }

    /// Converts receipts to NEAR rounded down. Receipts are worthless once all managed assets
    /// are lost.
    ///
    /// ## Errors
    /// [CONVERSION_OVERFLOW] if the NEAR value would not fit into a u128
    pub fn receipts_to_near(&self, receipts: YoctoReceipt) -> Result<YoctoNear, ErrorConst> {
        if self.is_one_to_one() {
            return Ok(receipts.value().into());
        }
        mul_div(*receipts, *self.total_managed_assets, *self.receipt_supply).map(YoctoNear)
    }

    /// Computes how many receipts to mint for a fee that was skimmed from rewards, such that the
    /// minted receipts are worth the fee once minted.
    ///
    /// The snapshot must already include the rewards the fee was skimmed from:
    ///
    /// fee_receipts = fee * receipt_supply / (total_managed_assets - fee)
    pub fn fee_receipts(&self, fee: YoctoNear) -> Result<YoctoReceipt, ErrorConst> {
        if fee.value() == 0 || self.receipt_supply.value() == 0 {
            return Ok(YoctoReceipt::ZERO);
        }
        if self.mode == ExchangeRateMode::Fixed {
            return Ok(fee.value().into());
        }
        let net_assets = self.total_managed_assets.saturating_sub(fee);
        if net_assets.value() == 0 {
            return Ok(YoctoReceipt::ZERO);
        }
        mul_div(*fee, *self.receipt_supply, *net_assets).map(YoctoReceipt)
    }

    /// returns the NEAR value of 1 receipt token, saturating at u128::MAX
    pub fn value(&self) -> YoctoNear {
        self.receipts_to_near(YOCTO.into())
            .unwrap_or(YoctoNear(u128::MAX))
    }

    /// Compares the exact rational rates without rounding.
    pub fn compare(&self, other: &ExchangeRate) -> Ordering {
        let (lhs_assets, lhs_supply) = self.rational();
        let (rhs_assets, rhs_supply) = other.rational();
        (U256::from(lhs_assets) * U256::from(rhs_supply))
            .cmp(&(U256::from(rhs_assets) * U256::from(lhs_supply)))
    }

    fn rational(&self) -> (u128, u128) {
        if self.is_one_to_one() {
            (1, 1)
        } else {
            (*self.total_managed_assets, *self.receipt_supply)
        }
    }
}

/// a * b / c rounded down, where c > 0
fn mul_div(a: u128, b: u128, c: u128) -> Result<u128, ErrorConst> {
    let value = U256::from(a) * U256::from(b) / U256::from(c);
    if value > U256::from(u128::MAX) {
        return Err(CONVERSION_OVERFLOW);
    }
    Ok(value.as_u128())
}
