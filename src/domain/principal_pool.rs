use crate::core::U256;
use crate::domain::{ExchangeRate, ExchangeRateMode, Settings, YoctoNear, YoctoReceipt};
use crate::errors::staking_service::{
    DELEGATION_EXCEEDS_UNDELEGATED_PRINCIPAL, INSUFFICIENT_POOL_ASSETS, ZERO_DELEGATION_AMOUNT,
};
use crate::errors::ErrorConst;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};

/// Tracks the NEAR backing the receipt token supply.
///
/// <pre>
/// total managed assets = undelegated principal + delegated principal + accrued rewards
/// </pre>
///
/// Liquidity reserved for pending withdrawal requests is owed to the requesters and is not part of
/// the managed assets.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct PrincipalPool {
    total_principal: YoctoNear,
    undelegated_principal: YoctoNear,
    delegated_principal: YoctoNear,
    accrued_rewards: YoctoNear,
    reserved_liquidity: YoctoNear,
    total_fees: YoctoNear,
}

/// where the NEAR for a redemption comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiquiditySource {
    /// paid out of the undelegated principal
    Local,
    /// all local liquidity is reserved for the request and the shortfall is withdrawn from the
    /// staking delegate
    Delegate {
        local_reserved: YoctoNear,
        shortfall: YoctoNear,
    },
}

/// outcome of reconciling the pool against the balances reported by the staking delegate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Settlement {
    Rewards {
        rewards: YoctoNear,
        fee: YoctoNear,
        fee_receipts: YoctoReceipt,
    },
    LossApplied {
        loss: YoctoNear,
    },
    /// the loss exceeds the slashing tolerance - the pool is left unchanged
    SlashingDetected {
        loss: YoctoNear,
    },
}

impl PrincipalPool {
    pub fn total_principal(&self) -> YoctoNear {
        self.total_principal
    }

    pub fn undelegated_principal(&self) -> YoctoNear {
        self.undelegated_principal
    }

    pub fn delegated_principal(&self) -> YoctoNear {
        self.delegated_principal
    }

    pub fn accrued_rewards(&self) -> YoctoNear {
        self.accrued_rewards
    }

    pub fn reserved_liquidity(&self) -> YoctoNear {
        self.reserved_liquidity
    }

    pub fn total_fees(&self) -> YoctoNear {
        self.total_fees
    }

    pub fn total_managed_assets(&self) -> YoctoNear {
        self.undelegated_principal + self.delegated_principal + self.accrued_rewards
    }

    /// last known balance held by the staking delegate on behalf of the pool
    pub fn delegate_balance(&self) -> YoctoNear {
        self.delegated_principal + self.accrued_rewards
    }

    pub fn exchange_rate(
        &self,
        receipt_supply: YoctoReceipt,
        mode: ExchangeRateMode,
    ) -> ExchangeRate {
        ExchangeRate::new(self.total_managed_assets(), receipt_supply, mode)
    }

    pub fn credit_stake(&mut self, amount: YoctoNear) {
        self.total_principal += amount;
        self.undelegated_principal += amount;
    }

    pub fn check_delegation(&self, amount: YoctoNear) -> Result<(), ErrorConst> {
        if amount.value() == 0 {
            return Err(ZERO_DELEGATION_AMOUNT);
        }
        if amount > self.undelegated_principal {
            return Err(DELEGATION_EXCEEDS_UNDELEGATED_PRINCIPAL);
        }
        Ok(())
    }

    /// moves principal from the local pool to the staking delegate
    pub fn apply_delegation(&mut self, amount: YoctoNear) -> Result<(), ErrorConst> {
        self.check_delegation(amount)?;
        self.undelegated_principal -= amount;
        self.delegated_principal += amount;
        Ok(())
    }

    /// Debits the pool for a redemption worth `amount` NEAR.
    ///
    /// If the undelegated principal does not cover the amount, then all of it is reserved for the
    /// redemption and the delegate side is debited by the shortfall, principal first, then rewards.
    pub fn redeem(&mut self, amount: YoctoNear) -> Result<LiquiditySource, ErrorConst> {
        if amount > self.total_managed_assets() {
            return Err(INSUFFICIENT_POOL_ASSETS);
        }
        if self.undelegated_principal >= amount {
            self.undelegated_principal -= amount;
            self.total_principal = self.total_principal.saturating_sub(amount);
            return Ok(LiquiditySource::Local);
        }

        let local_reserved = self.undelegated_principal;
        let shortfall = amount - local_reserved;
        self.undelegated_principal = YoctoNear::ZERO;
        self.reserved_liquidity += local_reserved;
        self.debit_delegate_side(shortfall);
        self.total_principal = self.total_principal.saturating_sub(amount);
        Ok(LiquiditySource::Delegate {
            local_reserved,
            shortfall,
        })
    }

    pub fn release_reserved(&mut self, amount: YoctoNear) {
        self.reserved_liquidity = self.reserved_liquidity.saturating_sub(amount);
    }

    /// credits NEAR returned by the delegate beyond what was withdrawn back into the local pool
    pub fn credit_liquidity(&mut self, amount: YoctoNear) {
        self.undelegated_principal += amount;
        self.total_principal += amount;
    }

    /// Reconciles the pool against the balance `observed` at the staking delegate.
    ///
    /// - growth is recognized as rewards, and the fee is skimmed off as receipts minted to the
    ///   treasury
    /// - a drop within the slashing tolerance is absorbed, rewards first, then principal
    /// - a drop beyond the slashing tolerance leaves the pool untouched
    ///
    /// The pool is left untouched if the fee receipts cannot be computed.
    pub fn settle(
        &mut self,
        observed: YoctoNear,
        receipt_supply: YoctoReceipt,
        settings: &Settings,
    ) -> Result<Settlement, ErrorConst> {
        let last_known = self.delegate_balance();
        if observed >= last_known {
            let rewards = observed - last_known;
            if receipt_supply.value() == 0 {
                self.accrued_rewards += rewards;
                return Ok(Settlement::Rewards {
                    rewards,
                    fee: YoctoNear::ZERO,
                    fee_receipts: YoctoReceipt::ZERO,
                });
            }
            let fee = settings.fee_rate() * rewards;
            let fee_receipts = ExchangeRate::new(
                self.total_managed_assets() + rewards,
                receipt_supply,
                settings.exchange_rate_mode(),
            )
            .fee_receipts(fee)?;
            self.accrued_rewards += rewards;
            self.total_fees += fee;
            return Ok(Settlement::Rewards {
                rewards,
                fee,
                fee_receipts,
            });
        }

        let loss = last_known - observed;
        let tolerance = U256::from(*self.total_managed_assets())
            * U256::from(*settings.slashing_tolerance());
        if U256::from(*loss) * U256::from(10000) > tolerance {
            return Ok(Settlement::SlashingDetected { loss });
        }
        self.apply_loss(loss);
        Ok(Settlement::LossApplied { loss })
    }

    /// writes off the loss against the delegate side, rewards first, then principal
    pub fn apply_loss(&mut self, loss: YoctoNear) {
        if self.accrued_rewards >= loss {
            self.accrued_rewards -= loss;
        } else {
            let remainder = loss - self.accrued_rewards;
            self.accrued_rewards = YoctoNear::ZERO;
            self.delegated_principal = self.delegated_principal.saturating_sub(remainder);
        }
    }

    fn debit_delegate_side(&mut self, amount: YoctoNear) {
        if self.delegated_principal >= amount {
            self.delegated_principal -= amount;
        } else {
            let remainder = amount - self.delegated_principal;
            self.delegated_principal = YoctoNear::ZERO;
            self.accrued_rewards = self.accrued_rewards.saturating_sub(remainder);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::BasisPoints;
    use crate::errors::exchange_rate::CONVERSION_OVERFLOW;
    use crate::interface::SettingsUpdate;
    use crate::near::YOCTO;
    use crate::test_utils::*;
    use near_sdk::{testing_env, MockedBlockchain};

    fn settings(fee_rate: u16, mode: ExchangeRateMode) -> Settings {
        let mut settings = Settings::new(DELEGATE.to_string(), TREASURY.to_string());
        settings
            .apply_update(
                &SettingsUpdate {
                    fee_rate: Some(BasisPoints(fee_rate)),
                    exchange_rate_mode: Some(mode),
                    ..Default::default()
                },
                false,
                false,
            )
            .unwrap();
        settings
    }

    fn staked_and_delegated(staked: u128, delegated: u128) -> PrincipalPool {
        let mut pool = PrincipalPool::default();
        pool.credit_stake(staked.into());
        pool.apply_delegation(delegated.into()).unwrap();
        pool
    }

    #[test]
    fn stake_then_delegate() {
        let pool = staked_and_delegated(100, 60);
        assert_eq!(pool.total_principal(), YoctoNear(100));
        assert_eq!(pool.undelegated_principal(), YoctoNear(40));
        assert_eq!(pool.delegated_principal(), YoctoNear(60));
        assert_eq!(pool.total_managed_assets(), YoctoNear(100));
        assert_eq!(pool.delegate_balance(), YoctoNear(60));
    }

    #[test]
    fn delegation_bounds() {
        let mut pool = staked_and_delegated(100, 0);
        assert_eq!(
            pool.apply_delegation(YoctoNear::ZERO),
            Err(ZERO_DELEGATION_AMOUNT)
        );
        assert_eq!(
            pool.apply_delegation(101.into()),
            Err(DELEGATION_EXCEEDS_UNDELEGATED_PRINCIPAL)
        );
        assert_eq!(pool, staked_and_delegated(100, 0));
    }

    #[test]
    fn redeem_from_local_liquidity() {
        let mut pool = staked_and_delegated(100, 60);
        assert_eq!(pool.redeem(40.into()), Ok(LiquiditySource::Local));
        assert_eq!(pool.undelegated_principal(), YoctoNear::ZERO);
        assert_eq!(pool.total_principal(), YoctoNear(60));
        assert_eq!(pool.reserved_liquidity(), YoctoNear::ZERO);
    }

    #[test]
    fn redeem_shortfall_is_withdrawn_from_delegate() {
        let mut pool = staked_and_delegated(100, 60);
        assert_eq!(
            pool.redeem(70.into()),
            Ok(LiquiditySource::Delegate {
                local_reserved: 40.into(),
                shortfall: 30.into()
            })
        );
        assert_eq!(pool.undelegated_principal(), YoctoNear::ZERO);
        assert_eq!(pool.reserved_liquidity(), YoctoNear(40));
        assert_eq!(pool.delegated_principal(), YoctoNear(30));
        assert_eq!(pool.total_principal(), YoctoNear(30));
        assert_eq!(pool.total_managed_assets(), YoctoNear(30));

        pool.release_reserved(40.into());
        assert_eq!(pool.reserved_liquidity(), YoctoNear::ZERO);
    }

    #[test]
    fn redeem_more_than_managed_assets() {
        let mut pool = staked_and_delegated(100, 60);
        assert_eq!(pool.redeem(101.into()), Err(INSUFFICIENT_POOL_ASSETS));
        assert_eq!(pool, staked_and_delegated(100, 60));
    }

    #[test]
    fn settle_rewards_mints_fee_receipts() {
        testing_env!(new_context(OPERATOR));
        let mut pool = staked_and_delegated(100 * YOCTO, 100 * YOCTO);
        let settlement = pool.settle(
            (110 * YOCTO).into(),
            (100 * YOCTO).into(),
            &settings(1000, ExchangeRateMode::Dynamic),
        )
        .unwrap();
        match settlement {
            Settlement::Rewards {
                rewards,
                fee,
                fee_receipts,
            } => {
                assert_eq!(rewards, YoctoNear(10 * YOCTO));
                assert_eq!(fee, YoctoNear(YOCTO));
                // 1 NEAR * 100 / 109
                assert_eq!(fee_receipts, YoctoReceipt(100 * YOCTO / 109));
            }
            _ => panic!("expected rewards settlement: {:?}", settlement),
        }
        assert_eq!(pool.accrued_rewards(), YoctoNear(10 * YOCTO));
        assert_eq!(pool.total_fees(), YoctoNear(YOCTO));
        assert_eq!(pool.total_managed_assets(), YoctoNear(110 * YOCTO));
    }

    #[test]
    fn settle_rewards_without_receipts_skips_fee() {
        testing_env!(new_context(OPERATOR));
        let mut pool = PrincipalPool::default();
        let settlement = pool.settle(
            10.into(),
            YoctoReceipt::ZERO,
            &settings(1000, ExchangeRateMode::Dynamic),
        )
        .unwrap();
        assert_eq!(
            settlement,
            Settlement::Rewards {
                rewards: 10.into(),
                fee: YoctoNear::ZERO,
                fee_receipts: YoctoReceipt::ZERO
            }
        );
    }

    #[test]
    fn settle_loss_within_tolerance() {
        testing_env!(new_context(OPERATOR));
        let mut pool = staked_and_delegated(1000, 1000);
        pool.settle(
            1010.into(),
            1000.into(),
            &settings(0, ExchangeRateMode::Dynamic),
        )
        .unwrap();
        // tolerance is 1% of 1010
        let settlement = pool.settle(
            1000.into(),
            1000.into(),
            &settings(0, ExchangeRateMode::Dynamic),
        )
        .unwrap();
        assert_eq!(settlement, Settlement::LossApplied { loss: 10.into() });
        assert_eq!(pool.accrued_rewards(), YoctoNear::ZERO);
        assert_eq!(pool.delegated_principal(), YoctoNear(1000));
    }

    #[test]
    fn settle_loss_beyond_tolerance_leaves_pool_unchanged() {
        testing_env!(new_context(OPERATOR));
        let mut pool = staked_and_delegated(1000, 1000);
        let settlement = pool.settle(
            989.into(),
            1000.into(),
            &settings(0, ExchangeRateMode::Dynamic),
        )
        .unwrap();
        assert_eq!(settlement, Settlement::SlashingDetected { loss: 11.into() });
        assert_eq!(pool, staked_and_delegated(1000, 1000));

        pool.apply_loss(11.into());
        assert_eq!(pool.delegated_principal(), YoctoNear(989));
        assert_eq!(pool.total_principal(), YoctoNear(1000));
    }

    #[test]
    fn settle_fee_overflow_leaves_pool_unchanged() {
        testing_env!(new_context(OPERATOR));
        // a 100% fee on rewards backed by a single yoctoNEAR of net assets cannot be minted
        let mut pool = staked_and_delegated(1, 1);
        let before = pool;
        assert_eq!(
            pool.settle(
                (1 + 100 * YOCTO).into(),
                (100 * YOCTO).into(),
                &settings(10000, ExchangeRateMode::Dynamic),
            ),
            Err(CONVERSION_OVERFLOW)
        );
        assert_eq!(pool, before);
    }
}
