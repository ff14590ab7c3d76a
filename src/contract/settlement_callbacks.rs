//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    domain::{Settlement, YoctoNear, YoctoReceipt},
    errors::{
        illegal_state::UNEXPECTED_DELEGATE_LOCK, settlement::SLASHING_DETECTED,
        staking_delegate_failures::REPORT_BALANCES_FAILURE, Failure,
    },
    interface::{
        operator::events::{RewardsSettled, SlashingApplied, SlashingDetected},
        DelegateBalances, RewardsSettlement,
    },
    near::{self, log, log_events::LOG_EVENT_SETTLEMENT_HALTED},
};
use near_sdk::near_bindgen;

#[near_bindgen]
impl LiquidStakingContract {
    /// Reconciles the pool against the balances reported by the staking delegate.
    ///
    /// Returns an error if the staking delegate could not report its balances, or if the reported
    /// balance dropped beyond the slashing tolerance. In the latter case the pool is left unchanged
    /// and settlement is halted until the operator acknowledges the slashing report.
    pub fn on_report_balances(&mut self) -> Result<RewardsSettlement, Failure> {
        near::assert_predecessor_is_self();
        match self.take_delegate_lock() {
            DelegateLock::SettlingRewards => {}
            _ => UNEXPECTED_DELEGATE_LOCK.panic(),
        }

        let balances = match near::promise_result_value::<DelegateBalances>() {
            Some(balances) => balances,
            None => {
                REPORT_BALANCES_FAILURE.log();
                return Err(REPORT_BALANCES_FAILURE.into());
            }
        };
        let observed: YoctoNear = balances.total().into();
        let last_known = self.pool.delegate_balance();

        let receipt_supply = self.receipt_token.total_supply();
        let settlement = match self.pool.settle(observed, receipt_supply, &self.settings) {
            Ok(settlement) => settlement,
            Err(err) => {
                err.log();
                return Err(err.into());
            }
        };
        match settlement {
            Settlement::Rewards {
                rewards,
                fee,
                fee_receipts,
            } => {
                let treasury_id = self.settings.treasury_id().clone();
                self.receipt_token.mint(&treasury_id, fee_receipts);
                let exchange_rate = self.exchange_rate_snapshot();
                log(RewardsSettled {
                    observed: observed.value(),
                    rewards: rewards.value(),
                    fee: fee.value(),
                    fee_receipts: fee_receipts.value(),
                    exchange_rate: exchange_rate.value().value(),
                });
                Ok(RewardsSettlement {
                    observed: observed.into(),
                    rewards: rewards.into(),
                    loss: YoctoNear::ZERO.into(),
                    fee: fee.into(),
                    fee_receipts: fee_receipts.into(),
                    exchange_rate: exchange_rate.into(),
                })
            }
            Settlement::LossApplied { loss } => {
                let exchange_rate = self.exchange_rate_snapshot();
                log(SlashingApplied {
                    loss: loss.value(),
                    exchange_rate: exchange_rate.value().value(),
                });
                Ok(RewardsSettlement {
                    observed: observed.into(),
                    rewards: YoctoNear::ZERO.into(),
                    loss: loss.into(),
                    fee: YoctoNear::ZERO.into(),
                    fee_receipts: YoctoReceipt::ZERO.into(),
                    exchange_rate: exchange_rate.into(),
                })
            }
            Settlement::SlashingDetected { loss } => {
                self.slashing_report = Some(SlashingReport::new(last_known, observed));
                log(SlashingDetected {
                    last_known: last_known.value(),
                    reported: observed.value(),
                    loss: loss.value(),
                });
                LOG_EVENT_SETTLEMENT_HALTED.log(format!("loss={}", loss));
                Err(SLASHING_DETECTED.into())
            }
        }
    }
}
