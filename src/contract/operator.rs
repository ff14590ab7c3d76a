//required in order for near_bindgen macro to work outside of lib.rs
use crate::*;
use crate::{
    config::updates,
    errors::settlement::{NO_SLASHING_REPORT, SETTLEMENT_HALTED},
    interface::{
        self, ext_settlement_callbacks, ext_staking_delegate,
        operator::events::SlashingAcknowledged, ContractState, Operator,
    },
    near::{log, NO_DEPOSIT},
};
use near_sdk::{near_bindgen, Promise};

#[near_bindgen]
impl Operator for LiquidStakingContract {
    fn operator_id(&self) -> AccountId {
        self.operator_id.clone()
    }

    fn contract_state(&self) -> ContractState {
        ContractState {
            block_height: domain::BlockHeight::from_env().into(),
            block_timestamp: domain::BlockTimestamp::from_env().into(),
            settings_change_block_height: self.settings_change_block_height.into(),
            delegate_id: self.settings.delegate_id().clone(),
            pool: self.pool.into(),
            receipt_supply: self.receipt_token.total_supply().into(),
            exchange_rate: self.exchange_rate_snapshot().into(),
            withdrawal_request_id_sequence: self.withdrawal_request_id_sequence.into(),
            outstanding_withdrawal_requests: self.outstanding_withdrawal_requests.into(),
            delegate_lock: self.delegate_lock.map(Into::into),
            slashing_report: self.slashing_report.map(Into::into),
            account_balance: env::account_balance().into(),
        }
    }

    fn delegate_principal(&mut self, amount: Option<interface::YoctoNear>) -> Promise {
        self.assert_predecessor_is_operator();
        self.assert_not_locked();
        let amount = amount
            .map(Into::into)
            .unwrap_or_else(|| self.pool.undelegated_principal());
        self.start_delegation(amount)
            .unwrap_or_else(|err| err.panic())
    }

    fn settle_rewards(&mut self) -> Promise {
        self.assert_predecessor_is_operator();
        self.assert_not_locked();
        SETTLEMENT_HALTED.assert(|| self.slashing_report.is_none());

        self.delegate_lock = Some(DelegateLock::SettlingRewards);
        let gas_config = self.settings.gas_config();
        ext_staking_delegate::report_balances(
            env::current_account_id(),
            self.settings.delegate_id(),
            NO_DEPOSIT.into(),
            gas_config.staking_delegate().report_balances(),
        )
        .then(ext_settlement_callbacks::on_report_balances(
            &env::current_account_id(),
            NO_DEPOSIT.into(),
            gas_config.callbacks().on_report_balances(),
        ))
    }

    fn acknowledge_slashing(&mut self) -> interface::SlashingReport {
        self.assert_predecessor_is_operator();
        self.assert_not_locked();
        let report = self
            .slashing_report
            .take()
            .unwrap_or_else(|| NO_SLASHING_REPORT.panic());

        self.pool.apply_loss(report.loss);
        log(SlashingAcknowledged {
            loss: report.loss.value(),
            exchange_rate: self.exchange_rate_snapshot().value().value(),
        });
        report.into()
    }

    fn update_gas_config(&mut self, update: updates::GasConfig) {
        self.assert_predecessor_is_operator();
        self.settings.gas_config_mut().update(&update);
    }
}
