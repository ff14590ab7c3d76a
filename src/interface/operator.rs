use crate::config::updates;
use crate::errors::Failure;
use crate::interface::{ContractState, RewardsSettlement, SlashingReport, YoctoNear};
use near_sdk::{ext_contract, AccountId, Promise};

pub trait Operator {
    ////////////////////////////
    //     VIEW METHODS    ///
    // //////////////////////

    fn operator_id(&self) -> AccountId;

    /// returns the contract's state
    /// - useful for monitoring and debugging
    fn contract_state(&self) -> ContractState;

    //////////////////////////////
    //     CHANGE METHODS    ///
    // ////////////////////////

    /// Deposits undelegated principal with the staking delegate. If the amount is not specified, then
    /// all undelegated principal is delegated.
    ///
    /// ## Panics
    /// - `UNAUTHORIZED` if not invoked by the operator
    /// - `INVALID_AMOUNT` if the amount is zero or exceeds the undelegated principal
    /// - `CONTRACT_LOCKED` if a staking delegate call is in progress
    fn delegate_principal(&mut self, amount: Option<YoctoNear>) -> Promise;

    /// Reconciles the principal pool against the balances reported by the staking delegate:
    /// - balance growth is recognized as rewards, and the fee is minted as receipts to the treasury
    /// - a balance drop within the slashing tolerance is absorbed by the pool
    /// - a balance drop beyond the slashing tolerance halts settlement until it is acknowledged via
    ///   [Operator::acknowledge_slashing]
    ///
    /// ## Panics
    /// - `UNAUTHORIZED` if not invoked by the operator
    /// - `SLASHING_TOLERANCE_EXCEEDED` if settlement is halted
    /// - `CONTRACT_LOCKED` if a staking delegate call is in progress
    fn settle_rewards(&mut self) -> Promise;

    /// Writes off the loss of the pending slashing report and resumes rewards settlement.
    ///
    /// ## Panics
    /// - `UNAUTHORIZED` if not invoked by the operator
    /// - `INVALID_REQUEST_STATE` if there is no slashing report pending
    /// - `CONTRACT_LOCKED` if a staking delegate call is in progress
    fn acknowledge_slashing(&mut self) -> SlashingReport;

    /// ## Panics
    /// - `UNAUTHORIZED` if not invoked by the operator
    fn update_gas_config(&mut self, update: updates::GasConfig);
}

#[ext_contract(ext_settlement_callbacks)]
pub trait ExtSettlementCallbacks {
    fn on_report_balances(&mut self) -> Result<RewardsSettlement, Failure>;
}

pub mod events {
    #[derive(Debug)]
    pub struct RewardsSettled {
        pub observed: u128,
        pub rewards: u128,
        pub fee: u128,
        pub fee_receipts: u128,
        /// value of 1 receipt
        pub exchange_rate: u128,
    }

    #[derive(Debug)]
    pub struct SlashingDetected {
        pub last_known: u128,
        pub reported: u128,
        pub loss: u128,
    }

    #[derive(Debug)]
    pub struct SlashingApplied {
        pub loss: u128,
        /// value of 1 receipt
        pub exchange_rate: u128,
    }

    #[derive(Debug)]
    pub struct SlashingAcknowledged {
        pub loss: u128,
        /// value of 1 receipt
        pub exchange_rate: u128,
    }
}
