use crate::errors::Failure;
use crate::interface::{
    ExchangeRate, PrincipalPool, Redemption, WithdrawalRequest, WithdrawalRequestId, YoctoNear,
    YoctoReceipt,
};
use near_sdk::{ext_contract, Promise, PromiseOrValue};

pub trait StakingService {
    ////////////////////////////
    //     VIEW METHODS    ///
    // //////////////////////

    /// returns the current exchange rate between receipts and NEAR
    fn exchange_rate(&self) -> ExchangeRate;

    fn principal_pool(&self) -> PrincipalPool;

    /// pending requests whose funds have unlocked are reported as claimable
    fn withdrawal_request(&self, request_id: WithdrawalRequestId) -> Option<WithdrawalRequest>;

    //////////////////////////////
    //     CHANGE METHODS    ///
    // ////////////////////////

    /// Stakes the attached deposit and mints receipts at the current exchange rate.
    ///
    /// The NEAR is added to the undelegated principal. If a liquidity buffer is configured and the
    /// undelegated principal now exceeds it, then the excess is delegated.
    ///
    /// Returns the amount of receipts minted.
    ///
    /// ## Panics
    /// - `INVALID_AMOUNT` if the deposit is zero, below the minimum stake, or too small to mint any
    ///   receipts
    /// - `CONTRACT_LOCKED` if a staking delegate call is in progress
    ///
    /// #[payable]
    fn user_stake(&mut self) -> YoctoReceipt;

    /// Burns the receipts and redeems them for NEAR at the current exchange rate.
    ///
    /// If the undelegated principal covers the redemption, then the NEAR is transferred right away.
    /// Otherwise, the undelegated principal is reserved for the redeemer and the shortfall is
    /// withdrawn from the staking delegate. The redemption is then tracked as a [WithdrawalRequest],
    /// which can be claimed via [StakingService::claim_withdrawal] once the funds are unlocked.
    ///
    /// ## Panics
    /// - `INVALID_AMOUNT` if the amount is zero or worth no NEAR
    /// - `INSUFFICIENT_BALANCE` if the predecessor account does not own enough receipts
    /// - `CONTRACT_LOCKED` if a staking delegate call is in progress
    fn user_unstake(&mut self, amount: YoctoReceipt) -> PromiseOrValue<Redemption>;

    /// Claims the unlocked funds from the staking delegate and transfers the NEAR owed to the
    /// requester.
    ///
    /// ## Panics
    /// - `WITHDRAWAL_REQUEST_NOT_FOUND`
    /// - `UNAUTHORIZED` if the predecessor is neither the requester nor the operator
    /// - `INVALID_REQUEST_STATE` if the request is already settled or was cancelled
    /// - `NOT_YET_UNLOCKED` if the funds are still unbonding
    /// - `CONTRACT_LOCKED` if a staking delegate call is in progress
    fn claim_withdrawal(&mut self, request_id: WithdrawalRequestId) -> Promise;
}

#[ext_contract(ext_staking_workflow_callbacks)]
pub trait ExtStakingWorkflowCallbacks {
    /// releases the delegate lock and moves the principal to the delegated side if the deposit
    /// succeeded
    fn on_delegate_principal(&mut self, amount: YoctoNear) -> Result<YoctoNear, Failure>;
}

#[ext_contract(ext_redeeming_workflow_callbacks)]
pub trait ExtRedeemingWorkflowCallbacks {
    /// records the staking delegate withdrawal on the request, or cancels the request and rolls back
    /// the redemption if the staking delegate rejected it
    fn on_request_withdrawal(&mut self, request_id: WithdrawalRequestId) -> Redemption;

    /// pays out the withdrawal request if the funds were claimed from the staking delegate
    fn on_claim_withdrawal(&mut self, request_id: WithdrawalRequestId)
        -> Result<YoctoNear, Failure>;
}

pub mod events {
    #[derive(Debug)]
    pub struct Staked<'a> {
        pub account_id: &'a str,
        pub amount: u128,
        pub receipts_minted: u128,
        /// value of 1 receipt
        pub exchange_rate: u128,
    }

    #[derive(Debug)]
    pub struct Unstaked<'a> {
        pub account_id: &'a str,
        pub receipts_burned: u128,
        pub amount: u128,
    }

    #[derive(Debug)]
    pub struct PrincipalDelegated {
        pub amount: u128,
        pub delegated_principal: u128,
        pub undelegated_principal: u128,
    }

    #[derive(Debug)]
    pub struct WithdrawalRequested<'a> {
        pub request_id: u64,
        pub account_id: &'a str,
        pub receipts_burned: u128,
        pub amount: u128,
        pub local_reserved: u128,
        pub delegate_amount: u128,
        pub unlock_timestamp: u64,
    }

    #[derive(Debug)]
    pub struct WithdrawalRequestCancelled<'a> {
        pub request_id: u64,
        pub account_id: &'a str,
        pub receipts_restored: u128,
    }

    #[derive(Debug)]
    pub struct WithdrawalClaimed<'a> {
        pub request_id: u64,
        pub account_id: &'a str,
        pub amount: u128,
    }
}
