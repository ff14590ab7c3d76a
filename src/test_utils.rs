use crate::interface::{ContractSettings, SettingsRegistry, SettingsUpdate, StakingService};
use crate::near::YOCTO;
use crate::LiquidStakingContract;
use near_sdk::{
    env,
    json_types::ValidAccountId,
    test_utils::VMContextBuilder,
    testing_env, MockedBlockchain, PromiseResult, VMContext,
};
use std::convert::TryFrom;

pub const CONTRACT_ID: &str = "liquid-staking.near";
pub const OPERATOR: &str = "operator.near";
pub const DELEGATE: &str = "delegate.near";
pub const TREASURY: &str = "treasury.near";
pub const USER: &str = "user.near";

pub const CONTRACT_ACCOUNT_BALANCE: u128 = 10000 * YOCTO;

pub fn valid_account_id(account_id: &str) -> ValidAccountId {
    ValidAccountId::try_from(account_id).unwrap()
}

/// - `predecessor_account_id` is also used as the `signer_account_id`
/// - `account_balance` is set to 10000 NEAR
pub fn new_context(predecessor_account_id: &str) -> VMContext {
    VMContextBuilder::new()
        .current_account_id(valid_account_id(CONTRACT_ID))
        .signer_account_id(valid_account_id(predecessor_account_id))
        .predecessor_account_id(valid_account_id(predecessor_account_id))
        .account_balance(CONTRACT_ACCOUNT_BALANCE)
        .prepaid_gas(10u64.pow(18))
        .build()
}

pub fn contract_settings() -> ContractSettings {
    ContractSettings::new(
        valid_account_id(OPERATOR),
        valid_account_id(DELEGATE),
        valid_account_id(TREASURY),
    )
}

/// Injects the promise result into the test environment, which enables callbacks to be unit tested.
/// Contract storage is carried over.
pub fn set_promise_result(context: VMContext, result: PromiseResult) {
    let storage = env::take_blockchain_interface()
        .unwrap()
        .as_mut_mocked_blockchain()
        .unwrap()
        .take_storage();

    env::set_blockchain_interface(Box::new(MockedBlockchain::new(
        context,
        Default::default(),
        Default::default(),
        vec![result],
        storage,
        Default::default(),
        Default::default(),
    )));
}

pub struct TestContext {
    pub contract: LiquidStakingContract,
    /// user context
    pub context: VMContext,
}

impl TestContext {
    /// deploys the contract with the default settings
    pub fn new() -> Self {
        testing_env!(new_context(OPERATOR));
        let contract = LiquidStakingContract::new(contract_settings());
        Self {
            contract,
            context: new_context(USER),
        }
    }

    pub fn operator_context(&self) -> VMContext {
        self.context_for(OPERATOR)
    }

    /// used to invoke callbacks
    pub fn self_context(&self) -> VMContext {
        self.context_for(CONTRACT_ID)
    }

    fn context_for(&self, account_id: &str) -> VMContext {
        let mut context = self.context.clone();
        context.predecessor_account_id = account_id.to_string();
        context.signer_account_id = account_id.to_string();
        context
    }

    /// returns the amount of receipts minted
    pub fn stake(&mut self, account_id: &str, amount: u128) -> u128 {
        let mut context = self.context_for(account_id);
        context.attached_deposit = amount;
        testing_env!(context);
        self.contract.user_stake().value()
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) {
        testing_env!(self.operator_context());
        self.contract.update_settings(update);
    }
}
