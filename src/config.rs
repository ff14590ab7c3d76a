use near_sdk::{
    borsh::{self, BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
};

const BASE_GAS: u64 = 25_000_000_000_000;

/// gas allotted to staking delegate function calls and to the callbacks that process their results
#[derive(
    Debug,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    PartialEq,
    Default,
)]
#[serde(crate = "near_sdk::serde")]
pub struct GasConfig {
    staking_delegate: StakingDelegateGasConfig,
    callbacks: CallBacksGasConfig,
}

impl GasConfig {
    pub fn staking_delegate(&self) -> &StakingDelegateGasConfig {
        &self.staking_delegate
    }

    pub fn callbacks(&self) -> &CallBacksGasConfig {
        &self.callbacks
    }

    pub fn update(&mut self, config: &updates::GasConfig) {
        if let Some(staking_delegate) = config.staking_delegate.as_ref() {
            self.staking_delegate.update(staking_delegate);
        }

        if let Some(callbacks) = config.callbacks.as_ref() {
            self.callbacks.update(callbacks);
        }
    }
}

#[derive(Debug, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct StakingDelegateGasConfig {
    deposit: u64,
    request_withdrawal: u64,
    claim_withdrawal: u64,
    report_balances: u64,
}

impl Default for StakingDelegateGasConfig {
    fn default() -> Self {
        Self {
            deposit: BASE_GAS * 2,
            request_withdrawal: BASE_GAS * 2,
            claim_withdrawal: BASE_GAS * 2,
            report_balances: BASE_GAS,
        }
    }
}

impl StakingDelegateGasConfig {
    pub fn deposit(&self) -> u64 {
        self.deposit
    }

    pub fn request_withdrawal(&self) -> u64 {
        self.request_withdrawal
    }

    pub fn claim_withdrawal(&self) -> u64 {
        self.claim_withdrawal
    }

    pub fn report_balances(&self) -> u64 {
        self.report_balances
    }

    pub fn update(&mut self, config: &updates::StakingDelegateGasConfig) {
        if let Some(deposit) = config.deposit {
            self.deposit = deposit;
        }

        if let Some(request_withdrawal) = config.request_withdrawal {
            self.request_withdrawal = request_withdrawal;
        }

        if let Some(claim_withdrawal) = config.claim_withdrawal {
            self.claim_withdrawal = claim_withdrawal;
        }

        if let Some(report_balances) = config.report_balances {
            self.report_balances = report_balances;
        }
    }
}

#[derive(Debug, BorshSerialize, BorshDeserialize, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct CallBacksGasConfig {
    on_delegate_principal: u64,
    on_request_withdrawal: u64,
    on_claim_withdrawal: u64,
    on_report_balances: u64,
}

impl CallBacksGasConfig {
    pub fn on_delegate_principal(&self) -> u64 {
        self.on_delegate_principal
    }

    pub fn on_request_withdrawal(&self) -> u64 {
        self.on_request_withdrawal
    }

    pub fn on_claim_withdrawal(&self) -> u64 {
        self.on_claim_withdrawal
    }

    pub fn on_report_balances(&self) -> u64 {
        self.on_report_balances
    }

    pub fn update(&mut self, config: &updates::CallBacksGasConfig) {
        if let Some(on_delegate_principal) = config.on_delegate_principal {
            self.on_delegate_principal = on_delegate_principal;
        }

        if let Some(on_request_withdrawal) = config.on_request_withdrawal {
            self.on_request_withdrawal = on_request_withdrawal;
        }

        if let Some(on_claim_withdrawal) = config.on_claim_withdrawal {
            self.on_claim_withdrawal = on_claim_withdrawal;
        }

        if let Some(on_report_balances) = config.on_report_balances {
            self.on_report_balances = on_report_balances;
        }
    }
}

impl Default for CallBacksGasConfig {
    fn default() -> Self {
        Self {
            on_delegate_principal: BASE_GAS,
            on_request_withdrawal: BASE_GAS,
            on_claim_withdrawal: BASE_GAS,
            on_report_balances: BASE_GAS,
        }
    }
}

/// provides support for config updates
/// - config updates can be uploaded in a serde compatible format (JSON)
/// - all config properties are optional - thus only config properties that change need to be specified
///   when updating the config
pub mod updates {
    use near_sdk::serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, Default, Clone)]
    #[serde(crate = "near_sdk::serde")]
    pub struct GasConfig {
        pub staking_delegate: Option<StakingDelegateGasConfig>,
        pub callbacks: Option<CallBacksGasConfig>,
    }

    #[derive(Debug, Serialize, Deserialize, Default, Clone)]
    #[serde(crate = "near_sdk::serde")]
    pub struct StakingDelegateGasConfig {
        pub deposit: Option<u64>,
        pub request_withdrawal: Option<u64>,
        pub claim_withdrawal: Option<u64>,
        pub report_balances: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize, Default, Clone)]
    #[serde(crate = "near_sdk::serde")]
    pub struct CallBacksGasConfig {
        pub on_delegate_principal: Option<u64>,
        pub on_request_withdrawal: Option<u64>,
        pub on_claim_withdrawal: Option<u64>,
        pub on_report_balances: Option<u64>,
    }
}
