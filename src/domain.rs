//! defines the internal domain model used to implement the business logic
//!
//! NOTE: the domain model is separate from the interface model. That being said, the interface model
//! closely mirrors the domain model.

mod basis_points;
mod block_height;
mod block_timestamp;
mod exchange_rate;
mod lock;
mod principal_pool;
mod receipt_token_ledger;
mod settings;
mod slashing_report;
mod withdrawal_request;
mod yocto_near;
mod yocto_receipt;

pub use basis_points::BasisPoints;
pub use block_height::BlockHeight;
pub use block_timestamp::BlockTimestamp;
pub use exchange_rate::ExchangeRate;
pub use lock::DelegateLock;
pub use principal_pool::{LiquiditySource, PrincipalPool, Settlement};
pub use receipt_token_ledger::ReceiptTokenLedger;
pub use settings::{
    ExchangeRateMode, Settings, DEFAULT_FEE_RATE, DEFAULT_MINIMUM_STAKE,
    DEFAULT_SLASHING_TOLERANCE,
};
pub use slashing_report::SlashingReport;
pub use withdrawal_request::{WithdrawalRequest, WithdrawalRequestId, WithdrawalState};
pub use yocto_near::YoctoNear;
pub use yocto_receipt::YoctoReceipt;
