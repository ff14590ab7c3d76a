//! centralizes all error codes and messages
//!
//! Errors are formatted as `[ERR] [CODE] message`. Contract functions panic with the formatted error,
//! which aborts the function call and rolls back all state changes. Callbacks cannot abort without
//! losing their rollback, thus they log the error and return it as a [`Failure`].

use near_sdk::{
    env,
    serde::{Deserialize, Serialize},
};
use std::fmt::{self, Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrCode(pub &'static str);

impl Display for ErrCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[ERR] [{}]", self.0)
    }
}

impl ErrCode {
    /// constructs an [`Error`] using this [`ErrCode`] and the specified message
    pub fn error<Msg: Display>(&self, msg: Msg) -> Error<Msg> {
        Error(*self, msg)
    }
}

pub const INVALID_AMOUNT: ErrCode = ErrCode("INVALID_AMOUNT");
pub const INSUFFICIENT_BALANCE: ErrCode = ErrCode("INSUFFICIENT_BALANCE");
pub const DELEGATE_UNAVAILABLE: ErrCode = ErrCode("DELEGATE_UNAVAILABLE");
pub const NOT_YET_UNLOCKED: ErrCode = ErrCode("NOT_YET_UNLOCKED");
pub const UNAUTHORIZED: ErrCode = ErrCode("UNAUTHORIZED");
pub const INVALID_CONFIG: ErrCode = ErrCode("INVALID_CONFIG");
pub const SLASHING_TOLERANCE_EXCEEDED: ErrCode = ErrCode("SLASHING_TOLERANCE_EXCEEDED");
pub const CONTRACT_LOCKED: ErrCode = ErrCode("CONTRACT_LOCKED");
pub const WITHDRAWAL_REQUEST_NOT_FOUND: ErrCode = ErrCode("WITHDRAWAL_REQUEST_NOT_FOUND");
pub const INVALID_REQUEST_STATE: ErrCode = ErrCode("INVALID_REQUEST_STATE");
pub const ILLEGAL_STATE: ErrCode = ErrCode("ILLEGAL_STATE");

#[derive(Debug, Clone, PartialEq)]
pub struct Error<Msg>(pub ErrCode, pub Msg)
where
    Msg: Display;

impl<Msg> Display for Error<Msg>
where
    Msg: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

impl<Msg> Error<Msg>
where
    Msg: Display,
{
    pub fn panic(&self) -> ! {
        env::panic(self.to_string().as_bytes())
    }

    pub fn log(&self) {
        env::log(self.to_string().as_bytes())
    }
}

/// Error that can be defined as a constant, i.e., the error message is constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorConst(pub ErrCode, pub &'static str);

impl Display for ErrorConst {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.1)
    }
}

impl ErrorConst {
    pub fn code(&self) -> ErrCode {
        self.0
    }

    pub fn panic(&self) -> ! {
        env::panic(self.to_string().as_bytes())
    }

    pub fn log(&self) {
        env::log(self.to_string().as_bytes())
    }

    pub fn assert<F>(&self, check: F)
    where
        F: FnOnce() -> bool,
    {
        if !check() {
            self.panic();
        }
    }
}

/// Serializable error returned by callbacks
#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(crate = "near_sdk::serde")]
pub struct Failure {
    pub code: String,
    pub msg: String,
}

impl From<ErrorConst> for Failure {
    fn from(err: ErrorConst) -> Self {
        Self {
            code: (err.0).0.to_string(),
            msg: err.1.to_string(),
        }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[ERR] [{}] {}", self.code, self.msg)
    }
}

pub mod asserts {
    use super::*;

    pub const PREDECESSOR_MUST_BE_OPERATOR: ErrorConst = ErrorConst(
        UNAUTHORIZED,
        "contract call is only allowed by the operator account",
    );

    pub const PREDECESSOR_MUST_BE_REQUESTER_OR_OPERATOR: ErrorConst = ErrorConst(
        UNAUTHORIZED,
        "withdrawal can only be claimed by the requester or the operator",
    );

    pub const BLOCKED_BY_DELEGATE_CALL: ErrorConst = ErrorConst(
        CONTRACT_LOCKED,
        "action is blocked while a staking delegate call is in progress",
    );
}

pub mod staking_service {
    use super::*;

    pub const ZERO_STAKE_AMOUNT: ErrorConst =
        ErrorConst(INVALID_AMOUNT, "deposit is required in order to stake");

    pub const STAKE_BELOW_MINIMUM: ErrorConst = ErrorConst(
        INVALID_AMOUNT,
        "deposit is below the minimum stake amount",
    );

    pub const STAKE_TOO_SMALL_TO_MINT: ErrorConst = ErrorConst(
        INVALID_AMOUNT,
        "deposit is too small to mint any receipt tokens",
    );

    pub const ZERO_REDEEM_AMOUNT: ErrorConst =
        ErrorConst(INVALID_AMOUNT, "redeem amount must not be zero");

    pub const REDEEM_TOO_SMALL: ErrorConst = ErrorConst(
        INVALID_AMOUNT,
        "redeem amount is too small to be worth any NEAR",
    );

    pub const INSUFFICIENT_RECEIPTS_FOR_REDEEM_REQUEST: ErrorConst = ErrorConst(
        INSUFFICIENT_BALANCE,
        "account receipt token balance is insufficient to fulfill request",
    );

    pub const INSUFFICIENT_POOL_ASSETS: ErrorConst = ErrorConst(
        INSUFFICIENT_BALANCE,
        "pool assets are insufficient to fulfill the redeem request",
    );

    pub const ZERO_DELEGATION_AMOUNT: ErrorConst =
        ErrorConst(INVALID_AMOUNT, "delegation amount must not be zero");

    pub const DELEGATION_EXCEEDS_UNDELEGATED_PRINCIPAL: ErrorConst = ErrorConst(
        INVALID_AMOUNT,
        "delegation amount exceeds the undelegated principal",
    );
}

pub mod exchange_rate {
    use super::*;

    pub const RECEIPTS_HAVE_NO_BACKING: ErrorConst = ErrorConst(
        INVALID_AMOUNT,
        "receipt supply is not backed by any managed assets - staking is suspended",
    );

    pub const CONVERSION_OVERFLOW: ErrorConst = ErrorConst(
        INVALID_AMOUNT,
        "amount is too large to convert at the current exchange rate",
    );
}

pub mod withdrawal_requests {
    use super::*;

    pub const REQUEST_NOT_FOUND: ErrorConst = ErrorConst(
        WITHDRAWAL_REQUEST_NOT_FOUND,
        "withdrawal request does not exist",
    );

    pub const FUNDS_NOT_YET_UNLOCKED: ErrorConst = ErrorConst(
        NOT_YET_UNLOCKED,
        "withdrawal request funds are not yet unlocked",
    );

    pub const REQUEST_ALREADY_SETTLED: ErrorConst = ErrorConst(
        INVALID_REQUEST_STATE,
        "withdrawal request has already been settled",
    );

    pub const REQUEST_CANCELLED: ErrorConst = ErrorConst(
        INVALID_REQUEST_STATE,
        "withdrawal request was cancelled",
    );
}

pub mod staking_delegate_failures {
    use super::*;

    pub const DEPOSIT_FAILURE: ErrorConst = ErrorConst(
        DELEGATE_UNAVAILABLE,
        "failed to deposit principal with the staking delegate",
    );

    pub const REQUEST_WITHDRAWAL_FAILURE: ErrorConst = ErrorConst(
        DELEGATE_UNAVAILABLE,
        "failed to request withdrawal from the staking delegate",
    );

    pub const CLAIM_WITHDRAWAL_FAILURE: ErrorConst = ErrorConst(
        DELEGATE_UNAVAILABLE,
        "failed to claim withdrawal from the staking delegate",
    );

    pub const REPORT_BALANCES_FAILURE: ErrorConst = ErrorConst(
        DELEGATE_UNAVAILABLE,
        "failed to get balances from the staking delegate",
    );
}

pub mod settlement {
    use super::*;

    pub const SLASHING_DETECTED: ErrorConst = ErrorConst(
        SLASHING_TOLERANCE_EXCEEDED,
        "reported delegate balance dropped beyond the slashing tolerance",
    );

    pub const SETTLEMENT_HALTED: ErrorConst = ErrorConst(
        SLASHING_TOLERANCE_EXCEEDED,
        "rewards settlement is halted until the operator acknowledges the slashing report",
    );

    pub const NO_SLASHING_REPORT: ErrorConst = ErrorConst(
        INVALID_REQUEST_STATE,
        "there is no slashing report pending acknowledgement",
    );
}

pub mod settings {
    use super::*;

    pub const FEE_RATE_OUT_OF_RANGE: ErrorConst =
        ErrorConst(INVALID_CONFIG, "fee rate must not exceed 10000 basis points");

    pub const SLASHING_TOLERANCE_OUT_OF_RANGE: ErrorConst = ErrorConst(
        INVALID_CONFIG,
        "slashing tolerance must not exceed 10000 basis points",
    );

    pub const DELEGATE_IN_USE: ErrorConst = ErrorConst(
        INVALID_CONFIG,
        "staking delegate cannot be changed while funds are delegated or withdrawals are pending",
    );

    pub const INVALID_ACCOUNT_ID: ErrorConst = ErrorConst(
        INVALID_CONFIG,
        "staking delegate account ID must not be the contract account ID",
    );

    pub const EXCHANGE_RATE_MODE_LOCKED: ErrorConst = ErrorConst(
        INVALID_CONFIG,
        "exchange rate mode cannot be changed once receipts have been minted",
    );

    pub const OPERATOR_ID_MUST_NOT_BE_CONTRACT_ID: ErrorConst = ErrorConst(
        INVALID_CONFIG,
        "operator account ID must not be the contract account ID",
    );
}

pub mod illegal_state {
    use super::*;

    pub const PREDECESSOR_MUST_BE_SELF: ErrorConst = ErrorConst(
        ILLEGAL_STATE,
        "contract call is only allowed internally by the contract itself",
    );

    pub const UNEXPECTED_DELEGATE_LOCK: ErrorConst = ErrorConst(
        ILLEGAL_STATE,
        "callback was invoked without the matching delegate lock",
    );

    pub const WITHDRAWAL_REQUEST_SHOULD_EXIST: ErrorConst = ErrorConst(
        ILLEGAL_STATE,
        "withdrawal request should exist",
    );
}
