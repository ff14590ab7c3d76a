pub mod log_events;
pub mod storage_keys;

use crate::{domain::YoctoNear, errors::illegal_state::PREDECESSOR_MUST_BE_SELF};
use near_sdk::{env, serde::de::DeserializeOwned, serde_json, PromiseResult};
use std::fmt::Debug;

/// YOCTO = 10^24
pub const YOCTO: u128 = 1_000_000_000_000_000_000_000_000;

/// Used to indicate that no deposit is being attached to a cross contract func call
pub const NO_DEPOSIT: YoctoNear = YoctoNear(0);

/// asserts that predecessor account is the contract itself - used to enforce that callbacks
/// should only be called internally - even though they are exposed on the public contract interface
pub fn assert_predecessor_is_self() {
    PREDECESSOR_MUST_BE_SELF.assert(|| env::predecessor_account_id() == env::current_account_id());
}

/// wrapper around `near_sdk::env::log()` which supports structured logging
pub fn log<T: Debug>(event: T) {
    env::log(format!("{:#?}", event).as_bytes());
}

/// returns true if the callback is processing exactly one upstream promise result and it succeeded
pub fn is_promise_success() -> bool {
    env::promise_results_count() == 1
        && matches!(env::promise_result(0), PromiseResult::Successful(_))
}

/// deserializes the JSON value returned by the upstream promise
/// - returns None if the promise failed or the value could not be deserialized
pub fn promise_result_value<T: DeserializeOwned>() -> Option<T> {
    if env::promise_results_count() != 1 {
        return None;
    }
    match env::promise_result(0) {
        PromiseResult::Successful(bytes) => serde_json::from_slice(&bytes).ok(),
        _ => None,
    }
}
