//! defines the interfaces that the contract exposes externally

mod model;
pub mod operator;
pub mod receipt_token;
pub mod settings_registry;
pub mod staking_delegate;
pub mod staking_service;

pub use model::*;
pub use operator::*;
pub use receipt_token::*;
pub use settings_registry::*;
pub use staking_delegate::*;
pub use staking_service::*;
