//! Wrapped Token Contract
//!
//! A CW20 token whose supply mirrors a token on the other domain. The bridge
//! is its only minter and may burn from any holder; everything else is plain
//! `cw20-base`. Answering `BridgeInfo` is what marks the token as mintable
//! for the bridge.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
