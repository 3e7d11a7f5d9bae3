//! Cross-Domain Messenger Contract
//!
//! Carries arbitrary calls, optionally with native value, between two
//! domains over an unreliable one-way transport, and makes every message
//! take effect at most once.
//!
//! # Outbound
//! 1. A caller executes `SendMessage` with the value attached as funds
//! 2. The messenger allocates a versioned nonce and hands a `RelayMessage`
//!    payload for the counterpart messenger to the transport
//!
//! # Inbound
//! 1. The transport (or anyone retrying a failed message) executes
//!    `RelayMessage`
//! 2. The message hash is locked, checked against the replay record and the
//!    target is called as a sub-message with a bounded gas limit
//! 3. The reply records `Succeeded` or `Failed`; a failed message can be
//!    relayed again with identical arguments
//!
//! # Security
//! - Content-hash replay record (`Succeeded` is terminal)
//! - Per-hash reentrancy lock held for the duration of the nested call
//! - Calls into the messenger itself or the transport are refused
//! - Relays that cannot forward the requested gas abort instead of failing

pub mod contract;
pub mod encoding;
pub mod error;
mod execute;
pub mod msg;
pub mod nonce;
mod query;
pub mod replay;
pub mod state;

pub use crate::encoding::{keccak256, CrossDomainMessage};
pub use crate::error::ContractError;
pub use crate::nonce::{decode_versioned_nonce, encode_versioned_nonce};
