//! Error types for the cross-domain messenger
//!
//! Every error aborts the whole execution and leaves storage untouched. The
//! one deliberate exception is a failing nested call during a relay, which is
//! never surfaced as an error: the reply records it as `Failed` instead.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Messenger is paused")]
    Paused,

    // ========================================================================
    // Relay Errors
    // ========================================================================

    #[error("Unsupported message version: {version}")]
    UnsupportedVersion { version: u16 },

    #[error("Reentrant call: message {hash} is already being relayed")]
    ReentrantCall { hash: String },

    #[error("Value mismatch: expected {expected}, got {got}")]
    ValueMismatch { expected: Uint128, got: Uint128 },

    #[error("Message {hash} has already been relayed")]
    AlreadyRelayed { hash: String },

    #[error("Unsafe target: messages cannot be sent to {target}")]
    UnsafeTarget { target: String },

    #[error("Insufficient relay gas: need more than {required}, forwarded {available}")]
    InsufficientRelayGas { required: u64, available: u64 },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    #[error("Invalid hash length: expected 32 bytes, got {got}")]
    InvalidHashLength { got: usize },

    #[error("Invalid gas policy: {reason}")]
    InvalidGasPolicy { reason: String },

    #[error("Unknown reply id: {id}")]
    UnknownReply { id: u64 },
}
