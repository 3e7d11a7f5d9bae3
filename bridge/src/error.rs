//! Error types for the bridge ledger
//!
//! A finalize that errors aborts only its own sub-message: the messenger
//! records the relay as `Failed` and the same message can be relayed again.

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

    #[error("Unauthorized: finalize must come from the other bridge through the messenger")]
    NotOtherBridge,

    #[error("Bridge is paused")]
    BridgePaused,

    // ========================================================================
    // Transfer Errors
    // ========================================================================

    #[error("Unsafe target: cannot finalize to {target}")]
    UnsafeTarget { target: String },

    #[error("Value mismatch: expected {expected}, got {got}")]
    ValueMismatch { expected: Uint128, got: Uint128 },

    #[error("Token pair mismatch: {token} represents {declared}, not {expected}")]
    TokenPairMismatch {
        token: String,
        expected: String,
        declared: String,
    },

    #[error("Ledger underflow: {requested} requested but {escrowed} escrowed for {local_token}/{remote_token}")]
    LedgerUnderflow {
        local_token: String,
        remote_token: String,
        escrowed: Uint128,
        requested: Uint128,
    },

    #[error("Asset transfer failed: {reason}")]
    AssetTransferFailed { reason: String },

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    // ========================================================================
    // Native Asset Errors
    // ========================================================================

    #[error("Native asset is not configured")]
    NativeAssetNotConfigured,

    #[error("Invalid native asset: {reason}")]
    InvalidNativeAsset { reason: String },
}
