//! Bridge Ledger Contract
//!
//! Moves native coin, CW20 tokens and one distinguished native asset between
//! two domains on top of the cross-domain messenger.
//!
//! # Outgoing Flow
//! 1. A user calls `BridgeNative`, `BridgeToken` or `BridgeNativeAsset`
//! 2. The asset is escrowed (recorded in the ledger) or, for wrapped tokens,
//!    burned; native coin travels as the message value instead
//! 3. A `FinalizeBridge*` message is sent to the other bridge
//!
//! # Incoming Flow
//! 1. The messenger relays `FinalizeBridge*` from the other bridge
//! 2. Wrapped tokens are minted; escrowed assets are released from the ledger
//! 3. A finalize that cannot complete leaves the relay `Failed` for a retry
//!
//! # Security
//! - Finalize only from the other bridge as reported by the messenger
//! - Recipients may not be the bridge or the messenger
//! - Escrow can only be released up to what was escrowed for the same pair
//! - Wrapped tokens must declare the expected remote token

pub mod contract;
pub mod error;
pub mod events;
mod execute;
pub mod ledger;
pub mod msg;
pub mod probe;
mod query;
pub mod state;

pub use crate::error::ContractError;
