//! State definitions for the cross-domain messenger
//!
//! Replay records and reentrancy locks are owned by [`crate::replay`]; this
//! module holds configuration, the outbound nonce counter and the
//! bookkeeping for relays whose nested call is still in flight.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Transport contract that delivers messages in both directions
    pub transport: Addr,
    /// Messenger on the other domain (opaque remote address)
    pub other_messenger: String,
    /// Bank denom carried as message value
    pub native_denom: String,
    /// Gas accounting for forwarded calls
    pub gas_policy: GasPolicy,
    /// Whether sending and relaying are currently halted
    pub paused: bool,
}

/// Gas accounting applied when forwarding a relayed call.
///
/// The ratio between the gas a message asks for and the gas that must be
/// forwarded is host specific, so it is configuration rather than a constant.
#[cw_serde]
pub struct GasPolicy {
    /// Gas kept back by the relay for its own bookkeeping after the call
    pub reserved_gas: u64,
    /// Safety margin applied to a message's minimum gas limit
    pub margin_numerator: u64,
    pub margin_denominator: u64,
    /// Transport cost per payload byte, used when quoting `base_gas`
    pub calldata_gas_per_byte: u64,
}

impl GasPolicy {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.margin_denominator == 0 {
            return Err(ContractError::InvalidGasPolicy {
                reason: "margin_denominator must be non-zero".to_string(),
            });
        }
        if self.margin_numerator < self.margin_denominator {
            return Err(ContractError::InvalidGasPolicy {
                reason: "margin must be at least 1 (numerator >= denominator)".to_string(),
            });
        }
        Ok(())
    }

    /// `min_gas_limit` scaled by the margin. The forwarded budget must exceed it.
    pub fn min_forward_gas(&self, min_gas_limit: u64) -> u64 {
        let scaled = u128::from(min_gas_limit) * u128::from(self.margin_numerator)
            / u128::from(self.margin_denominator);
        u64::try_from(scaled).unwrap_or(u64::MAX)
    }

    /// Whether `forwarded` gas is enough for a message asking for `min_gas_limit`.
    pub fn covers(&self, forwarded: u64, min_gas_limit: u64) -> bool {
        forwarded > self.min_forward_gas(min_gas_limit)
    }

    /// Gas the transport must provide on the other domain so that the relay
    /// passes its own gas floor check.
    pub fn base_gas(&self, message_len: usize, min_gas_limit: u64) -> u64 {
        let calldata = (message_len as u64).saturating_mul(self.calldata_gas_per_byte);
        self.reserved_gas
            .saturating_add(self.min_forward_gas(min_gas_limit))
            .saturating_add(1)
            .saturating_add(calldata)
    }
}

/// A relay whose nested call has been dispatched and awaits its reply.
#[cw_serde]
pub struct PendingRelay {
    /// Hash of the message being relayed
    pub hash: [u8; 32],
    /// Remote sender visible before this relay started, restored afterwards
    pub previous_sender: String,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:relay-messenger";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Counter half of the outbound nonce
pub const MESSAGE_NONCE: Item<u64> = Item::new("message_nonce");

/// Remote sender of the relay currently executing (sentinel when idle)
pub const XDOMAIN_SENDER: Item<String> = Item::new("xdomain_sender");

/// Next reply id handed to a dispatched relay call
pub const NEXT_REPLY_ID: Item<u64> = Item::new("next_reply_id");

/// Relays waiting for their reply
/// Key: reply id, Value: PendingRelay
pub const PENDING_RELAYS: Map<u64, PendingRelay> = Map::new("pending_relays");

/// Allocate the reply id for a relay call.
pub fn next_reply_id(storage: &mut dyn Storage) -> StdResult<u64> {
    let id = NEXT_REPLY_ID.may_load(storage)?.unwrap_or_default();
    NEXT_REPLY_ID.save(storage, &(id + 1))?;
    Ok(id)
}
