//! Message types for the cross-domain messenger

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128, Uint256};

use crate::replay::RelayStatus;
use crate::state::GasPolicy;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// Transport contract carrying messages in both directions
    pub transport: String,
    /// Messenger on the other domain
    pub other_messenger: String,
    /// Bank denom carried as message value
    pub native_denom: String,
    /// Gas accounting for forwarded calls
    pub gas_policy: GasPolicy,
}

/// Migrate message
#[cw_serde]
#[derive(Default)]
pub struct MigrateMsg {
    /// Version 0 relay ids that already executed before the upgrade
    #[serde(default)]
    pub legacy_relayed: Vec<Binary>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    /// Send a message to `target` on the other domain
    ///
    /// Authorization: Anyone
    ///
    /// Native funds attached become the message value.
    SendMessage {
        target: String,
        message: Binary,
        min_gas_limit: u64,
    },

    /// Relay a message sent by the other domain's messenger
    ///
    /// Authorization: the transport carrying a delivery from the other
    /// messenger, or anyone retrying a message that was already attempted
    /// (with no funds attached)
    RelayMessage {
        nonce: Uint256,
        sender: String,
        target: String,
        value: Uint128,
        min_gas_limit: u64,
        message: Binary,
        /// Gas available to this relay; everything above the reserve is
        /// forwarded to the target
        gas_budget: u64,
    },

    /// Replace the gas policy
    ///
    /// Authorization: Admin only
    UpdateGasPolicy { gas_policy: GasPolicy },

    /// Rewire the transport or the counterpart messenger
    ///
    /// Authorization: Admin only
    UpdateConfig {
        transport: Option<String>,
        other_messenger: Option<String>,
    },

    /// Halt sending and relaying
    ///
    /// Authorization: Admin only
    Pause {},

    /// Resume sending and relaying
    ///
    /// Authorization: Admin only
    Unpause {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    /// Nonce the next outbound message will carry
    #[returns(MessageNonceResponse)]
    MessageNonce {},

    /// Replay status and lock state of a relay hash
    #[returns(MessageStatusResponse)]
    MessageStatus { hash: Binary },

    /// Remote sender of the relay in progress (errors when idle)
    #[returns(common::messenger::XDomainMessageSenderResponse)]
    XDomainMessageSender {},

    /// Gas the transport needs to deliver a message
    #[returns(BaseGasResponse)]
    BaseGas { message: Binary, min_gas_limit: u64 },

    /// Hash a message the way the relay does
    #[returns(HashMessageResponse)]
    HashMessage {
        nonce: Uint256,
        sender: String,
        target: String,
        value: Uint128,
        min_gas_limit: u64,
        message: Binary,
    },

    /// Whether a pre-upgrade relay id was imported as executed
    #[returns(LegacyRelayedResponse)]
    LegacyRelayed { hash: Binary },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub transport: Addr,
    pub other_messenger: String,
    pub native_denom: String,
    pub gas_policy: GasPolicy,
    pub paused: bool,
}

#[cw_serde]
pub struct MessageNonceResponse {
    pub nonce: Uint256,
    pub version: u16,
}

#[cw_serde]
pub struct MessageStatusResponse {
    pub status: RelayStatus,
    pub locked: bool,
}

#[cw_serde]
pub struct BaseGasResponse {
    pub gas: u64,
}

#[cw_serde]
pub struct HashMessageResponse {
    pub version: u16,
    /// Version-specific hash (the legacy relay id for version 0)
    pub hash: Binary,
    /// Key used by `MessageStatus`
    pub relay_hash: Binary,
}

#[cw_serde]
pub struct LegacyRelayedResponse {
    pub relayed: bool,
}
