//! Message types for the bridge ledger

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use common::AssetInfo;

use crate::events::LegacyEventStyle;
use crate::probe::TokenRoute;
use crate::state::NativeAssetPair;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Admin address for contract management
    pub admin: String,
    /// Messenger of this domain
    pub messenger: String,
    /// Bridge on the other domain
    pub other_bridge: String,
    /// Bank denom bridged as native coin
    pub native_denom: String,
    /// Distinguished native asset, if bridged
    pub native_asset: Option<NativeAssetPair>,
    /// Legacy events to emit next to the bridge events
    pub legacy_events: Option<LegacyEventStyle>,
}

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
///
/// `to` is an address on the other domain and defaults to the caller.
#[cw_serde]
pub enum ExecuteMsg {
    /// Bridge the native coin attached as funds
    ///
    /// Authorization: Anyone
    BridgeNative {
        to: Option<String>,
        min_gas_limit: u64,
        #[serde(default)]
        extra_data: Binary,
    },

    /// Bridge a CW20 token: escrowed via `TransferFrom` (allowance required),
    /// or burned when `local_token` is a wrapped token
    ///
    /// Authorization: Anyone
    BridgeToken {
        local_token: String,
        remote_token: String,
        to: Option<String>,
        amount: Uint128,
        min_gas_limit: u64,
        #[serde(default)]
        extra_data: Binary,
    },

    /// Bridge the distinguished native asset (bank denom attached as funds,
    /// or CW20 handled like `BridgeToken`)
    ///
    /// Authorization: Anyone
    BridgeNativeAsset {
        to: Option<String>,
        amount: Uint128,
        min_gas_limit: u64,
        #[serde(default)]
        extra_data: Binary,
    },

    /// Complete a native coin transfer; the value arrives as funds
    ///
    /// Authorization: the other bridge, relayed through the messenger
    FinalizeBridgeNative {
        from: String,
        to: String,
        amount: Uint128,
        #[serde(default)]
        extra_data: Binary,
    },

    /// Complete a token transfer (`local_token` is on this domain)
    ///
    /// Authorization: the other bridge, relayed through the messenger
    FinalizeBridgeToken {
        local_token: String,
        remote_token: String,
        from: String,
        to: String,
        amount: Uint128,
        #[serde(default)]
        extra_data: Binary,
    },

    /// Complete a native asset transfer
    ///
    /// Authorization: the other bridge, relayed through the messenger
    FinalizeBridgeNativeAsset {
        from: String,
        to: String,
        amount: Uint128,
        #[serde(default)]
        extra_data: Binary,
    },

    /// Rewire the messenger, the counterpart bridge or the native asset
    ///
    /// Authorization: Admin only
    UpdateConfig {
        messenger: Option<String>,
        other_bridge: Option<String>,
        native_asset: Option<NativeAssetPair>,
    },

    /// Pause the bridge (initiate and finalize)
    ///
    /// Authorization: Admin only
    Pause {},

    /// Unpause the bridge
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

    /// Amount of `local_token` held in escrow against `remote_token`
    #[returns(DepositsResponse)]
    Deposits {
        local_token: String,
        remote_token: String,
    },

    /// How `token` would be bridged against `remote_token`
    #[returns(TokenRoute)]
    TokenRoute {
        token: AssetInfo,
        remote_token: String,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub messenger: Addr,
    pub other_bridge: String,
    pub native_denom: String,
    pub native_asset: Option<NativeAssetPair>,
    pub legacy_events: Option<LegacyEventStyle>,
    pub paused: bool,
}

#[cw_serde]
pub struct DepositsResponse {
    pub local_token: String,
    pub remote_token: String,
    pub amount: Uint128,
}
