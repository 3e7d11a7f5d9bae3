//! State definitions for the bridge ledger
//!
//! Escrow balances are owned by [`crate::ledger`].

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

use common::AssetInfo;

use crate::error::ContractError;
use crate::events::LegacyEventStyle;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Admin address for contract management
    pub admin: Addr,
    /// Messenger used to reach the other bridge
    pub messenger: Addr,
    /// Bridge on the other domain (opaque remote address)
    pub other_bridge: String,
    /// Bank denom bridged as native coin (the messenger's value denom)
    pub native_denom: String,
    /// Distinguished native asset and its counterpart, if bridged
    pub native_asset: Option<NativeAssetPair>,
    /// Additional legacy events emitted next to the bridge events
    pub legacy_events: Option<LegacyEventStyle>,
    /// Whether bridging is currently halted
    pub paused: bool,
}

/// The distinguished native asset of this domain and the token representing
/// it on the other domain.
#[cw_serde]
pub struct NativeAssetPair {
    pub local: AssetInfo,
    pub remote: String,
}

impl NativeAssetPair {
    /// The native asset travels through the ledger, never as message value.
    pub fn validate(&self, native_denom: &str) -> Result<(), ContractError> {
        if let AssetInfo::NativeToken { denom } = &self.local {
            if denom == native_denom {
                return Err(ContractError::InvalidNativeAsset {
                    reason: format!("{} is already bridged as native coin", denom),
                });
            }
        }
        if self.remote.is_empty() {
            return Err(ContractError::InvalidNativeAsset {
                reason: "remote token must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:relay-bridge";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");
