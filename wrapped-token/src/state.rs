use cw_storage_plus::Item;

use common::wrapped_token::BridgeInfoResponse;

pub const CONTRACT_NAME: &str = "crates.io:relay-wrapped-token";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bridge allowed to mint and burn, and the remote token it mirrors.
/// Balances and token info live in the `cw20-base` storage.
pub const BRIDGE_INFO: Item<BridgeInfoResponse> = Item::new("bridge_info");
