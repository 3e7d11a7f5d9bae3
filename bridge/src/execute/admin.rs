//! Admin operations handlers.

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{NativeAssetPair, CONFIG};

/// Pause the bridge (stops initiating and finalizing).
///
/// Finalizes relayed while paused are recorded as failed by the messenger and
/// can be relayed again after unpausing.
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "pause"))
}

/// Unpause the bridge.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("method", "unpause"))
}

/// Rewire the bridge after deployment.
pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    messenger: Option<String>,
    other_bridge: Option<String>,
    native_asset: Option<NativeAssetPair>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    if let Some(messenger) = messenger {
        config.messenger = deps.api.addr_validate(&messenger)?;
    }
    if let Some(other_bridge) = other_bridge {
        config.other_bridge = other_bridge;
    }
    if let Some(native_asset) = native_asset {
        native_asset.validate(&config.native_denom)?;
        config.native_asset = Some(native_asset);
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_config")
        .add_attribute("messenger", config.messenger)
        .add_attribute("other_bridge", config.other_bridge))
}
