//! Outgoing transfer handlers.
//!
//! Each handler takes the asset from the caller (escrow or burn), emits the
//! initiated events and sends the matching `FinalizeBridge*` to the other
//! bridge through the messenger. Token addresses in the finalize message are
//! swapped so they read from the receiving side.

use cosmwasm_std::{coins, Binary, DepsMut, Env, MessageInfo, Response, Uint128};

use common::AssetInfo;

use super::{attached, send_to_other_bridge, take_asset};
use crate::error::ContractError;
use crate::events::{self, AssetClass, BridgeTransfer};
use crate::msg::ExecuteMsg;
use crate::state::{Config, CONFIG};

fn load_active(deps: &DepsMut) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::BridgePaused);
    }
    Ok(config)
}

fn ensure_non_zero(amount: Uint128) -> Result<(), ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {
            reason: "amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Bridge the native coin attached to the call.
pub fn execute_bridge_native(
    deps: DepsMut,
    info: MessageInfo,
    to: Option<String>,
    min_gas_limit: u64,
    extra_data: Binary,
) -> Result<Response, ContractError> {
    let config = load_active(&deps)?;
    let amount = attached(&info.funds, &config.native_denom)?;
    ensure_non_zero(amount)?;

    let from = info.sender.to_string();
    let to = to.unwrap_or_else(|| from.clone());

    let finalize = ExecuteMsg::FinalizeBridgeNative {
        from: from.clone(),
        to: to.clone(),
        amount,
        extra_data: extra_data.clone(),
    };
    let dispatch = send_to_other_bridge(
        &config,
        &finalize,
        min_gas_limit,
        coins(amount.u128(), &config.native_denom),
    )?;

    let transfer = BridgeTransfer {
        local_token: None,
        remote_token: None,
        from: &from,
        to: &to,
        amount,
        extra_data: &extra_data,
    };

    Ok(Response::new()
        .add_message(dispatch)
        .add_events(events::initiated(
            AssetClass::Native,
            config.legacy_events,
            &transfer,
        ))
        .add_attribute("method", "bridge_native")
        .add_attribute("from", &from)
        .add_attribute("to", &to)
        .add_attribute("amount", amount))
}

/// Bridge a CW20 token, escrowing or burning it.
#[allow(clippy::too_many_arguments)]
pub fn execute_bridge_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    local_token: String,
    remote_token: String,
    to: Option<String>,
    amount: Uint128,
    min_gas_limit: u64,
    extra_data: Binary,
) -> Result<Response, ContractError> {
    let config = load_active(&deps)?;
    ensure_non_zero(amount)?;

    let local_token = deps.api.addr_validate(&local_token)?.to_string();
    let local = AssetInfo::Token {
        contract_addr: local_token.clone(),
    };
    let take = take_asset(
        deps.storage,
        &deps.querier,
        &env.contract.address,
        &info.sender,
        &info.funds,
        &local,
        &remote_token,
        amount,
    )?;

    let from = info.sender.to_string();
    let to = to.unwrap_or_else(|| from.clone());

    let finalize = ExecuteMsg::FinalizeBridgeToken {
        local_token: remote_token.clone(),
        remote_token: local_token.clone(),
        from: from.clone(),
        to: to.clone(),
        amount,
        extra_data: extra_data.clone(),
    };
    let dispatch = send_to_other_bridge(&config, &finalize, min_gas_limit, vec![])?;

    let transfer = BridgeTransfer {
        local_token: Some(&local_token),
        remote_token: Some(&remote_token),
        from: &from,
        to: &to,
        amount,
        extra_data: &extra_data,
    };

    Ok(Response::new()
        .add_messages(take)
        .add_message(dispatch)
        .add_events(events::initiated(
            AssetClass::Token,
            config.legacy_events,
            &transfer,
        ))
        .add_attribute("method", "bridge_token")
        .add_attribute("local_token", &local_token)
        .add_attribute("remote_token", &remote_token)
        .add_attribute("amount", amount))
}

/// Bridge the distinguished native asset.
pub fn execute_bridge_native_asset(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to: Option<String>,
    amount: Uint128,
    min_gas_limit: u64,
    extra_data: Binary,
) -> Result<Response, ContractError> {
    let config = load_active(&deps)?;
    let pair = config
        .native_asset
        .clone()
        .ok_or(ContractError::NativeAssetNotConfigured)?;
    ensure_non_zero(amount)?;

    let take = take_asset(
        deps.storage,
        &deps.querier,
        &env.contract.address,
        &info.sender,
        &info.funds,
        &pair.local,
        &pair.remote,
        amount,
    )?;

    let from = info.sender.to_string();
    let to = to.unwrap_or_else(|| from.clone());

    let finalize = ExecuteMsg::FinalizeBridgeNativeAsset {
        from: from.clone(),
        to: to.clone(),
        amount,
        extra_data: extra_data.clone(),
    };
    let dispatch = send_to_other_bridge(&config, &finalize, min_gas_limit, vec![])?;

    let local_token = pair.local.to_string();
    let transfer = BridgeTransfer {
        local_token: Some(&local_token),
        remote_token: Some(&pair.remote),
        from: &from,
        to: &to,
        amount,
        extra_data: &extra_data,
    };

    Ok(Response::new()
        .add_messages(take)
        .add_message(dispatch)
        .add_events(events::initiated(
            AssetClass::NativeAsset,
            config.legacy_events,
            &transfer,
        ))
        .add_attribute("method", "bridge_native_asset")
        .add_attribute("asset", local_token)
        .add_attribute("amount", amount))
}
