//! Bridge Ledger - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers (initiate, finalize, admin)
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_bridge_native, execute_bridge_native_asset, execute_bridge_token,
    execute_finalize_bridge_native, execute_finalize_bridge_native_asset,
    execute_finalize_bridge_token, execute_pause, execute_unpause, execute_update_config,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{query_config, query_deposits, query_token_route};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let messenger = deps.api.addr_validate(&msg.messenger)?;
    if let Some(native_asset) = &msg.native_asset {
        native_asset.validate(&msg.native_denom)?;
    }

    let config = Config {
        admin,
        messenger,
        other_bridge: msg.other_bridge,
        native_denom: msg.native_denom,
        native_asset: msg.native_asset,
        legacy_events: msg.legacy_events,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("messenger", config.messenger)
        .add_attribute("other_bridge", config.other_bridge))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Outgoing
        ExecuteMsg::BridgeNative {
            to,
            min_gas_limit,
            extra_data,
        } => execute_bridge_native(deps, info, to, min_gas_limit, extra_data),
        ExecuteMsg::BridgeToken {
            local_token,
            remote_token,
            to,
            amount,
            min_gas_limit,
            extra_data,
        } => execute_bridge_token(
            deps,
            env,
            info,
            local_token,
            remote_token,
            to,
            amount,
            min_gas_limit,
            extra_data,
        ),
        ExecuteMsg::BridgeNativeAsset {
            to,
            amount,
            min_gas_limit,
            extra_data,
        } => execute_bridge_native_asset(deps, env, info, to, amount, min_gas_limit, extra_data),

        // Incoming
        ExecuteMsg::FinalizeBridgeNative {
            from,
            to,
            amount,
            extra_data,
        } => execute_finalize_bridge_native(deps, env, info, from, to, amount, extra_data),
        ExecuteMsg::FinalizeBridgeToken {
            local_token,
            remote_token,
            from,
            to,
            amount,
            extra_data,
        } => execute_finalize_bridge_token(
            deps,
            env,
            info,
            local_token,
            remote_token,
            from,
            to,
            amount,
            extra_data,
        ),
        ExecuteMsg::FinalizeBridgeNativeAsset {
            from,
            to,
            amount,
            extra_data,
        } => execute_finalize_bridge_native_asset(deps, env, info, from, to, amount, extra_data),

        // Admin
        ExecuteMsg::UpdateConfig {
            messenger,
            other_bridge,
            native_asset,
        } => execute_update_config(deps, info, messenger, other_bridge, native_asset),
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Deposits {
            local_token,
            remote_token,
        } => to_json_binary(&query_deposits(deps, local_token, remote_token)?),
        QueryMsg::TokenRoute {
            token,
            remote_token,
        } => to_json_binary(&query_token_route(deps, token, remote_token)),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
