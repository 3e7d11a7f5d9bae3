//! Cross-Domain Messenger - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers and the relay reply
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use common::messenger::DEFAULT_XDOMAIN_SENDER;

use crate::encoding::CrossDomainMessage;
use crate::error::ContractError;
use crate::execute::{
    execute_pause, execute_relay_message, execute_send_message, execute_unpause,
    execute_update_config, execute_update_gas_policy, reply_relay_message,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_base_gas, query_config, query_hash_message, query_legacy_relayed, query_message_nonce,
    query_message_status, query_xdomain_message_sender,
};
use crate::replay::record_legacy_relayed;
use crate::state::{
    Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, MESSAGE_NONCE, NEXT_REPLY_ID, XDOMAIN_SENDER,
};

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
    let transport = deps.api.addr_validate(&msg.transport)?;
    msg.gas_policy.validate()?;

    if msg.native_denom.is_empty() {
        return Err(ContractError::InvalidFunds {
            reason: "native_denom must not be empty".to_string(),
        });
    }

    let config = Config {
        admin,
        transport,
        other_messenger: msg.other_messenger,
        native_denom: msg.native_denom,
        gas_policy: msg.gas_policy,
        paused: false,
    };
    CONFIG.save(deps.storage, &config)?;

    MESSAGE_NONCE.save(deps.storage, &0u64)?;
    NEXT_REPLY_ID.save(deps.storage, &0u64)?;
    XDOMAIN_SENDER.save(deps.storage, &DEFAULT_XDOMAIN_SENDER.to_string())?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("transport", config.transport)
        .add_attribute("other_messenger", config.other_messenger))
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
        ExecuteMsg::SendMessage {
            target,
            message,
            min_gas_limit,
        } => execute_send_message(deps, env, info, target, message, min_gas_limit),
        ExecuteMsg::RelayMessage {
            nonce,
            sender,
            target,
            value,
            min_gas_limit,
            message,
            gas_budget,
        } => {
            let message = CrossDomainMessage {
                nonce,
                sender,
                target,
                value,
                min_gas_limit,
                message,
            };
            execute_relay_message(deps, env, info, message, gas_budget)
        }
        ExecuteMsg::UpdateGasPolicy { gas_policy } => {
            execute_update_gas_policy(deps, info, gas_policy)
        }
        ExecuteMsg::UpdateConfig {
            transport,
            other_messenger,
        } => execute_update_config(deps, info, transport, other_messenger),
        ExecuteMsg::Pause {} => execute_pause(deps, info),
        ExecuteMsg::Unpause {} => execute_unpause(deps, info),
    }
}

// ============================================================================
// Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    reply_relay_message(deps, env, msg)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::MessageNonce {} => to_json_binary(&query_message_nonce(deps)?),
        QueryMsg::MessageStatus { hash } => to_json_binary(&query_message_status(deps, hash)?),
        QueryMsg::XDomainMessageSender {} => {
            to_json_binary(&query_xdomain_message_sender(deps)?)
        }
        QueryMsg::BaseGas {
            message,
            min_gas_limit,
        } => to_json_binary(&query_base_gas(deps, message, min_gas_limit)?),
        QueryMsg::HashMessage {
            nonce,
            sender,
            target,
            value,
            min_gas_limit,
            message,
        } => to_json_binary(&query_hash_message(
            nonce,
            sender,
            target,
            value,
            min_gas_limit,
            message,
        )?),
        QueryMsg::LegacyRelayed { hash } => to_json_binary(&query_legacy_relayed(deps, hash)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    for hash in &msg.legacy_relayed {
        let hash: [u8; 32] = hash
            .to_vec()
            .try_into()
            .map_err(|_| ContractError::InvalidHashLength { got: hash.len() })?;
        record_legacy_relayed(deps.storage, &hash)?;
    }

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("legacy_relayed", msg.legacy_relayed.len().to_string()))
}
