//! Outbound message handler.
//!
//! Sending never waits for the other domain: the outcome of a message is only
//! known once the counterpart messenger relays it.

use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response, WasmMsg,
};

use common::transport::TransportExecuteMsg;

use super::native_value;
use crate::error::ContractError;
use crate::msg::ExecuteMsg;
use crate::nonce::next_nonce;
use crate::state::CONFIG;

/// Package a call into a versioned message and hand it to the transport.
pub fn execute_send_message(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    target: String,
    message: Binary,
    min_gas_limit: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }

    let value = native_value(&info.funds, &config.native_denom)?;
    let nonce = next_nonce(deps.storage)?;
    let gas_limit = config.gas_policy.base_gas(message.len(), min_gas_limit);

    let relay = ExecuteMsg::RelayMessage {
        nonce,
        sender: info.sender.to_string(),
        target: target.clone(),
        value,
        min_gas_limit,
        message: message.clone(),
        gas_budget: gas_limit,
    };

    let deliver = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.transport.to_string(),
        msg: to_json_binary(&TransportExecuteMsg::Deliver {
            target: config.other_messenger.clone(),
            gas_limit,
            payload: to_json_binary(&relay)?,
        })?,
        funds: info.funds,
    });

    let sent = Event::new("sent_message")
        .add_attribute("target", &target)
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("message", message.to_base64())
        .add_attribute("message_nonce", nonce.to_string())
        .add_attribute("gas_limit", min_gas_limit.to_string());
    let sent_value = Event::new("sent_message_extension1")
        .add_attribute("sender", info.sender.as_str())
        .add_attribute("value", value.to_string());

    Ok(Response::new()
        .add_message(deliver)
        .add_event(sent)
        .add_event(sent_value)
        .add_attribute("action", "send_message")
        .add_attribute("message_nonce", nonce.to_string())
        .add_attribute("target", target)
        .add_attribute("base_gas", gas_limit.to_string()))
}
