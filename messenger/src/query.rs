//! Query handlers for the cross-domain messenger.

use cosmwasm_std::{Binary, Deps, StdError, StdResult, Uint128, Uint256};

use common::messenger::{XDomainMessageSenderResponse, DEFAULT_XDOMAIN_SENDER};

use crate::encoding::CrossDomainMessage;
use crate::msg::{
    BaseGasResponse, ConfigResponse, HashMessageResponse, LegacyRelayedResponse,
    MessageNonceResponse, MessageStatusResponse,
};
use crate::nonce::{current_nonce, decode_versioned_nonce};
use crate::replay;
use crate::state::{CONFIG, XDOMAIN_SENDER};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        transport: config.transport,
        other_messenger: config.other_messenger,
        native_denom: config.native_denom,
        gas_policy: config.gas_policy,
        paused: config.paused,
    })
}

pub fn query_message_nonce(deps: Deps) -> StdResult<MessageNonceResponse> {
    let nonce = current_nonce(deps.storage)?;
    let (version, _) = decode_versioned_nonce(nonce);
    Ok(MessageNonceResponse { nonce, version })
}

pub fn query_message_status(deps: Deps, hash: Binary) -> StdResult<MessageStatusResponse> {
    let hash = parse_hash(&hash)?;
    Ok(MessageStatusResponse {
        status: replay::status(deps.storage, &hash)?,
        locked: replay::is_locked(deps.storage, &hash)?,
    })
}

/// Remote sender of the relay in progress.
///
/// Targets call this while they execute; outside of a relay it errors so a
/// stale or default sender is never mistaken for an authenticated one.
pub fn query_xdomain_message_sender(deps: Deps) -> StdResult<XDomainMessageSenderResponse> {
    let sender = XDOMAIN_SENDER.load(deps.storage)?;
    if sender == DEFAULT_XDOMAIN_SENDER {
        return Err(StdError::generic_err("xDomainMessageSender is not set"));
    }
    Ok(XDomainMessageSenderResponse { sender })
}

pub fn query_base_gas(
    deps: Deps,
    message: Binary,
    min_gas_limit: u64,
) -> StdResult<BaseGasResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(BaseGasResponse {
        gas: config.gas_policy.base_gas(message.len(), min_gas_limit),
    })
}

pub fn query_hash_message(
    nonce: Uint256,
    sender: String,
    target: String,
    value: Uint128,
    min_gas_limit: u64,
    message: Binary,
) -> StdResult<HashMessageResponse> {
    let message = CrossDomainMessage {
        nonce,
        sender,
        target,
        value,
        min_gas_limit,
        message,
    };
    let hash = message
        .hash()
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    let relay_hash = message
        .relay_hash()
        .map_err(|err| StdError::generic_err(err.to_string()))?;
    Ok(HashMessageResponse {
        version: decode_versioned_nonce(nonce).0,
        hash: Binary::from(hash.to_vec()),
        relay_hash: Binary::from(relay_hash.to_vec()),
    })
}

pub fn query_legacy_relayed(deps: Deps, hash: Binary) -> StdResult<LegacyRelayedResponse> {
    let hash = parse_hash(&hash)?;
    Ok(LegacyRelayedResponse {
        relayed: replay::legacy_relayed(deps.storage, &hash)?,
    })
}

fn parse_hash(hash: &Binary) -> StdResult<[u8; 32]> {
    hash.to_vec().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "Invalid hash length: expected 32 bytes, got {}",
            hash.len()
        ))
    })
}
