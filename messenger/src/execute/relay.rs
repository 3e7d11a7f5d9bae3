//! Inbound relay handler.
//!
//! A relay walks `VersionChecked -> HashComputed -> LockAcquired ->
//! PreconditionsChecked -> Executing` inside `execute_relay_message` and
//! reaches `Succeeded` or `Failed` in `reply`, after the host has run the
//! nested call in its own storage branch. Any rejection before the call is
//! dispatched aborts the whole execution, so nothing (not even the lock)
//! is persisted.
//!
//! A nested call that errors is not an error of the relay: its effects are
//! discarded by the host, the message is marked `Failed` and can be relayed
//! again later with identical arguments.
//!
//! Status and lock are keyed on [`CrossDomainMessage::relay_hash`]. The
//! version 0 hash is only looked up in the table of pre-upgrade relay ids.

use cosmwasm_std::{
    coins, Addr, BankMsg, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Reply, Response,
    Storage, SubMsg, SubMsgResult, Uint128, WasmMsg,
};

use common::transport::{RemoteSenderResponse, TransportQueryMsg};

use super::native_value;
use crate::encoding::{bytes32_to_hex, CrossDomainMessage};
use crate::error::ContractError;
use crate::nonce::{advance_counter, checked_version};
use crate::replay::{self, RelayStatus};
use crate::state::{next_reply_id, Config, PendingRelay, CONFIG, PENDING_RELAYS, XDOMAIN_SENDER};

/// Relay a message delivered from the other domain.
pub fn execute_relay_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    message: CrossDomainMessage,
    gas_budget: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }

    let version = checked_version(message.nonce)?;
    if version == 0 {
        let legacy_id = message.hash()?;
        if replay::legacy_relayed(deps.storage, &legacy_id)? {
            return Err(ContractError::AlreadyRelayed {
                hash: bytes32_to_hex(&legacy_id),
            });
        }
    }

    let hash = message.relay_hash()?;
    let hash_hex = bytes32_to_hex(&hash);

    replay::acquire_lock(deps.storage, &hash)?;

    // Value precondition. The transport delivers the declared value on first
    // attempt; a retry (from anyone) relies on value the messenger already
    // holds from that first attempt.
    let supplied = native_value(&info.funds, &config.native_denom)?;
    let status = replay::status(deps.storage, &hash)?;
    if is_privileged_transport(deps.as_ref(), &config, &info.sender)? {
        if supplied != message.value && status != RelayStatus::Failed {
            return Err(ContractError::ValueMismatch {
                expected: message.value,
                got: supplied,
            });
        }
    } else if !supplied.is_zero() || status == RelayStatus::Unset {
        return Err(ContractError::ValueMismatch {
            expected: Uint128::zero(),
            got: supplied,
        });
    }

    if status == RelayStatus::Succeeded {
        return Err(ContractError::AlreadyRelayed { hash: hash_hex });
    }

    let target = deps.api.addr_validate(&message.target);
    if let Ok(target) = &target {
        if *target == env.contract.address || *target == config.transport {
            return Err(ContractError::UnsafeTarget {
                target: target.to_string(),
            });
        }
    }

    let forwarded_gas = gas_budget.saturating_sub(config.gas_policy.reserved_gas);
    if !config
        .gas_policy
        .covers(forwarded_gas, message.min_gas_limit)
    {
        return Err(ContractError::InsufficientRelayGas {
            required: config.gas_policy.min_forward_gas(message.min_gas_limit),
            available: forwarded_gas,
        });
    }

    let pending = PendingRelay {
        hash,
        previous_sender: XDOMAIN_SENDER.load(deps.storage)?,
    };
    XDOMAIN_SENDER.save(deps.storage, &message.sender)?;

    let response = Response::new()
        .add_attribute("action", "relay_message")
        .add_attribute("msg_hash", &hash_hex)
        .add_attribute("version", version.to_string())
        .add_attribute("target", &message.target);

    // A target this domain cannot address is recorded as a failed attempt.
    let target = match target {
        Ok(target) => target,
        Err(err) => {
            let outcome = finish_relay(deps.storage, &pending, Err(err.to_string()))?;
            return Ok(response.add_event(outcome));
        }
    };

    let Some(call) = nested_call(&config, &target, &message) else {
        // Nothing to execute: the message succeeds without a sub-call.
        let outcome = finish_relay(deps.storage, &pending, Ok(()))?;
        return Ok(response.add_event(outcome));
    };

    let reply_id = next_reply_id(deps.storage)?;
    PENDING_RELAYS.save(deps.storage, reply_id, &pending)?;

    Ok(response
        .add_submessage(SubMsg::reply_always(call, reply_id).with_gas_limit(forwarded_gas))
        .add_attribute("forwarded_gas", forwarded_gas.to_string()))
}

/// Record the outcome of a nested relay call.
pub fn reply_relay_message(
    deps: DepsMut,
    _env: Env,
    msg: Reply,
) -> Result<Response, ContractError> {
    let pending = PENDING_RELAYS
        .may_load(deps.storage, msg.id)?
        .ok_or(ContractError::UnknownReply { id: msg.id })?;
    PENDING_RELAYS.remove(deps.storage, msg.id);

    let outcome = match msg.result {
        SubMsgResult::Ok(_) => Ok(()),
        SubMsgResult::Err(reason) => Err(reason),
    };
    let event = finish_relay(deps.storage, &pending, outcome)?;

    Ok(Response::new()
        .add_event(event)
        .add_attribute("action", "relay_message_reply"))
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Whether `caller` is the transport acting for the other messenger.
fn is_privileged_transport(
    deps: Deps,
    config: &Config,
    caller: &Addr,
) -> Result<bool, ContractError> {
    if *caller != config.transport {
        return Ok(false);
    }
    let response: RemoteSenderResponse = deps
        .querier
        .query_wasm_smart(&config.transport, &TransportQueryMsg::RemoteSender {})?;
    Ok(response.remote_sender.as_deref() == Some(config.other_messenger.as_str()))
}

/// Call carrying the message to its target, or `None` when there is nothing
/// to execute or transfer.
fn nested_call(
    config: &Config,
    target: &Addr,
    message: &CrossDomainMessage,
) -> Option<CosmosMsg> {
    let funds = if message.value.is_zero() {
        vec![]
    } else {
        coins(message.value.u128(), &config.native_denom)
    };

    if message.message.is_empty() {
        if funds.is_empty() {
            return None;
        }
        return Some(CosmosMsg::Bank(BankMsg::Send {
            to_address: target.to_string(),
            amount: funds,
        }));
    }

    Some(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: target.to_string(),
        msg: message.message.clone(),
        funds,
    }))
}

/// Bookkeeping shared by every terminal state: restore the remote sender,
/// record the outcome, release the lock and advance the nonce counter.
fn finish_relay(
    storage: &mut dyn Storage,
    pending: &PendingRelay,
    outcome: Result<(), String>,
) -> Result<Event, ContractError> {
    XDOMAIN_SENDER.save(storage, &pending.previous_sender)?;

    let hash_hex = bytes32_to_hex(&pending.hash);
    let event = match outcome {
        Ok(()) => {
            replay::mark_succeeded(storage, &pending.hash)?;
            Event::new("relayed_message").add_attribute("msg_hash", hash_hex)
        }
        Err(reason) => {
            replay::mark_failed(storage, &pending.hash)?;
            Event::new("failed_relayed_message")
                .add_attribute("msg_hash", hash_hex)
                .add_attribute("reason", reason)
        }
    };

    replay::release_lock(storage, &pending.hash);
    advance_counter(storage)?;

    Ok(event)
}
