//! Incoming transfer handlers.
//!
//! These run as the nested call of a relay on the messenger. An error here
//! discards the finalize and leaves the relay recorded as `Failed`, so the
//! same finalize can be relayed again once whatever blocked it is resolved.

use cosmwasm_std::{Addr, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo, Response, Uint128};

use common::messenger::{MessengerQueryMsg, XDomainMessageSenderResponse};
use common::AssetInfo;

use super::{attached, ensure_no_funds, give_asset};
use crate::error::ContractError;
use crate::events::{self, AssetClass, BridgeTransfer};
use crate::state::{Config, CONFIG};

/// Validate `to` and check that the call is the other bridge speaking through
/// the messenger.
fn authorize_finalize(
    deps: Deps,
    env: &Env,
    info: &MessageInfo,
    config: &Config,
    to: &str,
) -> Result<Addr, ContractError> {
    let to = deps.api.addr_validate(to)?;
    if to == env.contract.address || to == config.messenger {
        return Err(ContractError::UnsafeTarget {
            target: to.to_string(),
        });
    }

    if config.paused {
        return Err(ContractError::BridgePaused);
    }

    if info.sender != config.messenger {
        return Err(ContractError::NotOtherBridge);
    }
    let remote: XDomainMessageSenderResponse = deps
        .querier
        .query_wasm_smart(&config.messenger, &MessengerQueryMsg::XDomainMessageSender {})
        .map_err(|_| ContractError::NotOtherBridge)?;
    if remote.sender != config.other_bridge {
        return Err(ContractError::NotOtherBridge);
    }

    Ok(to)
}

/// Pay out native coin delivered as the message value.
pub fn execute_finalize_bridge_native(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    from: String,
    to: String,
    amount: Uint128,
    extra_data: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let recipient = authorize_finalize(deps.as_ref(), &env, &info, &config, &to)?;

    let received = attached(&info.funds, &config.native_denom)?;
    if received != amount {
        return Err(ContractError::ValueMismatch {
            expected: amount,
            got: received,
        });
    }

    let mut response = Response::new();
    if !amount.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: recipient.to_string(),
            amount: info.funds,
        });
    }

    let transfer = BridgeTransfer {
        local_token: None,
        remote_token: None,
        from: &from,
        to: &to,
        amount,
        extra_data: &extra_data,
    };

    Ok(response
        .add_events(events::finalized(
            AssetClass::Native,
            config.legacy_events,
            &transfer,
        ))
        .add_attribute("method", "finalize_bridge_native")
        .add_attribute("to", recipient)
        .add_attribute("amount", amount))
}

/// Mint or release a token on this domain.
#[allow(clippy::too_many_arguments)]
pub fn execute_finalize_bridge_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    local_token: String,
    remote_token: String,
    from: String,
    to: String,
    amount: Uint128,
    extra_data: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let recipient = authorize_finalize(deps.as_ref(), &env, &info, &config, &to)?;
    ensure_no_funds(&info.funds)?;

    let local = AssetInfo::Token {
        contract_addr: deps.api.addr_validate(&local_token)?.to_string(),
    };
    let payout = give_asset(
        deps.storage,
        &deps.querier,
        &local,
        &remote_token,
        &recipient,
        amount,
    )?;

    let transfer = BridgeTransfer {
        local_token: Some(&local_token),
        remote_token: Some(&remote_token),
        from: &from,
        to: &to,
        amount,
        extra_data: &extra_data,
    };

    Ok(Response::new()
        .add_message(payout)
        .add_events(events::finalized(
            AssetClass::Token,
            config.legacy_events,
            &transfer,
        ))
        .add_attribute("method", "finalize_bridge_token")
        .add_attribute("local_token", &local_token)
        .add_attribute("to", recipient)
        .add_attribute("amount", amount))
}

/// Mint or release the distinguished native asset.
pub fn execute_finalize_bridge_native_asset(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    from: String,
    to: String,
    amount: Uint128,
    extra_data: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let recipient = authorize_finalize(deps.as_ref(), &env, &info, &config, &to)?;
    ensure_no_funds(&info.funds)?;
    let pair = config
        .native_asset
        .clone()
        .ok_or(ContractError::NativeAssetNotConfigured)?;

    let payout = give_asset(
        deps.storage,
        &deps.querier,
        &pair.local,
        &pair.remote,
        &recipient,
        amount,
    )?;

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
        .add_message(payout)
        .add_events(events::finalized(
            AssetClass::NativeAsset,
            config.legacy_events,
            &transfer,
        ))
        .add_attribute("method", "finalize_bridge_native_asset")
        .add_attribute("asset", local_token)
        .add_attribute("to", recipient)
        .add_attribute("amount", amount))
}
