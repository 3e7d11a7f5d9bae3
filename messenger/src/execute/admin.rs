//! Admin operations handlers.
//!
//! - Pause/unpause
//! - Gas policy and peer wiring

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{Config, GasPolicy, CONFIG};

fn load_as_admin(deps: &DepsMut, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

/// Pause the messenger (stops sends and relays).
pub fn execute_pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_as_admin(&deps, &info)?;
    config.paused = true;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "pause"))
}

/// Unpause the messenger.
pub fn execute_unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = load_as_admin(&deps, &info)?;
    config.paused = false;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "unpause"))
}

/// Replace the gas policy used for forwarding and quoting.
pub fn execute_update_gas_policy(
    deps: DepsMut,
    info: MessageInfo,
    gas_policy: GasPolicy,
) -> Result<Response, ContractError> {
    let mut config = load_as_admin(&deps, &info)?;
    gas_policy.validate()?;
    config.gas_policy = gas_policy;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_gas_policy")
        .add_attribute("reserved_gas", config.gas_policy.reserved_gas.to_string())
        .add_attribute(
            "margin",
            format!(
                "{}/{}",
                config.gas_policy.margin_numerator, config.gas_policy.margin_denominator
            ),
        ))
}

/// Point the messenger at a different transport or counterpart.
///
/// Counterparts on two domains cannot learn each other's address before
/// both are deployed, so at least one side is wired after instantiation.
pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    transport: Option<String>,
    other_messenger: Option<String>,
) -> Result<Response, ContractError> {
    let mut config = load_as_admin(&deps, &info)?;
    if let Some(transport) = transport {
        config.transport = deps.api.addr_validate(&transport)?;
    }
    if let Some(other_messenger) = other_messenger {
        config.other_messenger = other_messenger;
    }
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("transport", config.transport)
        .add_attribute("other_messenger", config.other_messenger))
}
