use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult, Uint128,
};
use cw2::set_contract_version;
use cw20::{Cw20ExecuteMsg, MinterResponse};
use cw20_base::msg::QueryMsg as BaseQueryMsg;
use cw20_base::state::{BALANCES, TOKEN_INFO};

use common::wrapped_token::BridgeInfoResponse;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{BRIDGE_INFO, CONTRACT_NAME, CONTRACT_VERSION};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let bridge = deps.api.addr_validate(&msg.bridge)?;

    cw20_base::contract::instantiate(
        deps.branch(),
        env,
        info,
        cw20_base::msg::InstantiateMsg {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals,
            initial_balances: msg.initial_balances,
            mint: Some(MinterResponse {
                minter: bridge.to_string(),
                cap: None,
            }),
            marketing: None,
        },
    )?;
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    BRIDGE_INFO.save(
        deps.storage,
        &BridgeInfoResponse {
            remote_token: msg.remote_token.clone(),
            bridge: bridge.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("bridge", bridge)
        .add_attribute("remote_token", msg.remote_token))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let base = match msg {
        ExecuteMsg::BridgeMint { recipient, amount } => {
            return execute_bridge_mint(deps, env, info, recipient, amount)
        }
        ExecuteMsg::BridgeBurn { owner, amount } => {
            return execute_bridge_burn(deps, info, owner, amount)
        }
        ExecuteMsg::Transfer { recipient, amount } => {
            Cw20ExecuteMsg::Transfer { recipient, amount }
        }
        ExecuteMsg::Burn { amount } => Cw20ExecuteMsg::Burn { amount },
        ExecuteMsg::Send {
            contract,
            amount,
            msg,
        } => Cw20ExecuteMsg::Send {
            contract,
            amount,
            msg,
        },
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        } => Cw20ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        },
        ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            expires,
        } => Cw20ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            expires,
        },
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => Cw20ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        },
        ExecuteMsg::SendFrom {
            owner,
            contract,
            amount,
            msg,
        } => Cw20ExecuteMsg::SendFrom {
            owner,
            contract,
            amount,
            msg,
        },
        ExecuteMsg::BurnFrom { owner, amount } => Cw20ExecuteMsg::BurnFrom { owner, amount },
    };

    Ok(cw20_base::contract::execute(deps, env, info, base)?)
}

fn ensure_bridge(deps: &DepsMut, info: &MessageInfo) -> Result<(), ContractError> {
    let bridge_info = BRIDGE_INFO.load(deps.storage)?;
    if info.sender != bridge_info.bridge {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn execute_bridge_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_bridge(&deps, &info)?;
    let res = cw20_base::contract::execute_mint(deps, env, info, recipient, amount)?;
    Ok(res.add_attribute("bridge_action", "bridge_mint"))
}

/// Burn from any holder. The bridge only does this for the caller of its own
/// bridge entry point, so no allowance is required.
fn execute_bridge_burn(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_bridge(&deps, &info)?;
    if amount.is_zero() {
        return Err(cw20_base::ContractError::InvalidZeroAmount {}.into());
    }

    let owner_addr = deps.api.addr_validate(&owner)?;
    BALANCES.update(deps.storage, &owner_addr, |balance| -> StdResult<_> {
        Ok(balance.unwrap_or_default().checked_sub(amount)?)
    })?;
    TOKEN_INFO.update(deps.storage, |mut token_info| -> StdResult<_> {
        token_info.total_supply = token_info
            .total_supply
            .checked_sub(amount)
            .map_err(StdError::from)?;
        Ok(token_info)
    })?;

    Ok(Response::new()
        .add_attribute("action", "bridge_burn")
        .add_attribute("from", owner)
        .add_attribute("amount", amount))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    let base = match msg {
        QueryMsg::BridgeInfo {} => return to_json_binary(&BRIDGE_INFO.load(deps.storage)?),
        QueryMsg::Balance { address } => BaseQueryMsg::Balance { address },
        QueryMsg::TokenInfo {} => BaseQueryMsg::TokenInfo {},
        QueryMsg::Minter {} => BaseQueryMsg::Minter {},
        QueryMsg::Allowance { owner, spender } => BaseQueryMsg::Allowance { owner, spender },
        QueryMsg::AllAccounts { start_after, limit } => {
            BaseQueryMsg::AllAccounts { start_after, limit }
        }
    };
    cw20_base::contract::query(deps, env, base)
}
