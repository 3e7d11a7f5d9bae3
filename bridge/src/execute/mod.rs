//! Execute handlers for the bridge ledger.
//!
//! - `initiate` - `Bridge*` entry points on the sending side
//! - `finalize` - `FinalizeBridge*` entry points reached through the messenger
//! - `admin` - pause, unpause and config updates
//!
//! The helpers below move assets in and out of the bridge along the route the
//! token probe picked for the call.

mod admin;
mod finalize;
mod initiate;

pub use admin::*;
pub use finalize::*;
pub use initiate::*;

use cosmwasm_std::{
    to_json_binary, Addr, Coin, CosmosMsg, QuerierWrapper, StdError, Storage, Uint128, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use common::messenger::MessengerExecuteMsg;
use common::wrapped_token::WrappedTokenExecuteMsg;
use common::AssetInfo;

use crate::error::ContractError;
use crate::ledger;
use crate::msg::ExecuteMsg;
use crate::probe::TokenRoute;
use crate::state::Config;

/// Amount of `denom` attached to a call; any other denom is refused.
pub(crate) fn attached(funds: &[Coin], denom: &str) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for coin in funds {
        if coin.denom != denom {
            return Err(ContractError::AssetTransferFailed {
                reason: format!("expected {}, got {}", denom, coin.denom),
            });
        }
        total = total.checked_add(coin.amount).map_err(StdError::from)?;
    }
    Ok(total)
}

pub(crate) fn ensure_no_funds(funds: &[Coin]) -> Result<(), ContractError> {
    if !funds.is_empty() {
        return Err(ContractError::AssetTransferFailed {
            reason: "no funds may be attached".to_string(),
        });
    }
    Ok(())
}

/// Message sending `finalize` to the other bridge with `value` attached.
pub(crate) fn send_to_other_bridge(
    config: &Config,
    finalize: &ExecuteMsg,
    min_gas_limit: u64,
    value: Vec<Coin>,
) -> Result<CosmosMsg, ContractError> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.messenger.to_string(),
        msg: to_json_binary(&MessengerExecuteMsg::SendMessage {
            target: config.other_bridge.clone(),
            message: to_json_binary(finalize)?,
            min_gas_limit,
        })?,
        funds: value,
    }))
}

/// Take `amount` of `local` from `owner`: burn it if it is a wrapped token,
/// otherwise move it into escrow. Bank assets must already be attached.
#[allow(clippy::too_many_arguments)]
pub(crate) fn take_asset(
    storage: &mut dyn Storage,
    querier: &QuerierWrapper,
    bridge: &Addr,
    owner: &Addr,
    funds: &[Coin],
    local: &AssetInfo,
    remote_token: &str,
    amount: Uint128,
) -> Result<Option<CosmosMsg>, ContractError> {
    let route = TokenRoute::probe(querier, local, remote_token);
    route.ensure_pair(remote_token)?;

    match (route, local) {
        (TokenRoute::Mintable { wrapped_token, .. }, _) => {
            ensure_no_funds(funds)?;
            Ok(Some(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: wrapped_token.to_string(),
                msg: to_json_binary(&WrappedTokenExecuteMsg::BridgeBurn {
                    owner: owner.to_string(),
                    amount,
                })?,
                funds: vec![],
            })))
        }
        (
            TokenRoute::Escrowed {
                local_token,
                remote_token,
            },
            AssetInfo::Token { contract_addr },
        ) => {
            ensure_no_funds(funds)?;
            ledger::escrow(storage, &local_token, &remote_token, amount)?;
            Ok(Some(CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr: contract_addr.clone(),
                msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
                    owner: owner.to_string(),
                    recipient: bridge.to_string(),
                    amount,
                })?,
                funds: vec![],
            })))
        }
        (
            TokenRoute::Escrowed {
                local_token,
                remote_token,
            },
            AssetInfo::NativeToken { denom },
        ) => {
            let received = attached(funds, denom)?;
            if received != amount {
                return Err(ContractError::AssetTransferFailed {
                    reason: format!("expected {}{}, got {}{}", amount, denom, received, denom),
                });
            }
            ledger::escrow(storage, &local_token, &remote_token, amount)?;
            Ok(None)
        }
    }
}

/// Pay `amount` of `local` to `recipient`: mint it if it is a wrapped token,
/// otherwise release it from escrow.
pub(crate) fn give_asset(
    storage: &mut dyn Storage,
    querier: &QuerierWrapper,
    local: &AssetInfo,
    remote_token: &str,
    recipient: &Addr,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    let route = TokenRoute::probe(querier, local, remote_token);
    route.ensure_pair(remote_token)?;

    match route {
        TokenRoute::Mintable { wrapped_token, .. } => Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: wrapped_token.to_string(),
            msg: to_json_binary(&WrappedTokenExecuteMsg::BridgeMint {
                recipient: recipient.to_string(),
                amount,
            })?,
            funds: vec![],
        })),
        TokenRoute::Escrowed {
            local_token,
            remote_token,
        } => {
            ledger::release(storage, &local_token, &remote_token, amount)?;
            Ok(local.transfer_msg(recipient, amount)?)
        }
    }
}
