//! Execute handlers for the cross-domain messenger.
//!
//! - `send` - outbound `SendMessage`
//! - `relay` - inbound `RelayMessage` and the reply that records its outcome
//! - `admin` - pause, unpause and gas policy updates

mod admin;
mod relay;
mod send;

pub use admin::*;
pub use relay::*;
pub use send::*;

use cosmwasm_std::{Coin, Uint128};

use crate::error::ContractError;

/// Amount of `denom` attached to a call; any other denom is refused.
pub(crate) fn native_value(funds: &[Coin], denom: &str) -> Result<Uint128, ContractError> {
    let mut value = Uint128::zero();
    for coin in funds {
        if coin.denom != denom {
            return Err(ContractError::InvalidFunds {
                reason: format!("only {} can be attached, got {}", denom, coin.denom),
            });
        }
        value = value.checked_add(coin.amount).map_err(cosmwasm_std::StdError::from)?;
    }
    Ok(value)
}
