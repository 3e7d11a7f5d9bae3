//! Escrow ledger.
//!
//! Tracks, per `(local token, remote token)` pair, how much of the local token
//! the bridge holds in escrow. Only this module touches the map, so an amount
//! can only be released after it was escrowed.
//!
//! Keys use the token's string form: the contract address of a CW20 token or
//! the denom of a bank asset. Native coin never enters the ledger.

use cosmwasm_std::{StdResult, Storage, Uint128};
use cw_storage_plus::Map;

use crate::error::ContractError;

/// Escrowed amount per pair
/// Key: (local_token, remote_token), Value: amount held
const DEPOSITS: Map<(&str, &str), Uint128> = Map::new("deposits");

pub fn escrowed(
    storage: &dyn Storage,
    local_token: &str,
    remote_token: &str,
) -> StdResult<Uint128> {
    Ok(DEPOSITS
        .may_load(storage, (local_token, remote_token))?
        .unwrap_or_default())
}

/// Record `amount` taken into escrow. Returns the new balance.
pub fn escrow(
    storage: &mut dyn Storage,
    local_token: &str,
    remote_token: &str,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let current = escrowed(storage, local_token, remote_token)?;
    let updated = current
        .checked_add(amount)
        .map_err(cosmwasm_std::StdError::from)?;
    DEPOSITS.save(storage, (local_token, remote_token), &updated)?;
    Ok(updated)
}

/// Record `amount` leaving escrow. Returns the new balance.
pub fn release(
    storage: &mut dyn Storage,
    local_token: &str,
    remote_token: &str,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    let current = escrowed(storage, local_token, remote_token)?;
    let updated = current
        .checked_sub(amount)
        .map_err(|_| ContractError::LedgerUnderflow {
            local_token: local_token.to_string(),
            remote_token: remote_token.to_string(),
            escrowed: current,
            requested: amount,
        })?;
    if updated.is_zero() {
        DEPOSITS.remove(storage, (local_token, remote_token));
    } else {
        DEPOSITS.save(storage, (local_token, remote_token), &updated)?;
    }
    Ok(updated)
}
