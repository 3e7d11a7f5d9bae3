//! Replay guard: per-hash relay status and reentrancy locks.
//!
//! The maps here are private to this module; everything else reads and
//! writes them through the functions below.
//!
//! Status moves `Unset -> Failed -> Succeeded` or `Unset -> Succeeded` and
//! never leaves `Succeeded`. A lock is held only while the nested call of the
//! relay that took it is in flight.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdResult, Storage};
use cw_storage_plus::Map;

use crate::encoding::bytes32_to_hex;
use crate::error::ContractError;

#[cw_serde]
#[derive(Copy, Default)]
pub enum RelayStatus {
    #[default]
    Unset,
    Failed,
    Succeeded,
}

/// Relay outcome per message hash. Absent means `Unset`.
const RELAY_STATUS: Map<&[u8], RelayStatus> = Map::new("relay_status");

/// Hashes whose nested call is currently executing.
const RELAY_LOCKS: Map<&[u8], bool> = Map::new("relay_locks");

/// Relay ids recorded before the versioned hash existed (version 0 only).
const LEGACY_RELAYED: Map<&[u8], bool> = Map::new("legacy_relayed");

pub fn status(storage: &dyn Storage, hash: &[u8; 32]) -> StdResult<RelayStatus> {
    Ok(RELAY_STATUS
        .may_load(storage, hash.as_slice())?
        .unwrap_or_default())
}

pub fn mark_failed(storage: &mut dyn Storage, hash: &[u8; 32]) -> Result<(), ContractError> {
    ensure_not_succeeded(storage, hash)?;
    RELAY_STATUS.save(storage, hash.as_slice(), &RelayStatus::Failed)?;
    Ok(())
}

pub fn mark_succeeded(storage: &mut dyn Storage, hash: &[u8; 32]) -> Result<(), ContractError> {
    ensure_not_succeeded(storage, hash)?;
    RELAY_STATUS.save(storage, hash.as_slice(), &RelayStatus::Succeeded)?;
    Ok(())
}

/// Take the reentrancy lock for `hash`.
pub fn acquire_lock(storage: &mut dyn Storage, hash: &[u8; 32]) -> Result<(), ContractError> {
    if is_locked(storage, hash)? {
        return Err(ContractError::ReentrantCall {
            hash: bytes32_to_hex(hash),
        });
    }
    RELAY_LOCKS.save(storage, hash.as_slice(), &true)?;
    Ok(())
}

/// Drop the lock for `hash`. Must run on every exit of a started relay.
pub fn release_lock(storage: &mut dyn Storage, hash: &[u8; 32]) {
    RELAY_LOCKS.remove(storage, hash.as_slice());
}

pub fn is_locked(storage: &dyn Storage, hash: &[u8; 32]) -> StdResult<bool> {
    Ok(RELAY_LOCKS
        .may_load(storage, hash.as_slice())?
        .unwrap_or(false))
}

pub fn legacy_relayed(storage: &dyn Storage, hash: &[u8; 32]) -> StdResult<bool> {
    Ok(LEGACY_RELAYED
        .may_load(storage, hash.as_slice())?
        .unwrap_or(false))
}

/// Import a relay id from before the upgrade (migration only).
pub fn record_legacy_relayed(storage: &mut dyn Storage, hash: &[u8; 32]) -> StdResult<()> {
    LEGACY_RELAYED.save(storage, hash.as_slice(), &true)
}

fn ensure_not_succeeded(storage: &dyn Storage, hash: &[u8; 32]) -> Result<(), ContractError> {
    if status(storage, hash)? == RelayStatus::Succeeded {
        return Err(ContractError::AlreadyRelayed {
            hash: bytes32_to_hex(hash),
        });
    }
    Ok(())
}
