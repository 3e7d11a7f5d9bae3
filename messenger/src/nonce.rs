//! Versioned message nonces.
//!
//! A nonce is a 256-bit value whose top 16 bits carry the message version and
//! whose low 240 bits carry a per-messenger counter. The version selects the
//! encoding used to hash the message.

use cosmwasm_std::{StdResult, Storage, Uint256};

use crate::error::ContractError;
use crate::state::MESSAGE_NONCE;

/// Version stamped on every message this messenger sends.
pub const MESSAGE_VERSION: u16 = 1;

/// Versions this messenger knows how to hash and relay.
pub const SUPPORTED_VERSIONS: [u16; 2] = [0, 1];

/// Pack `version` into the high 16 bits of `counter`.
///
/// Bits of `counter` above the low 240 are discarded.
pub fn encode_versioned_nonce(counter: Uint256, version: u16) -> Uint256 {
    let mut bytes = counter.to_be_bytes();
    bytes[..2].copy_from_slice(&version.to_be_bytes());
    Uint256::from_be_bytes(bytes)
}

/// Split a nonce into `(version, counter)`.
pub fn decode_versioned_nonce(nonce: Uint256) -> (u16, Uint256) {
    let mut bytes = nonce.to_be_bytes();
    let version = u16::from_be_bytes([bytes[0], bytes[1]]);
    bytes[0] = 0;
    bytes[1] = 0;
    (version, Uint256::from_be_bytes(bytes))
}

/// Version of `nonce`, rejecting anything this messenger cannot relay.
pub fn checked_version(nonce: Uint256) -> Result<u16, ContractError> {
    let (version, _) = decode_versioned_nonce(nonce);
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(ContractError::UnsupportedVersion { version });
    }
    Ok(version)
}

/// Nonce the next outbound message will carry.
pub fn current_nonce(storage: &dyn Storage) -> StdResult<Uint256> {
    let counter = MESSAGE_NONCE.may_load(storage)?.unwrap_or_default();
    Ok(encode_versioned_nonce(Uint256::from(counter), MESSAGE_VERSION))
}

/// Allocate the nonce for an outbound message and advance the counter.
pub fn next_nonce(storage: &mut dyn Storage) -> StdResult<Uint256> {
    let nonce = current_nonce(storage)?;
    advance_counter(storage)?;
    Ok(nonce)
}

/// Advance the counter without allocating a nonce (done once per relay).
pub fn advance_counter(storage: &mut dyn Storage) -> StdResult<u64> {
    let counter = MESSAGE_NONCE.may_load(storage)?.unwrap_or_default() + 1;
    MESSAGE_NONCE.save(storage, &counter)?;
    Ok(counter)
}
