//! Canonical message encoding and hashing
//!
//! A message is identified by the keccak256 hash of its ABI call encoding.
//! The encoding depends on the version carried in the nonce:
//!
//! # Version 1
//! ```text
//! relayMessage(uint256 nonce, string sender, string target,
//!              uint256 value, uint256 minGasLimit, bytes message)
//! ```
//!
//! # Version 0 (legacy)
//! ```text
//! relayMessage(string target, string sender, bytes message, uint256 nonce)
//! ```
//!
//! # Byte Layout
//! - Bytes 0-3: selector (first 4 bytes of keccak256 of the signature)
//! - One 32-byte head word per argument: static values inline (big-endian,
//!   left-padded), dynamic values as the offset of their tail
//! - Tails: 32-byte length followed by the data right-padded to 32 bytes
//!
//! Addresses are remote-domain strings, so they are encoded as dynamic
//! strings. Every dynamic field is length-prefixed, which keeps distinct
//! messages from sharing an encoding.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128, Uint256};
use tiny_keccak::{Hasher, Keccak};

use crate::error::ContractError;
use crate::nonce::checked_version;

/// Signature hashed into the selector of version 1 encodings.
pub const RELAY_MESSAGE_V1_SIGNATURE: &str =
    "relayMessage(uint256,string,string,uint256,uint256,bytes)";

/// Signature hashed into the selector of version 0 encodings.
pub const RELAY_MESSAGE_V0_SIGNATURE: &str = "relayMessage(string,string,bytes,uint256)";

/// A message as sent by one messenger and relayed by the other.
#[cw_serde]
pub struct CrossDomainMessage {
    /// Versioned nonce allocated by the sending messenger
    pub nonce: Uint256,
    /// Caller of `SendMessage` on the sending domain
    pub sender: String,
    /// Address called on the receiving domain
    pub target: String,
    /// Native value forwarded to the target
    pub value: Uint128,
    /// Gas the target must be given
    pub min_gas_limit: u64,
    /// Call payload (JSON execute message of the target)
    pub message: Binary,
}

impl CrossDomainMessage {
    /// Canonical encoding for the version carried in the nonce.
    pub fn encode(&self) -> Result<Vec<u8>, ContractError> {
        match checked_version(self.nonce)? {
            0 => Ok(encode_v0(
                &self.target,
                &self.sender,
                self.message.as_slice(),
                self.nonce,
            )),
            _ => Ok(encode_v1(
                self.nonce,
                &self.sender,
                &self.target,
                self.value,
                self.min_gas_limit,
                self.message.as_slice(),
            )),
        }
    }

    /// Hash of the version-specific encoding. For version 0 this is the
    /// legacy relay id, which does not cover `value` or `min_gas_limit`.
    pub fn hash(&self) -> Result<[u8; 32], ContractError> {
        Ok(keccak256(&self.encode()?))
    }

    /// Key of the replay record and the reentrancy lock: the version 1
    /// encoding of every field, whatever version the nonce carries.
    pub fn relay_hash(&self) -> Result<[u8; 32], ContractError> {
        checked_version(self.nonce)?;
        Ok(keccak256(&encode_v1(
            self.nonce,
            &self.sender,
            &self.target,
            self.value,
            self.min_gas_limit,
            self.message.as_slice(),
        )))
    }
}

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Version 1 encoding of a message.
pub fn encode_v1(
    nonce: Uint256,
    sender: &str,
    target: &str,
    value: Uint128,
    min_gas_limit: u64,
    message: &[u8],
) -> Vec<u8> {
    encode_call(
        RELAY_MESSAGE_V1_SIGNATURE,
        &[
            AbiToken::Uint(nonce),
            AbiToken::Dynamic(sender.as_bytes()),
            AbiToken::Dynamic(target.as_bytes()),
            AbiToken::Uint(value.into()),
            AbiToken::Uint(Uint256::from(min_gas_limit)),
            AbiToken::Dynamic(message),
        ],
    )
}

/// Legacy version 0 encoding of a message.
pub fn encode_v0(target: &str, sender: &str, message: &[u8], nonce: Uint256) -> Vec<u8> {
    encode_call(
        RELAY_MESSAGE_V0_SIGNATURE,
        &[
            AbiToken::Dynamic(target.as_bytes()),
            AbiToken::Dynamic(sender.as_bytes()),
            AbiToken::Dynamic(message),
            AbiToken::Uint(nonce),
        ],
    )
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ============================================================================
// Internal helpers
// ============================================================================

enum AbiToken<'a> {
    Uint(Uint256),
    Dynamic(&'a [u8]),
}

fn encode_call(signature: &str, tokens: &[AbiToken]) -> Vec<u8> {
    let head_len = 32 * tokens.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            AbiToken::Uint(value) => head.extend_from_slice(&value.to_be_bytes()),
            AbiToken::Dynamic(data) => {
                head.extend_from_slice(&usize_word(head_len + tail.len()));
                tail.extend_from_slice(&usize_word(data.len()));
                tail.extend_from_slice(data);
                let padding = (32 - data.len() % 32) % 32;
                tail.resize(tail.len() + padding, 0);
            }
        }
    }

    let mut encoded = Vec::with_capacity(4 + head.len() + tail.len());
    encoded.extend_from_slice(&keccak256(signature.as_bytes())[..4]);
    encoded.extend_from_slice(&head);
    encoded.extend_from_slice(&tail);
    encoded
}

fn usize_word(value: usize) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}
