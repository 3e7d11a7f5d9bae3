//! Token route probing.
//!
//! Whether a local token is escrowed or minted/burned is decided once per call
//! by asking the token for the wrapped-token capability marker
//! (`BridgeInfo`). Tokens that do not answer, and bank denoms, are escrowed.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, QuerierWrapper};

use common::wrapped_token::{BridgeInfoResponse, WrappedTokenQueryMsg};
use common::AssetInfo;

use crate::error::ContractError;

#[cw_serde]
pub enum TokenRoute {
    /// The bridge holds `local_token` in escrow against `remote_token`
    Escrowed {
        local_token: String,
        remote_token: String,
    },
    /// `wrapped_token` is minted and burned; it declares `declared_remote`
    /// as the token it represents
    Mintable {
        wrapped_token: Addr,
        declared_remote: String,
    },
}

impl TokenRoute {
    pub fn probe(querier: &QuerierWrapper, local: &AssetInfo, remote_token: &str) -> TokenRoute {
        if let AssetInfo::Token { contract_addr } = local {
            let marker: Result<BridgeInfoResponse, _> =
                querier.query_wasm_smart(contract_addr, &WrappedTokenQueryMsg::BridgeInfo {});
            if let Ok(marker) = marker {
                return TokenRoute::Mintable {
                    wrapped_token: Addr::unchecked(contract_addr),
                    declared_remote: marker.remote_token,
                };
            }
        }
        TokenRoute::Escrowed {
            local_token: local.to_string(),
            remote_token: remote_token.to_string(),
        }
    }

    /// Reject a wrapped token that represents something other than
    /// `remote_token`. Escrowed tokens have no declared pair.
    pub fn ensure_pair(&self, remote_token: &str) -> Result<(), ContractError> {
        match self {
            TokenRoute::Mintable {
                wrapped_token,
                declared_remote,
            } if declared_remote != remote_token => Err(ContractError::TokenPairMismatch {
                token: wrapped_token.to_string(),
                expected: remote_token.to_string(),
                declared: declared_remote.clone(),
            }),
            _ => Ok(()),
        }
    }
}
