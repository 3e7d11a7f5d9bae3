//! Interface of bridge-controlled (wrapped) tokens.
//!
//! A token answering `BridgeInfo` declares that its supply mirrors a token on
//! the other domain and is minted and burned by the bridge instead of being
//! held in escrow.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub enum WrappedTokenExecuteMsg {
    /// Bridge only: mint `amount` to `recipient`.
    BridgeMint { recipient: String, amount: Uint128 },
    /// Bridge only: burn `amount` from `owner` without an allowance.
    BridgeBurn { owner: String, amount: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum WrappedTokenQueryMsg {
    #[returns(BridgeInfoResponse)]
    BridgeInfo {},
}

#[cw_serde]
pub struct BridgeInfoResponse {
    /// Token on the other domain this token represents.
    pub remote_token: String,
    /// Bridge allowed to mint and burn.
    pub bridge: Addr,
}
