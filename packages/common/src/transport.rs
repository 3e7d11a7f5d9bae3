//! Interface of the external transport that carries messages between domains.
//!
//! The transport itself lives outside this workspace; the messenger only
//! needs to hand it a payload and to ask it who is acting on the other side.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

#[cw_serde]
pub enum TransportExecuteMsg {
    /// Carry `payload` to `target` on the other domain. Funds attached to the
    /// call travel with it.
    Deliver {
        target: String,
        gas_limit: u64,
        payload: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum TransportQueryMsg {
    #[returns(RemoteSenderResponse)]
    RemoteSender {},
}

#[cw_serde]
pub struct RemoteSenderResponse {
    /// Address on the other domain that originated the delivery in progress.
    pub remote_sender: Option<String>,
}
