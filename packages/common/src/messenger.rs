//! The slice of the messenger interface other contracts call into.
//!
//! These enums serialize to the same JSON as the matching variants of the
//! messenger's own `ExecuteMsg` / `QueryMsg`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

/// Sentinel reported as the remote sender while no relay is executing.
pub const DEFAULT_XDOMAIN_SENDER: &str = "0x000000000000000000000000000000000000dEaD";

#[cw_serde]
pub enum MessengerExecuteMsg {
    /// Send `message` to `target` on the other domain. Native funds attached
    /// to this call become the message value.
    SendMessage {
        target: String,
        message: Binary,
        min_gas_limit: u64,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum MessengerQueryMsg {
    /// Remote address whose message is currently being relayed.
    #[returns(XDomainMessageSenderResponse)]
    XDomainMessageSender {},
}

#[cw_serde]
pub struct XDomainMessageSenderResponse {
    pub sender: String,
}
