//! Mock transport contract.
//!
//! Stands in for the external channel between domains. Messengers call
//! `Deliver` on the transport of their own domain, which only records the
//! delivery in an outbox and keeps the attached funds. Tests then `Forward`
//! a delivery through the transport of the receiving domain, which sets the
//! remote sender it reports and executes the payload on the target.
//!
//! The remote sender stays set until the next `Forward`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Coin, CosmosMsg, Deps, DepsMut, Empty, Env, MessageInfo,
    Response, StdResult, WasmMsg,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::{Item, Map};

use common::transport::RemoteSenderResponse;

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Same shape as `common::transport::TransportExecuteMsg::Deliver`
    Deliver {
        target: String,
        gas_limit: u64,
        payload: Binary,
    },
    /// Execute `payload` on `target` as if it arrived from `remote_sender`
    Forward {
        remote_sender: String,
        target: String,
        payload: Binary,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(RemoteSenderResponse)]
    RemoteSender {},
    #[returns(Delivery)]
    Delivery { index: u64 },
    #[returns(DeliveryCountResponse)]
    DeliveryCount {},
}

/// One outbound delivery recorded in the outbox.
#[cw_serde]
pub struct Delivery {
    /// Contract that called `Deliver` (the sending messenger)
    pub sender: Addr,
    pub target: String,
    pub value: Vec<Coin>,
    pub gas_limit: u64,
    pub payload: Binary,
}

#[cw_serde]
pub struct DeliveryCountResponse {
    pub count: u64,
}

const DELIVERIES: Map<u64, Delivery> = Map::new("deliveries");
const DELIVERY_COUNT: Item<u64> = Item::new("delivery_count");
const REMOTE_SENDER: Item<String> = Item::new("remote_sender");

pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> StdResult<Response> {
    DELIVERY_COUNT.save(deps.storage, &0)?;
    Ok(Response::new().add_attribute("action", "instantiate_mock_transport"))
}

pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> StdResult<Response> {
    match msg {
        ExecuteMsg::Deliver {
            target,
            gas_limit,
            payload,
        } => {
            let index = DELIVERY_COUNT.load(deps.storage)?;
            DELIVERIES.save(
                deps.storage,
                index,
                &Delivery {
                    sender: info.sender,
                    target,
                    value: info.funds,
                    gas_limit,
                    payload,
                },
            )?;
            DELIVERY_COUNT.save(deps.storage, &(index + 1))?;
            Ok(Response::new()
                .add_attribute("action", "deliver")
                .add_attribute("index", index.to_string()))
        }
        ExecuteMsg::Forward {
            remote_sender,
            target,
            payload,
        } => {
            REMOTE_SENDER.save(deps.storage, &remote_sender)?;
            Ok(Response::new()
                .add_message(CosmosMsg::Wasm(WasmMsg::Execute {
                    contract_addr: target,
                    msg: payload,
                    funds: info.funds,
                }))
                .add_attribute("action", "forward")
                .add_attribute("remote_sender", remote_sender))
        }
    }
}

pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::RemoteSender {} => to_json_binary(&RemoteSenderResponse {
            remote_sender: REMOTE_SENDER.may_load(deps.storage)?,
        }),
        QueryMsg::Delivery { index } => to_json_binary(&DELIVERIES.load(deps.storage, index)?),
        QueryMsg::DeliveryCount {} => to_json_binary(&DeliveryCountResponse {
            count: DELIVERY_COUNT.load(deps.storage)?,
        }),
    }
}

pub fn mock_transport_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}
